//! Export, import and open workflows over injected host capabilities.
//!
//! The host decides what "read a file", "download a file" and "open a new
//! tab" mean; the workflows here only sequence them around the codec.

use std::io;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::{EXPORT_FILE_NAME, ImportError, ObsFields, ObservabilityConfig, export_config};
use crate::link::LinkStatus;

/// Reads the full text of a user-selected document.
pub trait TextSource {
    fn read_text(&mut self) -> io::Result<String>;
}

/// Hands bytes to the user under a suggested file name.
pub trait DownloadSink {
    fn download(&mut self, bytes: &[u8], file_name: &str) -> io::Result<()>;
}

/// Opens a URL in a new browsing context.
pub trait LinkOpener {
    fn open(&mut self, url: &str) -> io::Result<()>;
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("import failed: could not read file: {0}")]
    Read(#[source] io::Error),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("export failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("export failed: could not write {file}: {0}", file = EXPORT_FILE_NAME)]
    Write(#[source] io::Error),
    #[error("could not open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: io::Error,
    },
}

impl TransferError {
    /// Whether this error came out of an import attempt.
    pub fn is_import_failure(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Import(_))
    }
}

/// Export `fields` as a pretty-printed document named [`EXPORT_FILE_NAME`].
/// Empty fields are exported as empty strings.
pub fn export_to(
    fields: &ObsFields,
    now: DateTime<Utc>,
    sink: &mut dyn DownloadSink,
) -> Result<ObservabilityConfig, TransferError> {
    let config = export_config(fields, now);
    let json = config.to_pretty_json().map_err(TransferError::Serialize)?;
    sink.download(json.as_bytes(), EXPORT_FILE_NAME)
        .map_err(TransferError::Write)?;
    tracing::info!(file = EXPORT_FILE_NAME, bytes = json.len(), "exported observability config");
    Ok(config)
}

/// Read a document from `source` and apply it to `fields` atomically.
pub fn import_from(
    fields: &mut ObsFields,
    source: &mut dyn TextSource,
) -> Result<ObservabilityConfig, TransferError> {
    let raw = source.read_text().map_err(TransferError::Read)?;
    match fields.apply_import(&raw) {
        Ok(config) => {
            tracing::info!(version = ?config.version, "imported observability config");
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(error = %e, "observability config import rejected");
            Err(e.into())
        }
    }
}

/// Open `status` if it carries a URL. Returns whether anything was opened.
pub fn open_link(opener: &mut dyn LinkOpener, status: &LinkStatus) -> Result<bool, TransferError> {
    let Some(url) = status.url() else {
        return Ok(false);
    };
    opener.open(url).map_err(|source| TransferError::Open {
        url: url.to_string(),
        source,
    })?;
    tracing::debug!(url, "opened observability link");
    Ok(true)
}
