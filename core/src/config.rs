use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::{DEFAULT_LOGS_QUERY_TPL, DEFAULT_PROM_QUERY_TPL};

/// Schema version written on export and the only one accepted on import.
pub const CONFIG_VERSION: u32 = 1;

/// File name offered for the exported document.
pub const EXPORT_FILE_NAME: &str = "toolsObsConf.json";

/// Prefix of every [`ImportError`] message, so hosts can surface it as-is.
pub const IMPORT_FAILED_MARKER: &str = "import failed";

/// The four user-editable fields behind the metrics and logs links.
///
/// Owned by the host and passed explicitly into the link and codec
/// functions. Empty base URLs are a valid state (the link is disabled).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObsFields {
    pub prom_base: String,
    pub prom_query_tpl: String,
    pub logs_base: String,
    pub logs_query_tpl: String,
}

impl ObsFields {
    /// Empty base URLs with the stock query templates.
    pub fn defaults() -> Self {
        Self {
            prom_base: String::new(),
            prom_query_tpl: DEFAULT_PROM_QUERY_TPL.to_string(),
            logs_base: String::new(),
            logs_query_tpl: DEFAULT_LOGS_QUERY_TPL.to_string(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::defaults();
    }

    /// Parse `raw` and, only if it is a valid document, replace all four
    /// fields at once. On error `self` is left untouched.
    pub fn apply_import(&mut self, raw: &str) -> Result<ObservabilityConfig, ImportError> {
        let config = import_config(raw)?;
        *self = config.fields.clone();
        Ok(config)
    }
}

/// The exported document: editable fields plus version and export time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilityConfig {
    #[serde(flatten)]
    pub fields: ObsFields,
    /// Always set on export. `None` on import means the document carried no
    /// version (or `null`); it was accepted but is not reported as current.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// RFC 3339 UTC timestamp. Always set on export; optional on import.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl ObservabilityConfig {
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import failed: file is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error(
        "import failed: expected an object with string fields promBase, promQueryTpl, logsBase, logsQueryTpl: {0}"
    )]
    Shape(#[source] serde_json::Error),
    #[error("import failed: unsupported config version {found} (expected {expected})", expected = CONFIG_VERSION)]
    UnsupportedVersion { found: String },
}

/// Wire shape accepted on import. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigDocument {
    #[serde(flatten)]
    fields: ObsFields,
    #[serde(default)]
    version: Option<serde_json::Value>,
    #[serde(default)]
    exported_at: Option<serde_json::Value>,
}

/// Snapshot `fields` as-is (no trimming or defaulting) stamped with `now`.
pub fn export_config(fields: &ObsFields, now: DateTime<Utc>) -> ObservabilityConfig {
    ObservabilityConfig {
        fields: fields.clone(),
        version: Some(CONFIG_VERSION),
        exported_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}

pub fn export_config_now(fields: &ObsFields) -> ObservabilityConfig {
    export_config(fields, Utc::now())
}

/// Parse and validate an exported document.
///
/// Values are copied verbatim: no length cap and no scheme check, since an
/// unusable base URL only disables its link later. A missing or `null`
/// `version` is accepted and left as `None`; anything other than the
/// current version is rejected.
pub fn import_config(raw: &str) -> Result<ObservabilityConfig, ImportError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(ImportError::Syntax)?;
    let doc: ConfigDocument = serde_json::from_value(value).map_err(ImportError::Shape)?;

    let version = match doc.version {
        None | Some(serde_json::Value::Null) => {
            tracing::warn!(
                expected = CONFIG_VERSION,
                "observability config has no version; importing fields as-is"
            );
            None
        }
        Some(v) if v.as_u64() == Some(u64::from(CONFIG_VERSION)) => Some(CONFIG_VERSION),
        Some(other) => {
            tracing::debug!(version = %other, "rejecting observability config version");
            return Err(ImportError::UnsupportedVersion {
                found: other.to_string(),
            });
        }
    };

    let exported_at = doc
        .exported_at
        .and_then(|v| v.as_str().map(str::to_string));

    Ok(ObservabilityConfig {
        fields: doc.fields,
        version,
        exported_at,
    })
}
