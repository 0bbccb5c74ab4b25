//! OS-backed implementations of the core's host capabilities.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use obslink_core::{DownloadSink, LinkOpener, TextSource};

/// Reads a document from a file, or from stdin when the path is `-`.
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for FileSource {
    fn read_text(&mut self) -> io::Result<String> {
        if self.path == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        std::fs::read_to_string(&self.path)
            .map_err(|e| io::Error::new(e.kind(), format!("'{}': {e}", self.path)))
    }
}

/// "Downloads" by writing the file into a directory.
pub struct DirectorySink {
    dir: PathBuf,
    written: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: None,
        }
    }

    /// Path of the last file written.
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }
}

impl DownloadSink for DirectorySink {
    fn download(&mut self, bytes: &[u8], file_name: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote export");
        self.written = Some(path);
        Ok(())
    }
}

/// Opens links in the system browser.
pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&mut self, url: &str) -> io::Result<()> {
        open::that(url)
    }
}
