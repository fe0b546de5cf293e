//! Verbatim persistence of unparsable payloads for post-mortem.

use chrono::Utc;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Writes each offending raw payload to its own timestamped file under a
/// fixed directory, separate from the per-point status shown to the user.
#[derive(Debug, Clone)]
pub struct DiagnosticSink {
    dir: PathBuf,
}

impl DiagnosticSink {
    pub fn new(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persist one payload verbatim; returns the path it was written to.
    pub fn record(&self, body: &str) -> io::Result<PathBuf> {
        let name = format!("payload-{}.txt", Utc::now().format("%Y%m%dT%H%M%S%.3f"));
        let path = self.dir.join(name);
        fs::write(&path, body)?;
        Ok(path)
    }
}
