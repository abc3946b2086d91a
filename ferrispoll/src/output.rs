//! Result files and the connection error log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::error::{OutputError, Result};

/// Run directory timestamp, e.g. `2026-10-19_14-05`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Current local time formatted with [`TIMESTAMP_FORMAT`].
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Timestamped directory holding one file per device.
#[derive(Debug, Clone)]
pub struct RunDirectory {
    path: PathBuf,
}

impl RunDirectory {
    /// `<base>/legacy/<collector>/<timestamp>` with a base directory,
    /// `legacy/results/<collector>/<timestamp>` without.
    pub fn path_for(base: Option<&Path>, collector: &str, timestamp: &str) -> PathBuf {
        match base {
            Some(base) => base.join("legacy").join(collector).join(timestamp),
            None => Path::new("legacy")
                .join("results")
                .join(collector)
                .join(timestamp),
        }
    }

    /// Create the directory and any missing parents.
    pub fn create(base: Option<&Path>, collector: &str, timestamp: &str) -> Result<Self> {
        let path = Self::path_for(base, collector, timestamp);
        fs::create_dir_all(&path).map_err(io_error(&path))?;
        debug!("writing results to {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<hostname>.<extension>` inside the run directory.
    ///
    /// Hostnames come from the inventory; anything that would leave the
    /// directory is refused.
    fn file_for(&self, hostname: &str, extension: &str) -> Result<PathBuf> {
        let invalid = hostname.is_empty()
            || hostname == "."
            || hostname == ".."
            || hostname.contains(['/', '\\', '\0']);
        if invalid {
            return Err(OutputError::InvalidFileName(hostname.to_string()).into());
        }
        Ok(self.path.join(format!("{hostname}.{extension}")))
    }

    /// Write `<hostname>.txt`, replacing any previous file.
    pub fn write_text(&self, hostname: &str, contents: &str) -> Result<PathBuf> {
        let file = self.file_for(hostname, "txt")?;
        fs::write(&file, contents).map_err(io_error(&file))?;
        Ok(file)
    }

    /// Write `<hostname>.json` as pretty JSON.
    pub fn write_json<T: Serialize>(&self, hostname: &str, value: &T) -> Result<PathBuf> {
        let file = self.file_for(hostname, "json")?;
        let json = serde_json::to_string_pretty(value).map_err(OutputError::from)?;
        fs::write(&file, json).map_err(io_error(&file))?;
        Ok(file)
    }
}

/// Append-only `hostname;ip;reason` log of devices that could not be
/// reached.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub const DEFAULT_PATH: &'static str = "connect_error.csv";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, creating the file if needed.
    pub fn record(&self, hostname: &str, ip: &str, reason: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error(&self.path))?;
        writeln!(file, "{hostname};{ip};{reason}").map_err(io_error(&self.path))?;
        Ok(())
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}
