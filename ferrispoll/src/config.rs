//! Polling run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::output::ErrorLog;
use crate::transport::HostKeyVerification;

/// Settings shared by every device in a run.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Root of the result tree; `None` writes under `legacy/results/`.
    pub base_dir: Option<PathBuf>,

    /// Where unreachable devices are logged.
    pub error_log: PathBuf,

    /// Connection and per-command timeout.
    pub timeout: Duration,

    pub host_key_verification: HostKeyVerification,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            error_log: PathBuf::from(ErrorLog::DEFAULT_PATH),
            timeout: Duration::from_secs(30),
            host_key_verification: HostKeyVerification::default(),
        }
    }
}

impl PollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn error_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_log = path.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PollConfig::new();
        assert_eq!(config.base_dir, None);
        assert_eq!(config.error_log, PathBuf::from("connect_error.csv"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.host_key_verification, HostKeyVerification::Disabled);
    }

    #[test]
    fn test_builder_overrides() {
        let config = PollConfig::new()
            .base_dir("/srv/acme")
            .error_log("/tmp/errors.csv")
            .timeout(Duration::from_secs(5))
            .host_key_verification(HostKeyVerification::AcceptNew);
        assert_eq!(config.base_dir, Some(PathBuf::from("/srv/acme")));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.host_key_verification, HostKeyVerification::AcceptNew);
    }
}
