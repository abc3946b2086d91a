//! In-memory driver serving canned command output.

use std::collections::HashMap;
use std::time::Duration;

use super::{Driver, Response};
use crate::error::{ChannelError, DriverError, Result};

#[derive(Debug, Clone, Default)]
pub struct FakeDriver {
    outputs: HashMap<String, String>,
    rejected: HashMap<String, String>,
    broken: Vec<String>,
    pub sent: Vec<String>,
    open: bool,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `output`.
    pub fn with_output(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(command.to_string(), output.to_string());
        self
    }

    /// Answer `command` with a device-side rejection.
    pub fn with_rejection(mut self, command: &str, message: &str) -> Self {
        self.rejected.insert(command.to_string(), message.to_string());
        self
    }

    /// Fail `command` at the channel level.
    pub fn with_broken(mut self, command: &str) -> Self {
        self.broken.push(command.to_string());
        self
    }
}

impl Driver for FakeDriver {
    async fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        if !self.open {
            return Err(DriverError::NotConnected.into());
        }
        self.sent.push(command.to_string());

        if self.broken.iter().any(|c| c == command) {
            return Err(ChannelError::PatternTimeout(Duration::from_secs(1)).into());
        }
        if let Some(message) = self.rejected.get(command) {
            return Ok(Response::new(command, message.clone(), message.clone(), "sw#", Duration::ZERO)
                .with_failure(message.clone()));
        }

        let output = self.outputs.get(command).cloned().unwrap_or_default();
        Ok(Response::new(command, output.clone(), output, "sw#", Duration::ZERO))
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn current_privilege(&self) -> Option<&str> {
        self.open.then_some("privilege_exec")
    }
}
