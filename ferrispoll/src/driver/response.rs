//! Response type for command execution results.

use std::time::Duration;

use crate::error::{DriverError, Result};

/// Output of one command.
#[derive(Debug, Clone)]
pub struct Response {
    pub command: String,

    /// Output with the echoed command and trailing prompt removed.
    pub result: String,

    /// Output as read from the channel.
    pub raw_result: String,

    /// Prompt that ended the output.
    pub prompt: String,

    pub elapsed: Duration,

    /// Failure substring found in the output, if any.
    pub failure_message: Option<String>,
}

impl Response {
    pub fn new(
        command: impl Into<String>,
        result: impl Into<String>,
        raw_result: impl Into<String>,
        prompt: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            result: result.into(),
            raw_result: raw_result.into(),
            prompt: prompt.into(),
            elapsed,
            failure_message: None,
        }
    }

    /// Mark this response as rejected by the device.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure_message = Some(message.into());
        self
    }

    /// The output, or a [`DriverError::CommandFailed`] if the device
    /// rejected the command.
    pub fn into_result(self) -> Result<String> {
        match self.failure_message {
            None => Ok(self.result),
            Some(message) => Err(DriverError::CommandFailed {
                command: self.command,
                message,
            }
            .into()),
        }
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.result)
    }
}
