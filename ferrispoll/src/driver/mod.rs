//! High-level driver for device interaction.
//!
//! The [`Driver`] trait is the seam between the SSH session and the
//! extraction code: extractors only ever call `send_command`, so they run
//! the same against a live [`GenericDriver`] or an in-memory fake.

mod builder;
#[cfg(test)]
pub(crate) mod fake;
mod generic;
mod privilege;
mod response;

pub use builder::DriverBuilder;
pub use generic::GenericDriver;
pub use privilege::{PrivilegeManager, Transition};
pub use response::Response;

use std::future::Future;

use crate::error::Result;

/// A connection to one device that can run CLI commands.
pub trait Driver: Send {
    /// Open the connection and reach the platform's default privilege level.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Close the connection.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Send a command and wait for the prompt.
    fn send_command(&mut self, command: &str) -> impl Future<Output = Result<Response>> + Send;

    /// Check if the driver is connected.
    fn is_open(&self) -> bool;

    /// Get the current privilege level name.
    fn current_privilege(&self) -> Option<&str>;
}
