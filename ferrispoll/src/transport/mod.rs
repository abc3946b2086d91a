//! SSH transport layer wrapping russh.
//!
//! Handles TCP connect, SSH authentication and opening the interactive
//! shell channel the driver talks to.

pub mod config;
mod ssh;

pub use config::{AuthMethod, HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
