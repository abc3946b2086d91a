//! SSH-backed driver for any platform definition.

use std::time::{Duration, Instant};

use log::{debug, trace};
use regex::bytes::Regex;
use secrecy::{ExposeSecret, SecretString};

use super::Driver;
use super::privilege::PrivilegeManager;
use super::response::Response;
use crate::channel::{PtyChannel, ReadResult, combine_patterns};
use crate::error::{DriverError, PlatformError, Result};
use crate::platform::PlatformDefinition;
use crate::transport::{AuthMethod, SshConfig, SshTransport};

/// Driver that talks to a real device over SSH.
///
/// Handles:
/// - transport setup and the interactive shell channel
/// - prompt detection across all privilege levels
/// - enable elevation, answering the password prompt with the enable secret
/// - echo/prompt stripping and failure detection on every command
pub struct GenericDriver {
    ssh_config: SshConfig,
    platform: PlatformDefinition,
    transport: Option<SshTransport>,
    channel: Option<PtyChannel>,
    privilege_manager: PrivilegeManager,
    timeout: Duration,

    /// Alternation of every privilege level's prompt.
    prompt_pattern: Regex,
}

impl GenericDriver {
    pub fn new(ssh_config: SshConfig, platform: PlatformDefinition) -> Result<Self> {
        let prompt_pattern = combine_patterns(platform.privilege_levels.values().map(|l| &l.pattern))
            .map_err(PlatformError::from)?;

        Ok(Self {
            timeout: ssh_config.timeout,
            privilege_manager: PrivilegeManager::new(platform.privilege_levels.clone()),
            ssh_config,
            platform,
            transport: None,
            channel: None,
            prompt_pattern,
        })
    }

    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    /// Target host of this driver.
    pub fn host(&self) -> &str {
        &self.ssh_config.host
    }

    /// Enable secret, falling back to the login password.
    fn enable_secret(&self) -> Option<&SecretString> {
        self.ssh_config
            .enable_secret
            .as_ref()
            .or(match &self.ssh_config.auth {
                AuthMethod::Password(password) => Some(password),
                AuthMethod::PrivateKey { .. } => None,
            })
    }

    async fn read_prompt(&mut self) -> Result<ReadResult> {
        let channel = self.channel.as_mut().ok_or(DriverError::NotConnected)?;
        channel.read_until(&[&self.prompt_pattern], self.timeout).await
    }

    /// Walk the privilege graph to `target`, answering password prompts.
    pub async fn acquire_privilege(&mut self, target: &str) -> Result<()> {
        let current = self
            .privilege_manager
            .current()
            .map(str::to_string)
            .ok_or_else(|| DriverError::UnknownPrivilege {
                prompt: String::new(),
            })?;

        if current == target {
            return Ok(());
        }

        let path = self.privilege_manager.find_path(&current, target)?;

        for step in path.windows(2) {
            let (from, to) = (&step[0], &step[1]);
            let transition = self.privilege_manager.transition(from, to).ok_or_else(|| {
                DriverError::NoPrivilegePath {
                    from: from.clone(),
                    to: to.clone(),
                }
            })?;

            debug!("privilege {} -> {} via '{}'", from, to, transition.command);

            let secret = self.enable_secret().cloned();
            let channel = self.channel.as_mut().ok_or(DriverError::NotConnected)?;
            channel.send_line(&transition.command).await?;

            let read = match &transition.auth_prompt {
                None => channel.read_until(&[&self.prompt_pattern], self.timeout).await?,
                Some(auth) => {
                    let first = channel
                        .read_until(&[&self.prompt_pattern, auth], self.timeout)
                        .await?;
                    if first.matched == 0 {
                        first
                    } else {
                        let secret = secret.ok_or_else(|| DriverError::PrivilegeAcquisitionFailed {
                            target: to.clone(),
                        })?;
                        channel.send_line(secret.expose_secret()).await?;

                        // A second password prompt means the secret was refused.
                        let second = channel
                            .read_until(&[&self.prompt_pattern, auth], self.timeout)
                            .await?;
                        if second.matched != 0 {
                            return Err(DriverError::PrivilegeAcquisitionFailed {
                                target: to.clone(),
                            }
                            .into());
                        }
                        second
                    }
                }
            };

            let reached = self.privilege_manager.observe_prompt(&read.prompt());
            if reached != Some(to.as_str()) {
                return Err(DriverError::PrivilegeAcquisitionFailed { target: to.clone() }.into());
            }
        }

        Ok(())
    }
}

impl Driver for GenericDriver {
    async fn open(&mut self) -> Result<()> {
        if self.transport.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let transport = SshTransport::connect(self.ssh_config.clone()).await?;
        let channel = transport.open_channel().await?;
        self.transport = Some(transport);
        self.channel = Some(PtyChannel::new(channel));

        let banner = self.read_prompt().await?;
        self.privilege_manager.observe_prompt(&banner.prompt());

        let target = self.platform.default_privilege.clone();
        self.acquire_privilege(&target).await?;

        for command in self.platform.on_open_commands.clone() {
            self.send_command(&command).await?;
        }

        debug!(
            "session to {} ready at {:?}",
            self.ssh_config.host,
            self.privilege_manager.current()
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut channel) = self.channel.take() {
            if let Err(e) = channel.close().await {
                debug!("closing channel to {}: {}", self.ssh_config.host, e);
            }
        }
        if let Some(transport) = self.transport.take() {
            transport.close().await?;
        }
        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        let channel = self.channel.as_mut().ok_or(DriverError::NotConnected)?;

        let start = Instant::now();
        channel.send_line(command).await?;
        let read = channel.read_until(&[&self.prompt_pattern], self.timeout).await?;
        let elapsed = start.elapsed();

        let prompt = read.prompt();
        self.privilege_manager.observe_prompt(&prompt);

        let result = self.platform.normalize_output(&read.output(), command);
        trace!("'{}' returned {} bytes in {:?}", command, result.len(), elapsed);

        let failure = self.platform.detect_failure(&result).map(str::to_string);
        let response = Response::new(command, result, read.as_str(), prompt, elapsed);

        Ok(match failure {
            Some(message) => response.with_failure(message),
            None => response,
        })
    }

    fn is_open(&self) -> bool {
        self.channel.is_some()
    }

    fn current_privilege(&self) -> Option<&str> {
        self.privilege_manager.current()
    }
}
