//! PTY channel for interactive device sessions.

use std::time::Duration;

use log::{debug, trace};
use regex::bytes::Regex;
use russh::client::Msg;
use russh::{Channel, ChannelMsg};

use super::buffer::PatternBuffer;
use crate::error::{ChannelError, Result};

/// Default number of tail bytes searched for a prompt.
pub const DEFAULT_SEARCH_DEPTH: usize = 1000;

/// Interactive shell channel with prompt-driven reads.
pub struct PtyChannel {
    channel: Channel<Msg>,
    buffer: PatternBuffer,
}

/// Output collected by [`PtyChannel::read_until`].
#[derive(Debug)]
pub struct ReadResult {
    /// Everything read, prompt included.
    pub data: Vec<u8>,

    /// Index into the pattern slice of the pattern that matched.
    pub matched: usize,

    /// Byte offset in `data` where the matching prompt starts.
    pub prompt_start: usize,
}

impl ReadResult {
    /// Output before the prompt (lossy UTF-8).
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.data[..self.prompt_start]).into_owned()
    }

    /// The prompt text that ended the read.
    pub fn prompt(&self) -> String {
        String::from_utf8_lossy(&self.data[self.prompt_start..])
            .trim()
            .to_string()
    }

    /// Everything read, lossy UTF-8.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl PtyChannel {
    /// Wrap an opened shell channel.
    pub fn new(channel: Channel<Msg>) -> Self {
        Self {
            channel,
            buffer: PatternBuffer::new(DEFAULT_SEARCH_DEPTH),
        }
    }

    /// Send a line of input, terminated with a newline.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        let mut payload = Vec::with_capacity(line.len() + 1);
        payload.extend_from_slice(line.as_bytes());
        payload.push(b'\n');
        self.channel
            .data(&payload[..])
            .await
            .map_err(ChannelError::Ssh)?;
        Ok(())
    }

    /// Read until one of `patterns` sits at the end of the output.
    ///
    /// Patterns are tried in order on each chunk; the first one anchored at
    /// the end of the buffer wins. On timeout the unmatched output is
    /// dropped.
    pub async fn read_until(&mut self, patterns: &[&Regex], timeout: Duration) -> Result<ReadResult> {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            for (idx, pattern) in patterns.iter().enumerate() {
                if let Some(prompt_start) = self.buffer.prompt_at_end(pattern) {
                    return Ok(ReadResult {
                        data: self.buffer.take(),
                        matched: idx,
                        prompt_start,
                    });
                }
            }

            let Ok(msg) = tokio::time::timeout_at(deadline, self.channel.wait()).await else {
                // Leftover output would otherwise be read as the next command's.
                debug!(
                    "no prompt within {:?}, discarding {} buffered bytes",
                    timeout,
                    self.buffer.as_slice().len()
                );
                self.buffer.clear();
                return Err(ChannelError::PatternTimeout(timeout).into());
            };

            match msg {
                Some(ChannelMsg::Data { data }) => {
                    trace!("received {} bytes", data.len());
                    self.buffer.extend(&data);
                }
                Some(ChannelMsg::ExtendedData { data, .. }) => self.buffer.extend(&data),
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(ChannelError::Closed.into());
                }
                Some(other) => trace!("ignoring channel message {:?}", other),
            }
        }
    }

    /// Close the channel.
    pub async fn close(&mut self) -> Result<()> {
        self.channel.eof().await.map_err(ChannelError::Ssh)?;
        Ok(())
    }
}
