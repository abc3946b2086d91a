//! Privilege level definition.

use regex::bytes::Regex;

/// One CLI mode of a device (`exec`, `privilege_exec`, `configuration`).
///
/// Levels form a tree through `parent`; moving to a child sends its
/// `escalate_command`, moving back sends the child's `deescalate_command`.
#[derive(Debug, Clone)]
pub struct PrivilegeLevel {
    pub name: String,

    /// Prompt pattern for this level.
    pub pattern: Regex,

    /// Parent level, `None` for the root.
    pub parent: Option<String>,

    pub escalate_command: Option<String>,

    pub deescalate_command: Option<String>,

    /// Password prompt shown while escalating into this level, if any.
    pub auth_prompt: Option<Regex>,

    /// Substrings that disqualify a prompt (`#` is both enable and config).
    pub not_contains: Vec<String>,
}

impl PrivilegeLevel {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            parent: None,
            escalate_command: None,
            deescalate_command: None,
            auth_prompt: None,
            not_contains: vec![],
        })
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_escalate(mut self, command: impl Into<String>) -> Self {
        self.escalate_command = Some(command.into());
        self
    }

    pub fn with_deescalate(mut self, command: impl Into<String>) -> Self {
        self.deescalate_command = Some(command.into());
        self
    }

    /// Escalation asks for a secret at a prompt matching `prompt_pattern`.
    pub fn with_auth(mut self, prompt_pattern: &str) -> Result<Self, regex::Error> {
        self.auth_prompt = Some(Regex::new(prompt_pattern)?);
        Ok(self)
    }

    pub fn with_not_contains(mut self, pattern: impl Into<String>) -> Self {
        self.not_contains.push(pattern.into());
        self
    }

    /// Check if this privilege level matches a prompt.
    pub fn matches(&self, prompt: &str) -> bool {
        !self.not_contains.iter().any(|nc| prompt.contains(nc.as_str()))
            && self.pattern.is_match(prompt.as_bytes())
    }
}
