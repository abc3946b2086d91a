//! Platform definition for vendor-specific CLI behaviour.

use indexmap::IndexMap;

use super::privilege_level::PrivilegeLevel;

/// Everything the driver needs to know about one CLI dialect.
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    /// Platform name (`cisco_ios`, `cisco_nxos`).
    pub name: String,

    /// Privilege levels, root first.
    pub privilege_levels: IndexMap<String, PrivilegeLevel>,

    /// Level the driver acquires after login.
    pub default_privilege: String,

    /// Output substrings that mark a command as rejected.
    pub failed_when_contains: Vec<String>,

    /// Commands run once the default privilege is acquired.
    pub on_open_commands: Vec<String>,

    pub terminal_width: u32,

    pub terminal_height: u32,
}

impl PlatformDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            privilege_levels: IndexMap::new(),
            default_privilege: String::new(),
            failed_when_contains: vec![],
            on_open_commands: vec![],
            terminal_width: 511,
            terminal_height: 24,
        }
    }

    pub fn with_privilege(mut self, level: PrivilegeLevel) -> Self {
        self.privilege_levels.insert(level.name.clone(), level);
        self
    }

    pub fn with_default_privilege(mut self, name: impl Into<String>) -> Self {
        self.default_privilege = name.into();
        self
    }

    pub fn with_failure_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.failed_when_contains.push(pattern.into());
        self
    }

    pub fn with_on_open_command(mut self, command: impl Into<String>) -> Self {
        self.on_open_commands.push(command.into());
        self
    }

    pub fn with_terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// First failure substring present in `output`.
    pub fn detect_failure(&self, output: &str) -> Option<&str> {
        self.failed_when_contains
            .iter()
            .find(|pattern| output.contains(pattern.as_str()))
            .map(String::as_str)
    }

    /// Strip carriage returns and the echoed command from raw output.
    ///
    /// `raw` must already exclude the trailing prompt.
    pub fn normalize_output(&self, raw: &str, command: &str) -> String {
        let text = raw.replace("\r\n", "\n").replace('\r', "");
        let mut lines = text.lines().peekable();

        // The echo can be preceded by blank lines on slow terminals.
        while lines.peek().is_some_and(|l| l.trim().is_empty()) {
            lines.next();
        }
        if lines.peek().is_some_and(|l| l.trim_end().ends_with(command)) {
            lines.next();
        }

        let mut out = lines.collect::<Vec<_>>().join("\n");
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        out
    }
}
