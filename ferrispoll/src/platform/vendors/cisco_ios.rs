//! Cisco IOS / IOS-XE platform definition.
//!
//! ```text
//! switch>                      # exec
//! switch#                      # privilege_exec
//! switch(config-if)#           # configuration
//! ```
//!
//! Prompt patterns follow scrapli's IOS-XE driver.

use crate::error::PlatformError;
use crate::platform::{PlatformDefinition, PrivilegeLevel};

pub fn platform() -> Result<PlatformDefinition, PlatformError> {
    let exec = PrivilegeLevel::new("exec", r"(?mi)^[\w.\-@/:]{1,63}>\s?$")?;

    let privilege_exec = PrivilegeLevel::new("privilege_exec", r"(?mi)^[\w.\-@/:]{1,63}#\s?$")?
        .with_parent("exec")
        .with_escalate("enable")
        .with_deescalate("disable")
        .with_auth(r"(?mi)^(?:enable\s+)?password:\s?$")?;

    let configuration = PrivilegeLevel::new(
        "configuration",
        r"(?mi)^[\w.\-@/:]{1,63}\(conf[\w.\-@/:+]{0,63}\)#\s?$",
    )?
    .with_parent("privilege_exec")
    .with_escalate("configure terminal")
    .with_deescalate("end");

    Ok(PlatformDefinition::new("cisco_ios")
        .with_privilege(exec)
        .with_privilege(privilege_exec)
        .with_privilege(configuration)
        .with_default_privilege("privilege_exec")
        .with_failure_pattern("% Ambiguous command")
        .with_failure_pattern("% Incomplete command")
        .with_failure_pattern("% Invalid input detected")
        .with_failure_pattern("% Unknown command")
        .with_on_open_command("terminal length 0")
        .with_on_open_command("terminal width 511")
        .with_terminal_size(511, 24))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ios_platform() {
        let platform = platform().unwrap();
        assert_eq!(platform.name, "cisco_ios");
        assert_eq!(platform.default_privilege, "privilege_exec");
        assert_eq!(
            platform.on_open_commands,
            vec!["terminal length 0".to_string(), "terminal width 511".to_string()]
        );
    }

    #[test]
    fn test_prompts() {
        let platform = platform().unwrap();
        let exec = platform.privilege_levels.get("exec").unwrap();
        let privileged = platform.privilege_levels.get("privilege_exec").unwrap();
        let config = platform.privilege_levels.get("configuration").unwrap();

        assert!(exec.matches("access-sw01>"));
        assert!(!exec.matches("access-sw01#"));

        assert!(privileged.matches("access-sw01#"));
        assert!(privileged.matches("rtr.lab-01# "));
        assert!(!privileged.matches("access-sw01(config)#"));

        assert!(config.matches("access-sw01(config)#"));
        assert!(config.matches("access-sw01(config-if)#"));
        assert!(!config.matches("access-sw01#"));
    }

    #[test]
    fn test_enable_password_prompt() {
        let platform = platform().unwrap();
        let privileged = platform.privilege_levels.get("privilege_exec").unwrap();
        let auth = privileged.auth_prompt.as_ref().unwrap();
        assert!(auth.is_match(b"Password: "));
        assert!(auth.is_match(b"enable\r\nPassword:"));
    }
}
