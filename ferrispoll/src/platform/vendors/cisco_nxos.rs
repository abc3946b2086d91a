//! Cisco NX-OS platform definition.
//!
//! Users normally land directly in `privilege_exec`; the `exec` level only
//! shows up for restricted roles.

use crate::error::PlatformError;
use crate::platform::{PlatformDefinition, PrivilegeLevel};

pub fn platform() -> Result<PlatformDefinition, PlatformError> {
    let exec = PrivilegeLevel::new("exec", r"(?mi)^[\w.\-]{1,63}>\s?$")?;

    let privilege_exec = PrivilegeLevel::new(
        "privilege_exec",
        r"(?mi)^[\w.\-]{1,63}(?:\(maint-mode\))?#\s?$",
    )?
    .with_parent("exec")
    .with_escalate("enable")
    .with_deescalate("disable")
    .with_auth(r"(?mi)^password:\s?$")?
    .with_not_contains("(config");

    let configuration = PrivilegeLevel::new(
        "configuration",
        r"(?mi)^[\w.\-]{1,63}\(config[\w.\-@/:+]{0,32}\)#\s?$",
    )?
    .with_parent("privilege_exec")
    .with_escalate("configure terminal")
    .with_deescalate("end");

    Ok(PlatformDefinition::new("cisco_nxos")
        .with_privilege(exec)
        .with_privilege(privilege_exec)
        .with_privilege(configuration)
        .with_default_privilege("privilege_exec")
        .with_failure_pattern("% Ambiguous command")
        .with_failure_pattern("% Incomplete command")
        .with_failure_pattern("% Invalid command")
        .with_failure_pattern("% Invalid parameter")
        .with_failure_pattern("% Permission denied")
        .with_on_open_command("terminal length 0")
        .with_on_open_command("terminal width 511")
        .with_terminal_size(511, 24))
}
