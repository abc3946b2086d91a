//! `%SYS-5-` system messages from the device log.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Extractor;
use crate::driver::Driver;
use crate::error::{PlatformError, Result};
use crate::parse::StructuredParser;

pub const LOG_COMMAND: &str = "show logg | in %SYS-5-";

/// Both passes run in order, so a `%`-prefixed message shows up twice:
/// once with and once without the `%`.
const LOG_PATTERNS: [&str; 2] = [r"%SYS-5-\S+: .*", r"SYS-5-\S+: .*"];

static LOG_REGEXES: Lazy<std::result::Result<Vec<Regex>, regex::Error>> =
    Lazy::new(|| LOG_PATTERNS.iter().map(|pattern| Regex::new(pattern)).collect());

pub fn match_log_lines(output: &str) -> std::result::Result<Vec<String>, regex::Error> {
    let regexes = LOG_REGEXES.as_ref().map_err(Clone::clone)?;
    Ok(regexes
        .iter()
        .flat_map(|regex| regex.find_iter(output).map(|m| m.as_str().to_string()))
        .collect())
}

impl<D: Driver, P: StructuredParser> Extractor<'_, D, P> {
    pub async fn logs(&mut self) -> Result<Vec<String>> {
        let output = self.run(LOG_COMMAND).await?;
        Ok(match_log_lines(&output).map_err(PlatformError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_passes_in_order() {
        let output = "\
*Oct 19 10:00:01: %SYS-5-CONFIG_I: Configured from console by admin on vty0
*Oct 19 10:05:12: %SYS-5-RESTART: System restarted --";

        let lines = match_log_lines(output).unwrap();
        assert_eq!(
            lines,
            vec![
                "%SYS-5-CONFIG_I: Configured from console by admin on vty0",
                "%SYS-5-RESTART: System restarted --",
                "SYS-5-CONFIG_I: Configured from console by admin on vty0",
                "SYS-5-RESTART: System restarted --",
            ]
        );
    }

    #[test]
    fn test_no_matches() {
        assert!(match_log_lines("").unwrap().is_empty());
    }
}
