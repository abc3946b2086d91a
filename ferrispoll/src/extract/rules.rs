//! `(platform, metric)` regex rules for resource utilization.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::platform::Platform;

/// Utilization figures read with hand-written regexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Memory,
    Storage,
}

/// How captured numbers become a percentage.
///
/// Indices refer to the captures of all patterns, concatenated in order.
#[derive(Debug, Clone, Copy)]
pub enum Computation {
    /// The capture already is a percentage: `"<n>%"`.
    Verbatim,

    /// Sum of all captures.
    Sum,

    /// `used / total`.
    UsedOfTotal { used: usize, total: usize },

    /// `(total - free) / total`.
    FreeOfTotal { free: usize, total: usize },
}

#[derive(Debug)]
pub struct MetricRule {
    pub platform: Platform,
    pub metric: Metric,
    pub command: &'static str,
    /// Every pattern must match, or the metric falls back to `"0%"`.
    pub patterns: &'static [&'static str],
    pub computation: Computation,
}

/// Value used when output does not match.
pub const UNKNOWN: &str = "0%";

pub static RULES: &[MetricRule] = &[
    MetricRule {
        platform: Platform::CiscoIos,
        metric: Metric::Cpu,
        command: "show proc cpu",
        patterns: &[r"\s+five minutes:\s(\d+)%"],
        computation: Computation::Verbatim,
    },
    MetricRule {
        platform: Platform::CiscoIos,
        metric: Metric::Memory,
        command: "show proc mem sort",
        patterns: &[r"Processor Pool Total:\s+(\d+)\s+Used:\s+(\d+)"],
        computation: Computation::UsedOfTotal { used: 1, total: 0 },
    },
    MetricRule {
        platform: Platform::CiscoIos,
        metric: Metric::Storage,
        command: "dir | sec free",
        patterns: &[r"(\d+)\s+bytes\s+total\s+\((\d+)\s+bytes\s+free\)"],
        computation: Computation::FreeOfTotal { free: 1, total: 0 },
    },
    MetricRule {
        platform: Platform::CiscoNxos,
        metric: Metric::Cpu,
        command: "show system resources",
        patterns: &[r"CPU\s+states\s+:\s+([\d.]+)%\s+user,\s+([\d.]+)%\s+kernel"],
        computation: Computation::Sum,
    },
    MetricRule {
        platform: Platform::CiscoNxos,
        metric: Metric::Memory,
        command: "show system resources",
        patterns: &[r"Memory usage:\s+(\d+)K\s+total,\s+(\d+)K\sused"],
        computation: Computation::UsedOfTotal { used: 1, total: 0 },
    },
    MetricRule {
        platform: Platform::CiscoNxos,
        metric: Metric::Storage,
        command: "dir | in bytes",
        patterns: &[r"(\d+)\s+bytes\s+used", r"(\d+)\s+bytes\s+total"],
        computation: Computation::UsedOfTotal { used: 0, total: 1 },
    },
];

static INDEX: Lazy<HashMap<(Platform, Metric), &'static MetricRule>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|rule| ((rule.platform, rule.metric), rule))
        .collect()
});

type CompiledRules = HashMap<(Platform, Metric), Vec<Regex>>;

static COMPILED: Lazy<Result<CompiledRules, regex::Error>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|rule| {
            let regexes = rule
                .patterns
                .iter()
                .map(|pattern| Regex::new(pattern))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(((rule.platform, rule.metric), regexes))
        })
        .collect()
});

/// The rule for `metric` on `platform`.
pub fn rule(platform: Platform, metric: Metric) -> Option<&'static MetricRule> {
    INDEX.get(&(platform, metric)).copied()
}

impl MetricRule {
    fn regexes(&self) -> Result<&'static [Regex], regex::Error> {
        let compiled = COMPILED.as_ref().map_err(Clone::clone)?;
        Ok(compiled
            .get(&(self.platform, self.metric))
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Apply the rule to command output.
    pub fn evaluate(&self, output: &str) -> Result<String, regex::Error> {
        let mut captures = Vec::new();
        for regex in self.regexes()? {
            match regex.captures(output) {
                Some(caps) => captures.extend(
                    caps.iter()
                        .skip(1)
                        .map(|m| m.map(|m| m.as_str()).unwrap_or_default()),
                ),
                None => return Ok(UNKNOWN.to_string()),
            }
        }
        Ok(self.computation.apply(&captures))
    }
}

impl Computation {
    fn apply(&self, captures: &[&str]) -> String {
        let number = |idx: usize| {
            captures
                .get(idx)
                .and_then(|text| text.parse::<f64>().ok())
                .unwrap_or(0.0)
        };

        match *self {
            Computation::Verbatim => match captures.first() {
                Some(text) if !text.is_empty() => format!("{text}%"),
                _ => UNKNOWN.to_string(),
            },
            Computation::Sum => {
                let sum: f64 = (0..captures.len()).map(number).sum();
                format!("{sum:.2}%")
            }
            Computation::UsedOfTotal { used, total } => percent(number(used), number(total)),
            Computation::FreeOfTotal { free, total } => {
                let total = number(total);
                percent(total - number(free), total)
            }
        }
    }
}

/// `part / total` as `"12.34%"`; a zero total is [`UNKNOWN`].
pub fn percent(part: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.2}%", part / total * 100.0)
    } else {
        UNKNOWN.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(platform: Platform, metric: Metric, output: &str) -> String {
        rule(platform, metric).unwrap().evaluate(output).unwrap()
    }

    #[test]
    fn test_every_pair_has_a_rule() {
        for platform in [Platform::CiscoIos, Platform::CiscoNxos] {
            for metric in [Metric::Cpu, Metric::Memory, Metric::Storage] {
                assert!(rule(platform, metric).is_some(), "{platform} {metric:?}");
            }
        }
    }

    #[test]
    fn test_patterns_compile() {
        let compiled = COMPILED.as_ref().unwrap();
        for rule in RULES {
            assert_eq!(compiled[&(rule.platform, rule.metric)].len(), rule.patterns.len());
        }
    }

    #[test]
    fn test_ios_cpu() {
        let output = "CPU utilization for five seconds: 5%/0%; one minute: 6%; five minutes: 7%";
        assert_eq!(eval(Platform::CiscoIos, Metric::Cpu, output), "7%");
        assert_eq!(eval(Platform::CiscoIos, Metric::Cpu, "no figures"), "0%");
    }

    #[test]
    fn test_ios_memory() {
        let output = "Processor Pool Total: 1000 Used: 250 Free: 750";
        assert_eq!(eval(Platform::CiscoIos, Metric::Memory, output), "25.00%");
        assert_eq!(
            eval(Platform::CiscoIos, Metric::Memory, "Processor Pool Total: 0 Used: 0"),
            "0%"
        );
    }

    #[test]
    fn test_ios_storage() {
        let output = "122185728 bytes total (100000000 bytes free)";
        assert_eq!(eval(Platform::CiscoIos, Metric::Storage, output), "18.16%");
    }

    #[test]
    fn test_nxos_cpu_sums_user_and_kernel() {
        let output = "CPU states  :   3.50% user,   1.25% kernel,   95.25% idle";
        assert_eq!(eval(Platform::CiscoNxos, Metric::Cpu, output), "4.75%");
    }

    #[test]
    fn test_nxos_memory() {
        let output = "Memory usage:   16400000K total,   4100000K used,   12300000K free";
        assert_eq!(eval(Platform::CiscoNxos, Metric::Memory, output), "25.00%");
    }

    #[test]
    fn test_nxos_storage_needs_both_lines() {
        let output = "  1000 bytes used\n  3000 bytes free\n  4000 bytes total\n";
        assert_eq!(eval(Platform::CiscoNxos, Metric::Storage, output), "25.00%");
        assert_eq!(eval(Platform::CiscoNxos, Metric::Storage, "1000 bytes used"), "0%");
    }

    #[test]
    fn test_percent_zero_total() {
        assert_eq!(percent(5.0, 0.0), "0%");
        assert_eq!(percent(1.0, 3.0), "33.33%");
    }
}
