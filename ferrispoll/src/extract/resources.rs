//! CPU, memory and storage utilization.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

use super::Extractor;
use super::rules::{self, Metric, UNKNOWN};
use crate::driver::Driver;
use crate::error::{PlatformError, Result};
use crate::parse::StructuredParser;

/// Utilization percentages, e.g. `"7%"` or `"25.00%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceUsage {
    pub cpu_utilization: String,
    pub memory_utilization: String,
    pub storage_utilization: String,
}

impl Default for ResourceUsage {
    fn default() -> Self {
        Self {
            cpu_utilization: UNKNOWN.to_string(),
            memory_utilization: UNKNOWN.to_string(),
            storage_utilization: UNKNOWN.to_string(),
        }
    }
}

impl<D: Driver, P: StructuredParser> Extractor<'_, D, P> {
    /// Read one metric with its regex rule.
    pub async fn metric(&mut self, metric: Metric) -> Result<String> {
        self.metric_with(metric, &mut HashMap::new()).await
    }

    /// Like [`metric`](Self::metric), reusing output already in `outputs`
    /// and keeping new output there.
    async fn metric_with(
        &mut self,
        metric: Metric,
        outputs: &mut HashMap<&'static str, String>,
    ) -> Result<String> {
        let rule = rules::rule(self.platform, metric).ok_or_else(|| {
            PlatformError::InvalidDefinition {
                message: format!("no {:?} rule for {}", metric, self.platform),
            }
        })?;
        let output = match outputs.entry(rule.command) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(self.run(rule.command).await?),
        };
        Ok(rule.evaluate(output).map_err(PlatformError::from)?)
    }

    /// All three metrics. A command shared by several rules is sent once.
    pub async fn resources(&mut self) -> Result<ResourceUsage> {
        let mut outputs = HashMap::new();
        Ok(ResourceUsage {
            cpu_utilization: self.metric_with(Metric::Cpu, &mut outputs).await?,
            memory_utilization: self.metric_with(Metric::Memory, &mut outputs).await?,
            storage_utilization: self.metric_with(Metric::Storage, &mut outputs).await?,
        })
    }
}
