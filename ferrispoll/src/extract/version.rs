use serde::Serialize;

use super::Extractor;
use crate::driver::Driver;
use crate::error::Result;
use crate::parse::{Record, StructuredParser};

/// Identity fields from `show version`. Empty when nothing parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub hostname: String,
    pub uptime: String,
    pub version: String,
}

impl VersionInfo {
    /// Built from the first parsed row only.
    pub fn from_records(records: &[Record]) -> Self {
        records
            .first()
            .map(|first| Self {
                hostname: first.text("hostname"),
                uptime: first.text("uptime"),
                version: first.text("version"),
            })
            .unwrap_or_default()
    }
}

impl<D: Driver, P: StructuredParser> Extractor<'_, D, P> {
    pub async fn version(&mut self) -> Result<VersionInfo> {
        let records = self.run_parsed("show version").await?;
        Ok(VersionInfo::from_records(&records))
    }
}
