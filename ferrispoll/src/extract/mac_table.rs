//! `show mac address-table` normalized across IOS and NX-OS.

use serde::Serialize;

use super::Extractor;
use crate::driver::Driver;
use crate::error::Result;
use crate::parse::{Record, StructuredParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MacEntry {
    pub vlan_id: String,
    pub mac_address: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Comma-separated when the device lists several ports.
    pub ports: String,
}

impl From<&Record> for MacEntry {
    fn from(record: &Record) -> Self {
        Self {
            vlan_id: record.text("vlan_id"),
            mac_address: record.first_non_empty(&["mac_address", "destination_address"]),
            entry_type: record.text("type"),
            ports: record.first_non_empty(&["ports", "destination_port"]),
        }
    }
}

pub fn normalize_mac_table(records: &[Record]) -> Vec<MacEntry> {
    records.iter().map(MacEntry::from).collect()
}

impl<D: Driver, P: StructuredParser> Extractor<'_, D, P> {
    pub async fn mac_table(&mut self) -> Result<Vec<MacEntry>> {
        let records = self.run_parsed("show mac address-table").await?;
        Ok(normalize_mac_table(&records))
    }
}
