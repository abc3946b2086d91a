use serde::Serialize;

use super::Extractor;
use crate::driver::Driver;
use crate::error::Result;
use crate::parse::{Record, StructuredParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArpEntry {
    pub vrf: String,
    pub ip_address: String,
    pub mac_address: String,
    pub interface: String,
}

/// Rows of one ARP table. A row's own `vrf` field wins over `vrf`.
pub fn normalize_arp(vrf: &str, records: &[Record]) -> Vec<ArpEntry> {
    records
        .iter()
        .map(|record| {
            let own = record.text("vrf");
            ArpEntry {
                vrf: if own.is_empty() { vrf.to_string() } else { own },
                ip_address: record.text("ip_address"),
                mac_address: record.text("mac_address"),
                interface: record.text("interface"),
            }
        })
        .collect()
}

impl<D: Driver, P: StructuredParser> Extractor<'_, D, P> {
    /// ARP entries of every VRF.
    pub async fn arp(&mut self) -> Result<Vec<ArpEntry>> {
        let tables = self.per_vrf("show ip arp").await?;
        Ok(tables
            .iter()
            .flat_map(|(vrf, records)| normalize_arp(vrf, records))
            .collect())
    }
}
