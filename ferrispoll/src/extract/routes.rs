use serde::Serialize;

use super::Extractor;
use crate::driver::Driver;
use crate::error::Result;
use crate::parse::{Record, StructuredParser};

/// One next hop of a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub vrf: String,
    pub protocol: String,
    pub network: String,
    pub prefix_length: String,
    pub nexthop_ip: String,
    pub nexthop_if: String,
}

/// Rows of one routing table. A row's own `vrf` field wins over `vrf`.
pub fn normalize_routes(vrf: &str, records: &[Record]) -> Vec<RouteEntry> {
    records
        .iter()
        .map(|record| {
            let own = record.text("vrf");
            RouteEntry {
                vrf: if own.is_empty() { vrf.to_string() } else { own },
                protocol: record.text("protocol"),
                network: record.text("network"),
                prefix_length: record.text("prefix_length"),
                nexthop_ip: record.text("nexthop_ip"),
                nexthop_if: record.text("nexthop_if"),
            }
        })
        .collect()
}

impl<D: Driver, P: StructuredParser> Extractor<'_, D, P> {
    /// Routes of every VRF.
    pub async fn routes(&mut self) -> Result<Vec<RouteEntry>> {
        let tables = self.per_vrf("show ip route").await?;
        Ok(tables
            .iter()
            .flat_map(|(vrf, records)| normalize_routes(vrf, records))
            .collect())
    }
}
