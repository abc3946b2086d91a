//! Running a command once per routing table.

use log::warn;

use super::Extractor;
use crate::driver::Driver;
use crate::error::Result;
use crate::parse::{Record, StructuredParser};
use crate::platform::Platform;

/// Name of the global routing table.
pub const DEFAULT_VRF: &str = "default";

/// Names from `show vrf`, minus blanks and the default table.
pub fn vrf_names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.text("name"))
        .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(DEFAULT_VRF))
        .collect()
}

impl<D: Driver, P: StructuredParser> Extractor<'_, D, P> {
    /// Non-default VRFs configured on the device.
    pub async fn vrfs(&mut self) -> Result<Vec<String>> {
        let records = self.run_parsed("show vrf").await?;
        Ok(vrf_names(&records))
    }

    /// Parse `base` for every routing table, grouped by VRF name.
    ///
    /// NX-OS answers `<base> vrf all` in one go and its rows carry their own
    /// VRF. IOS needs `<base>` for the default table and
    /// `<base> vrf <name>` for each VRF from `show vrf`. A rejected or
    /// unparsable VRF listing or per-VRF table is skipped, so the default
    /// table is kept.
    pub(super) async fn per_vrf(&mut self, base: &str) -> Result<Vec<(String, Vec<Record>)>> {
        if self.platform == Platform::CiscoNxos {
            let records = self.run_parsed(&format!("{base} vrf all")).await?;
            return Ok(vec![(DEFAULT_VRF.to_string(), records)]);
        }

        let mut tables = vec![(DEFAULT_VRF.to_string(), self.run_parsed(base).await?)];

        let vrfs = match self.vrfs().await {
            Ok(vrfs) => vrfs,
            Err(e) if e.is_command_failure() => {
                warn!("listing VRFs failed, keeping the default table: {}", e);
                return Ok(tables);
            }
            Err(e) => return Err(e),
        };

        for vrf in vrfs {
            match self.run_parsed(&format!("{base} vrf {vrf}")).await {
                Ok(records) => tables.push((vrf, records)),
                Err(e) if e.is_command_failure() => warn!("skipping VRF {}: {}", vrf, e),
                Err(e) => return Err(e),
            }
        }

        Ok(tables)
    }
}
