//! `show interface` normalized across IOS and NX-OS.

use serde::Serialize;

use super::Extractor;
use crate::driver::Driver;
use crate::error::Result;
use crate::parse::{Record, StructuredParser};

/// Interface fields shared by both platforms. Missing values are `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceRecord {
    pub interface: String,
    pub link_status: String,
    pub protocol_status: String,
    pub description: String,
    pub ip_address: String,
    pub prefix_length: String,
    pub mtu: String,
    pub speed: String,
    pub input_errors: String,
    pub output_errors: String,
    pub crc: String,
}

impl From<&Record> for InterfaceRecord {
    fn from(record: &Record) -> Self {
        Self {
            interface: record.text("interface"),
            link_status: record.text("link_status"),
            // NX-OS reports no line protocol; its admin state stands in.
            protocol_status: record.first_non_empty(&["protocol_status", "admin_state"]),
            description: record.text("description"),
            ip_address: record.text("ip_address"),
            prefix_length: record.text("prefix_length"),
            mtu: record.text("mtu"),
            speed: record.text("speed"),
            input_errors: record.text("input_errors"),
            output_errors: record.text("output_errors"),
            crc: record.text("crc"),
        }
    }
}

pub fn normalize_interfaces(records: &[Record]) -> Vec<InterfaceRecord> {
    records.iter().map(InterfaceRecord::from).collect()
}

impl<D: Driver, P: StructuredParser> Extractor<'_, D, P> {
    pub async fn interfaces(&mut self) -> Result<Vec<InterfaceRecord>> {
        let records = self.run_parsed("show interface").await?;
        Ok(normalize_interfaces(&records))
    }
}
