//! Built-in vendor platforms.

pub mod cisco_ios;
pub mod cisco_nxos;
