//! Channel layer: prompt-driven reads over the interactive shell.

mod buffer;
mod patterns;
mod pty;

pub use buffer::PatternBuffer;
pub use patterns::combine_patterns;
pub use pty::{DEFAULT_SEARCH_DEPTH, PtyChannel, ReadResult};
