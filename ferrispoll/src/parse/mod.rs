//! Structured parsing of command output.
//!
//! [`StructuredParser`] turns the text of one `show` command into
//! [`Record`]s. The production implementation, [`TextFsmParser`], compiles
//! the embedded TextFSM template registered for the `(platform, command)`
//! pair; extractors only see the trait, so tests can feed records directly.

mod record;
mod templates;

use std::collections::HashMap;

use log::trace;
use textfsm_rust::Template;

pub use record::{FieldValue, Record};
pub use templates::{TEMPLATES, TemplateEntry, lookup};

use crate::error::{ParseError, Result};
use crate::platform::Platform;

/// Converts command output into records.
pub trait StructuredParser: Send + Sync {
    fn parse(&self, platform: Platform, command: &str, output: &str) -> Result<Vec<Record>>;
}

/// Parser backed by the embedded TextFSM templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFsmParser;

impl TextFsmParser {
    pub fn new() -> Self {
        Self
    }
}

impl StructuredParser for TextFsmParser {
    fn parse(&self, platform: Platform, command: &str, output: &str) -> Result<Vec<Record>> {
        let entry = lookup(platform, command).ok_or_else(|| ParseError::NoTemplate {
            platform: platform.to_string(),
            command: command.to_string(),
        })?;

        let template_error = |message: String| ParseError::Template {
            command: command.to_string(),
            message,
        };

        let template = Template::parse_str(entry.source).map_err(|e| template_error(e.to_string()))?;
        let mut parser = template.parser();
        let rows = parser
            .parse_text_to_dicts(output)
            .map_err(|e| template_error(e.to_string()))?;

        trace!("{} '{}' parsed into {} rows", platform, command, rows.len());

        let names = entry.value_names();
        Ok(rows.into_iter().map(|row| to_record(row, &names)).collect())
    }
}

/// Lowercase the keys and order them as the template declares them.
fn to_record(row: HashMap<String, String>, names: &[String]) -> Record {
    let mut row: HashMap<String, String> = row
        .into_iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect();

    let mut record: Record = names
        .iter()
        .filter_map(|name| row.remove_entry(name))
        .collect();

    // Anything the declaration scan missed goes last.
    let mut rest: Vec<_> = row.into_iter().collect();
    rest.sort();
    for (key, value) in rest {
        record.insert(key, value);
    }
    record
}
