use csv::{ReaderBuilder, Trim};

use crate::error::TransectError;
use crate::survey_types::Site;

type Result<T> = std::result::Result<T, TransectError>;

/// Parse a delimited site table (header row required) into sites, in row
/// order. Columns may appear in any order; unknown columns are ignored.
pub fn parse_sites(text: &str) -> Result<Vec<Site>> {
    parse_sites_with_delimiter(text, b',')
}

/// Same as [`parse_sites`] for tables using another delimiter, e.g. `b';'`.
pub fn parse_sites_with_delimiter(text: &str, delimiter: u8) -> Result<Vec<Site>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    reader
        .deserialize::<Site>()
        .map(|record| record.map_err(site_table_error))
        .collect()
}

fn site_table_error(e: csv::Error) -> TransectError {
    let row = e.position().map(|p| p.line());
    let message = match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("column {}: {}", field + 1, err.kind()),
            None => err.kind().to_string(),
        },
        _ => e.to_string(),
    };
    TransectError::SiteTable { row, message }
}
