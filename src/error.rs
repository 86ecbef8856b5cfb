use wasm_bindgen::JsValue;

/// Errors raised while loading sites, generating transects or exporting them.
#[derive(Debug)]
pub enum TransectError {
    /// A site field is missing, out of range or inconsistent; the site is skipped.
    InvalidSiteInput {
        site: String,
        reason: String,
    },
    /// A line group resolved to fewer than two vertices.
    InsufficientPoints {
        key: String,
        count: usize,
    },
    /// Interval sequence whose start lies beyond its end.
    DegenerateSequence {
        start: f64,
        end: f64,
    },
    /// Interval step that is zero, negative or not finite.
    InvalidStep {
        step: f64,
    },
    /// Interval sequence longer than `MAX_INTERVALS`.
    TooManyIntervals {
        count: usize,
    },
    /// Malformed row or column in a delimited site table.
    SiteTable {
        row: Option<u64>,
        message: String,
    },
    /// CSV writing failed.
    Csv(csv::Error),
    /// Buffer or encoding failure while finishing an export.
    Io(std::io::Error),
    /// GPX writing failed.
    Xml(quick_xml::Error),
    /// JSON serialization failed.
    Json(serde_json::Error),
}

impl TransectError {
    pub(crate) fn invalid_site(site: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSiteInput {
            site: site.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for TransectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSiteInput { site, reason } => {
                write!(f, "Invalid input for site '{site}': {reason}")
            }
            Self::InsufficientPoints { key, count } => write!(
                f,
                "Line '{key}' has {count} point(s), at least 2 are required"
            ),
            Self::DegenerateSequence { start, end } => write!(
                f,
                "Interval sequence start {start} lies beyond its end {end}"
            ),
            Self::InvalidStep { step } => write!(f, "Invalid interval step {step}"),
            Self::TooManyIntervals { count } => {
                write!(f, "Interval sequence would produce {count} terms")
            }
            Self::SiteTable { row, message } => match row {
                Some(row) => write!(f, "Site table error at row {row}: {message}"),
                None => write!(f, "Site table error: {message}"),
            },
            Self::Csv(e) => write!(f, "CSV error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Xml(e) => write!(f, "XML write error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for TransectError {}

impl From<csv::Error> for TransectError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<std::io::Error> for TransectError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<quick_xml::Error> for TransectError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e)
    }
}

impl From<serde_json::Error> for TransectError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<TransectError> for JsValue {
    fn from(e: TransectError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
