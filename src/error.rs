//! Error types for decoding and validating race data

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// What went wrong while decoding the JSON input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonErrorKind {
    /// Not valid JSON at all
    Syntax,
    /// Input ended early
    Eof,
    /// Valid JSON with the wrong shape: missing field, bad type, bad time string
    Data,
    /// Failure reading the underlying stream
    Io,
}

/// Data-integrity errors for a race dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("invalid input at line {line}, column {column}: {message}")]
    Json {
        kind: JsonErrorKind,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("record {index} ('{name}') has place 0; places start at 1")]
    InvalidPlace { index: usize, name: String },

    #[error("place {place} is shared by records {first} and {second}")]
    DuplicatePlace {
        place: u32,
        first: usize,
        second: usize,
    },
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match err.classify() {
            Category::Syntax => JsonErrorKind::Syntax,
            Category::Eof => JsonErrorKind::Eof,
            Category::Data => JsonErrorKind::Data,
            Category::Io => JsonErrorKind::Io,
        };

        // serde_json appends " at line L column C" to its Display output
        let full = err.to_string();
        let suffix = format!(" at line {} column {}", err.line(), err.column());
        let message = full
            .strip_suffix(&suffix)
            .map(str::to_string)
            .unwrap_or(full);

        DataError::Json {
            kind,
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}

impl DataError {
    /// Byte span in the source this error points at, if it has a location
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            DataError::Json { line, column, .. } => {
                let start = offset_of(source, *line, *column);
                Some(start..(start + 1).min(source.len()))
            }
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span(source).unwrap_or(0..0);
        let message = self.to_string();

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, message),
        }
    }

    fn label(&self) -> String {
        match self {
            DataError::Json { message, .. } => message.clone(),
            DataError::InvalidPlace { .. } => "place must be at least 1".to_string(),
            DataError::DuplicatePlace { place, .. } => format!("place {} appears twice", place),
        }
    }
}

/// Convert a 1-based line/column pair into a byte offset, clamped to the source
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "[\n  {\"a\": 1}\n]";
        assert_eq!(offset_of(src, 1, 1), 0);
        assert_eq!(offset_of(src, 2, 3), 4);
        assert_eq!(offset_of(src, 99, 99), src.len());
    }

    #[test]
    fn test_from_serde_json_strips_location() {
        let err = serde_json::from_str::<Vec<u32>>("[1, 2,").unwrap_err();
        let data_err = DataError::from(err);
        match data_err {
            DataError::Json {
                kind,
                line,
                message,
                ..
            } => {
                assert_eq!(kind, JsonErrorKind::Eof);
                assert_eq!(line, 1);
                assert!(!message.contains(" at line "));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_format_includes_filename_and_message() {
        let src = "[\"x\"]";
        let err = DataError::from(serde_json::from_str::<Vec<u32>>(src).unwrap_err());
        let report = err.format(src, "data.json");
        assert!(report.contains("data.json"));
        assert!(report.contains("invalid type"));
    }

    #[test]
    fn test_validation_errors_have_no_span() {
        let err = DataError::DuplicatePlace {
            place: 3,
            first: 0,
            second: 4,
        };
        assert_eq!(err.span("[]"), None);
        assert_eq!(err.to_string(), "place 3 is shared by records 0 and 4");
    }
}
