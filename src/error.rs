use logos::Span;
use thiserror::Error;

/// The flat classification of every failure the parser, constructor, and
/// composer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidScheme,
    MalformedSeparator,
    InvalidMediaType,
    MalformedParameter,
    InvalidBase64,
    NotSerializable,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[rustfmt::skip]
pub enum Error {
    #[error("Data URI must start with \"data:\"")]
    InvalidScheme(Span),
    #[error("Expected exactly one comma separating parameters from data, found {0}")]
    MalformedSeparator(usize, Span),
    #[error("Invalid media type '{0}', expected type/subtype")]
    InvalidMediaType(String, Span),
    #[error("Malformed parameter '{0}', expected attribute=value or base64")]
    MalformedParameter(String, Span),
    #[error("Invalid base64url data")]
    InvalidBase64(Span),
    #[error("Not serializable: {0}")]
    NotSerializable(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidScheme(_) => ErrorKind::InvalidScheme,
            Error::MalformedSeparator(..) => ErrorKind::MalformedSeparator,
            Error::InvalidMediaType(..) => ErrorKind::InvalidMediaType,
            Error::MalformedParameter(..) => ErrorKind::MalformedParameter,
            Error::InvalidBase64(_) => ErrorKind::InvalidBase64,
            Error::NotSerializable(_) => ErrorKind::NotSerializable,
        }
    }

    /// The byte range of the input the error refers to, if any.
    pub fn span(&self) -> Option<&Span> {
        match self {
            Error::InvalidScheme(span)
            | Error::MalformedSeparator(_, span)
            | Error::InvalidMediaType(_, span)
            | Error::MalformedParameter(_, span)
            | Error::InvalidBase64(span) => Some(span),
            Error::NotSerializable(_) => None,
        }
    }

    /// Renders the error above the text that produced it, with a caret
    /// underline beneath the offending range. Columns count characters, so
    /// the underline stays aligned after multi-byte text.
    pub fn full_message(&self, source: &str) -> String {
        let Some(range) = self.span() else {
            return self.to_string();
        };
        let before = source.get(..range.start).unwrap_or(source);
        let marked = source.get(range.clone()).unwrap_or("");
        let indent = " ".repeat(before.chars().count());
        let underline = "^".repeat(marked.chars().count().max(1));
        format!("{self} (at byte {})\n{source}\n{indent}{underline}", range.start)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
