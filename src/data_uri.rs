use std::{ fmt, str::FromStr };

use indexmap::IndexMap;
use logos::Span;

use crate::{ Error, Result, compose_data_uri, parse_data_uri };

/// The scheme prefix every data URI starts with.
pub const SCHEME: &str = "data:";

/// Parameter key mirroring the media type.
pub const MEDIATYPE: &str = "mediatype";

/// Parameter key for the character set.
pub const CHARSET: &str = "charset";

/// Parameter key (and bare flag segment) marking a base64url payload.
pub const BASE64: &str = "base64";

/// Media type assumed when the media type segment is empty.
pub const DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// Character set assumed alongside [`DEFAULT_MEDIA_TYPE`].
pub const DEFAULT_CHARSET: &str = "US-ASCII";

/// The value of a single data URI parameter.
///
/// Every `attribute=value` segment yields `Text`; the bare `base64` segment
/// yields `Flag(true)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Text(String),
    Flag(bool),
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(b) => Some(*b),
            ParamValue::Text(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self { ParamValue::Text(s.to_string()) }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self { ParamValue::Text(s) }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self { ParamValue::Flag(b) }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Insertion-ordered parameter bag. Re-inserting an existing key replaces the
/// value and keeps the original position.
pub type Parameters = IndexMap<String, ParamValue>;

/// A decomposed data URI: media type, parameters, and payload.
///
/// Values are immutable once built. The `mediatype` parameter is always
/// present and always equal to [`DataUri::media_type`].
#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    media_type: String,
    parameters: Parameters,
    payload: Vec<u8>,
    source: Option<String>,
}

impl DataUri {
    /// The parameter set applied when no media type is given:
    /// `mediatype=text/plain` followed by `charset=US-ASCII`.
    pub fn default_parameters() -> Parameters {
        let mut parameters = Parameters::new();
        parameters.insert(MEDIATYPE.to_string(), DEFAULT_MEDIA_TYPE.into());
        parameters.insert(CHARSET.to_string(), DEFAULT_CHARSET.into());
        parameters
    }

    /// Builds a data URI directly from a payload, without parsing.
    ///
    /// When `media_type` is `None` the default parameter set is used as the
    /// base; otherwise the base is just `{mediatype: media_type}`. The
    /// `overrides` are then merged on top, winning on key collisions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMediaType`] if the resulting media type is not
    /// of the form `type/subtype`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use data_uri::{DataUri, Parameters};
    /// let uri = DataUri::from_data("hello", None, Parameters::new()).unwrap();
    /// assert_eq!(uri.media_type(), "text/plain");
    /// assert_eq!(uri.compose().unwrap(), "data:text/plain;charset=US-ASCII,hello");
    /// ```
    pub fn from_data(
        payload: impl Into<Vec<u8>>,
        media_type: Option<&str>,
        overrides: Parameters,
    ) -> Result<Self> {
        let mut parameters = match media_type {
            None => Self::default_parameters(),
            Some(media_type) => {
                let mut parameters = Parameters::new();
                parameters.insert(MEDIATYPE.to_string(), media_type.into());
                parameters
            }
        };
        parameters.extend(overrides);
        let media_type = match parameters.get(MEDIATYPE) {
            Some(ParamValue::Text(s)) => s.clone(),
            Some(other) => {
                let text = other.to_string();
                let span = 0..text.len();
                return Err(Error::InvalidMediaType(text, span));
            }
            None => return Err(Error::InvalidMediaType(String::new(), Span::default())),
        };
        check_media_type(&media_type, 0..media_type.len())?;
        Ok(Self::from_parts(media_type, parameters, payload.into(), None))
    }

    /// Assembles a value whose parts have already been validated.
    pub(crate) fn from_parts(
        media_type: String,
        parameters: Parameters,
        payload: Vec<u8>,
        source: Option<String>,
    ) -> Self {
        Self { media_type, parameters, payload, source }
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The media type split at its `/`.
    pub fn type_and_subtype(&self) -> (&str, &str) {
        self.media_type.split_once('/').unwrap_or((self.media_type.as_str(), ""))
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameter(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.get(key)
    }

    pub fn charset(&self) -> Option<&str> {
        self.parameter(CHARSET).and_then(ParamValue::as_text)
    }

    /// True when the `base64` parameter is the flag `true`.
    pub fn is_base64(&self) -> bool {
        self.parameter(BASE64) == Some(&ParamValue::Flag(true))
    }

    /// The payload bytes, already decoded if the URI was base64.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// The exact text this value was parsed from, if it was parsed.
    pub fn source_url(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// True when both values have the same media type, the same resolved
    /// parameters (order ignored), and identical payload bytes. The source
    /// text is not compared.
    pub fn is_equivalent(&self, other: &DataUri) -> bool {
        self.media_type == other.media_type
            && self.parameters == other.parameters
            && self.payload == other.payload
    }

    /// Serializes this value. See [`compose_data_uri`].
    pub fn compose(&self) -> Result<String> {
        compose_data_uri(self)
    }
}

impl FromStr for DataUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_data_uri(s)
    }
}

/// Checks that `media_type` is a single `type/subtype` pair that cannot
/// collide with the URI's own delimiters.
pub(crate) fn check_media_type(media_type: &str, span: Span) -> Result<()> {
    let valid = match media_type.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty()
                && !subtype.is_empty()
                && !subtype.contains('/')
                && !media_type.contains([';', ','])
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidMediaType(media_type.to_string(), span))
    }
}
