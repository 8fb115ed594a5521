use crate::{ DataUri, parse_data_uri };

use super::{ FieldValue, Result, Rule, RuleContext };

/// Checks a parsed data URI against an expected media type.
///
/// With a `/`, `expected` is compared against the whole media type and either
/// half may be `*`. Without one it must equal the type or the subtype, or be
/// `*` on its own.
pub fn matches_media_type(uri: &DataUri, expected: &str) -> bool {
    let (kind, subtype) = uri.type_and_subtype();
    match expected.split_once('/') {
        Some((expected_kind, expected_subtype)) => {
            (expected_kind == "*" || expected_kind == kind)
                && (expected_subtype == "*" || expected_subtype == subtype)
        }
        None => expected == "*" || expected == kind || expected == subtype,
    }
}

/// `data_url[:media_type[,base64]]`: the value must be a well-formed data
/// URI, optionally of a given media type and base64-encoded.
///
/// On success the parsed value is stored in the context's
/// [`ProcessedEntities`](super::ProcessedEntities) under the attribute name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrl;

impl Rule for DataUrl {
    fn name(&self) -> &str {
        "data_url"
    }

    fn message(&self) -> Option<&str> {
        Some("The :attribute field must be a valid data URL.")
    }

    fn validate(
        &self,
        attribute: &str,
        value: &FieldValue,
        parameters: &[&str],
        context: &mut RuleContext<'_>,
    ) -> Result<bool> {
        let Some(text) = value.as_text() else {
            return Ok(false);
        };
        let uri = match parse_data_uri(text) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::debug!(
                    rule = self.name(),
                    attribute,
                    kind = ?e.kind(),
                    error = %e,
                    "not a data URI"
                );
                return Ok(false);
            }
        };

        if let Some(expected) = parameters.first() {
            if !matches_media_type(&uri, expected) {
                return Ok(false);
            }
        }
        if parameters.get(1) == Some(&"base64") && !uri.is_base64() {
            return Ok(false);
        }

        tracing::trace!(rule = self.name(), attribute, media_type = uri.media_type(), "caching data URI");
        context.processed.insert(attribute, uri);
        Ok(true)
    }
}
