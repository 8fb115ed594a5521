use crate::{
    BASE64,
    DataUri,
    Error,
    MEDIATYPE,
    ParamValue,
    Result,
    SCHEME,
    codec::encode_base64url,
};

/// Composes the wire form of a data URI.
///
/// The media type comes first, followed by every other parameter as
/// `;attribute=value` in insertion order. If the `base64` flag is set it is
/// emitted last and the payload is written as unpadded base64url; otherwise
/// the payload is written verbatim.
///
/// The output is not necessarily byte-identical to the text a value was
/// parsed from, but it always parses back to an equivalent value.
///
/// # Errors
///
/// Returns [`Error::NotSerializable`] if the output could not be parsed back
/// to the same value: a verbatim payload that is not UTF-8 or contains a
/// comma, a parameter key or value containing a delimiter, a boolean
/// parameter other than `base64`, or `base64` set to `false`.
///
/// # Example
///
/// ```rust
/// # use data_uri::{compose_data_uri, parse_data_uri};
/// let uri = parse_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
/// assert_eq!(compose_data_uri(&uri).unwrap(), "data:image/png;base64,aGVsbG8");
/// ```
pub fn compose_data_uri(uri: &DataUri) -> Result<String> {
    let mut result = String::from(SCHEME);
    result.push_str(uri.media_type());

    let mut base64 = false;
    for (key, value) in uri.parameters() {
        match (key.as_str(), value) {
            (MEDIATYPE, _) => {}
            (BASE64, ParamValue::Flag(true)) => base64 = true,
            (BASE64, ParamValue::Flag(false)) => {
                return Err(Error::NotSerializable(
                    "base64 is false; remove the parameter instead".to_string(),
                ));
            }
            (_, ParamValue::Flag(_)) => {
                return Err(Error::NotSerializable(
                    format!("parameter '{key}' holds a boolean; only base64 may"),
                ));
            }
            (_, ParamValue::Text(text)) => {
                check_parameter(key, text)?;
                result.push(';');
                result.push_str(key);
                result.push('=');
                result.push_str(text);
            }
        }
    }

    if base64 {
        result.push_str(";base64,");
        result.push_str(&encode_base64url(uri.payload()));
    } else {
        let payload = uri.payload_str().ok_or_else(|| {
            Error::NotSerializable("payload is not UTF-8 text and base64 is not set".to_string())
        })?;
        if payload.contains(',') {
            return Err(Error::NotSerializable(
                "payload contains a comma and base64 is not set".to_string(),
            ));
        }
        result.push(',');
        result.push_str(payload);
    }

    Ok(result)
}

fn check_parameter(key: &str, value: &str) -> Result<()> {
    if key.contains([';', ',', '=']) {
        return Err(Error::NotSerializable(format!("invalid parameter name '{key}'")));
    }
    if value.contains([';', ',']) {
        return Err(Error::NotSerializable(
            format!("value of parameter '{key}' contains a delimiter"),
        ));
    }
    Ok(())
}
