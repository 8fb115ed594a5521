use logos::{ Logos, Span };

use crate::{
    BASE64,
    DataUri,
    Error,
    MEDIATYPE,
    ParamValue,
    Parameters,
    Result,
    SCHEME,
    Token,
    codec::decode_base64url,
    data_uri::check_media_type,
};

/// Parses a data URI from a string input.
///
/// The input must start with `data:` and contain exactly one comma, which
/// separates the `;`-delimited parameter section from the data section. The
/// first parameter segment is the media type; an empty media type expands to
/// `text/plain;charset=US-ASCII`. Later segments are `attribute=value` pairs
/// or the bare `base64` flag, merged left to right with later keys winning.
///
/// # Arguments
///
/// * `src` - A string slice containing the data URI.
///
/// # Returns
///
/// * `Ok(DataUri)` with the payload decoded from base64url if the `base64`
///   flag is present, or taken verbatim otherwise. The input is retained as
///   the value's source URL.
/// * `Err(Error)` describing the first problem found. No partial value is
///   ever produced.
///
/// # Errors
///
/// * [`Error::InvalidScheme`] if the input does not start with `data:`.
/// * [`Error::MalformedSeparator`] if the input does not contain exactly one
///   comma.
/// * [`Error::InvalidMediaType`] if the media type is not `type/subtype`.
/// * [`Error::MalformedParameter`] if a segment is neither `base64` nor an
///   `attribute=value` pair.
/// * [`Error::InvalidBase64`] if the `base64` flag is set and the data cannot
///   be decoded.
///
/// # Example
///
/// ```rust
/// # use data_uri::parse_data_uri;
/// let uri = parse_data_uri("data:image/png;base64,aGVsbG8").unwrap();
/// assert_eq!(uri.media_type(), "image/png");
/// assert_eq!(uri.payload(), b"hello");
/// ```
pub fn parse_data_uri(src: &str) -> Result<DataUri> {
    if !src.starts_with(SCHEME) {
        return Err(Error::InvalidScheme(0..src.len().min(SCHEME.len())));
    }
    let offset = SCHEME.len();
    let tokens = lex(&src[offset..], offset);

    let separator = find_separator(&tokens, src.len())?;
    let parameters_span = offset..separator.start;
    let data_span = separator.end..src.len();

    let segments = split_segments(&tokens, parameters_span);
    let (parameters, media_type_span) = merge_segments(src, &segments)?;

    let media_type = match parameters.get(MEDIATYPE) {
        Some(ParamValue::Text(s)) => s.clone(),
        Some(other) => return Err(Error::InvalidMediaType(other.to_string(), media_type_span)),
        None => return Err(Error::InvalidMediaType(String::new(), media_type_span)),
    };
    check_media_type(&media_type, media_type_span)?;

    let data = &src[data_span.clone()];
    let payload = if parameters.get(BASE64) == Some(&ParamValue::Flag(true)) {
        decode_base64url(data).ok_or(Error::InvalidBase64(data_span))?
    } else {
        data.as_bytes().to_vec()
    };

    Ok(DataUri::from_parts(media_type, parameters, payload, Some(src.to_string())))
}

//
// === Private Functions ===
//

/// One `;`-delimited piece of the parameter section.
struct Segment {
    span: Span,
    /// Position of the first `=` in the segment, if any.
    equals: Option<usize>,
}

/// Tokenizes `src`, shifting spans by `offset` so they index the full input.
fn lex(src: &str, offset: usize) -> Vec<(Token, Span)> {
    Token::lexer(src)
        .spanned()
        .map(|(token, span)| {
            (token.unwrap_or(Token::Text), span.start + offset..span.end + offset)
        })
        .collect()
}

fn find_separator(tokens: &[(Token, Span)], end: usize) -> Result<Span> {
    let commas: Vec<&Span> = tokens
        .iter()
        .filter(|(token, _)| *token == Token::Comma)
        .map(|(_, span)| span)
        .collect();
    match commas.as_slice() {
        [separator] => Ok((*separator).clone()),
        [] => Err(Error::MalformedSeparator(0, end..end)),
        [_, second, ..] => Err(Error::MalformedSeparator(commas.len(), (*second).clone())),
    }
}

fn split_segments(tokens: &[(Token, Span)], section: Span) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = section.start;
    let mut equals = None;
    for (token, span) in tokens.iter().take_while(|(_, span)| span.end <= section.end) {
        match token {
            Token::Semicolon => {
                segments.push(Segment { span: start..span.start, equals });
                start = span.end;
                equals = None;
            }
            Token::Equals => {
                equals.get_or_insert(span.start);
            }
            Token::Comma | Token::Text => {}
        }
    }
    segments.push(Segment { span: start..section.end, equals });
    segments
}

/// Folds the segments into one parameter bag, returning it along with the
/// span of whichever segment last set the media type.
fn merge_segments(src: &str, segments: &[Segment]) -> Result<(Parameters, Span)> {
    let mut parameters = Parameters::new();
    let mut media_type_span = Span::default();

    for (index, segment) in segments.iter().enumerate() {
        let text = &src[segment.span.clone()];
        if index == 0 {
            if text.is_empty() {
                parameters.extend(DataUri::default_parameters());
            } else if text.contains('/') {
                parameters.insert(MEDIATYPE.to_string(), text.into());
            } else {
                return Err(Error::InvalidMediaType(text.to_string(), segment.span.clone()));
            }
            media_type_span = segment.span.clone();
            continue;
        }

        if text == BASE64 {
            parameters.insert(BASE64.to_string(), ParamValue::Flag(true));
            continue;
        }
        let Some(equals) = segment.equals else {
            return Err(Error::MalformedParameter(text.to_string(), segment.span.clone()));
        };
        let attribute = &src[segment.span.start..equals];
        let value = &src[equals + 1..segment.span.end];
        if attribute == MEDIATYPE {
            media_type_span = equals + 1..segment.span.end;
        }
        parameters.insert(attribute.to_string(), value.into());
    }

    Ok((parameters, media_type_span))
}
