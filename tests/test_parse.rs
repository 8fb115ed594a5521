use data_uri::*;
use indoc::indoc;

fn params(pairs: &[(&str, ParamValue)]) -> Parameters {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn keys(uri: &DataUri) -> Vec<&str> {
    uri.parameters().keys().map(String::as_str).collect()
}

#[test]
fn test_default_expansion() {
    let uri = parse_data_uri("data:,hello").unwrap();
    assert_eq!(uri.media_type(), "text/plain");
    assert_eq!(uri.type_and_subtype(), ("text", "plain"));
    assert_eq!(
        uri.parameters(),
        &params(&[
            ("mediatype", "text/plain".into()),
            ("charset", "US-ASCII".into()),
        ])
    );
    assert_eq!(keys(&uri), vec!["mediatype", "charset"]);
    assert_eq!(uri.payload(), b"hello");
    assert_eq!(uri.source_url(), Some("data:,hello"));
    assert_eq!(uri.charset(), Some("US-ASCII"));
    assert!(!uri.is_base64());
}

#[test]
fn test_explicit_media_type_has_no_charset() {
    let uri = parse_data_uri("data:text/html,<p>hi</p>").unwrap();
    assert_eq!(uri.media_type(), "text/html");
    assert_eq!(uri.parameters(), &params(&[("mediatype", "text/html".into())]));
    assert_eq!(uri.charset(), None);
    assert_eq!(uri.payload_str(), Some("<p>hi</p>"));
}

#[test]
fn test_base64() {
    let uri = parse_data_uri("data:image/png;base64,aGVsbG8").unwrap();
    assert_eq!(uri.media_type(), "image/png");
    assert_eq!(uri.parameter("base64"), Some(&ParamValue::Flag(true)));
    assert!(uri.is_base64());
    assert_eq!(keys(&uri), vec!["mediatype", "base64"]);
    assert_eq!(uri.payload(), b"hello");

    // Padding is optional
    let padded = parse_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
    assert_eq!(padded.payload(), b"hello");

    // URL-safe and standard alphabets decode to the same bytes
    let url_safe = parse_data_uri("data:application/octet-stream;base64,-_8").unwrap();
    assert_eq!(url_safe.payload(), &[0xfb, 0xff]);
    let standard = parse_data_uri("data:application/octet-stream;base64,+/8=").unwrap();
    assert_eq!(standard.payload(), &[0xfb, 0xff]);

    // Empty payload
    let empty = parse_data_uri("data:image/gif;base64,").unwrap();
    assert!(empty.payload().is_empty());
}

#[test]
fn test_base64_with_value_is_an_ordinary_parameter() {
    let uri = parse_data_uri("data:text/plain;base64=yes,aGk").unwrap();
    assert_eq!(uri.parameter("base64"), Some(&ParamValue::Text("yes".to_string())));
    assert!(!uri.is_base64());
    assert_eq!(uri.payload(), b"aGk");
}

#[test]
fn test_invalid_base64() {
    let err = parse_data_uri("data:text/plain;base64,@@@").unwrap_err();
    assert_eq!(err, Error::InvalidBase64(23..26));
    assert_eq!(err.kind(), ErrorKind::InvalidBase64);
}

#[test]
fn test_parameters() {
    let uri = parse_data_uri("data:text/plain;charset=utf-8;name=a.txt,héllo").unwrap();
    assert_eq!(keys(&uri), vec!["mediatype", "charset", "name"]);
    assert_eq!(uri.charset(), Some("utf-8"));
    assert_eq!(uri.parameter("name"), Some(&ParamValue::Text("a.txt".to_string())));
    assert_eq!(uri.payload_str(), Some("héllo"));

    // Everything after the first '=' is the value
    let uri = parse_data_uri("data:text/plain;foo=a=b,x").unwrap();
    assert_eq!(uri.parameter("foo"), Some(&ParamValue::Text("a=b".to_string())));

    // Empty values are allowed
    let uri = parse_data_uri("data:text/plain;foo=,x").unwrap();
    assert_eq!(uri.parameter("foo"), Some(&ParamValue::Text(String::new())));

    // So are empty attribute names
    let uri = parse_data_uri("data:text/plain;=x,y").unwrap();
    assert_eq!(uri.parameter(""), Some(&ParamValue::Text("x".to_string())));
    assert_eq!(uri.payload(), b"y");

    // Delimiters after the separator belong to the payload
    let uri = parse_data_uri("data:text/plain,a;b=c").unwrap();
    assert_eq!(uri.payload(), b"a;b=c");
    assert_eq!(uri.parameters().len(), 1);
}

#[test]
fn test_last_write_wins() {
    // Overrides the defaulted charset, keeping its position
    let uri = parse_data_uri("data:;charset=utf-8,x").unwrap();
    assert_eq!(
        uri.parameters(),
        &params(&[
            ("mediatype", "text/plain".into()),
            ("charset", "utf-8".into()),
        ])
    );
    assert_eq!(keys(&uri), vec!["mediatype", "charset"]);

    let uri = parse_data_uri("data:text/plain;a=1;b=2;a=3,x").unwrap();
    assert_eq!(keys(&uri), vec!["mediatype", "a", "b"]);
    assert_eq!(uri.parameter("a"), Some(&ParamValue::Text("3".to_string())));

    // An explicit mediatype parameter replaces the first segment
    let uri = parse_data_uri("data:text/plain;mediatype=image/png,x").unwrap();
    assert_eq!(uri.media_type(), "image/png");
    assert_eq!(uri.parameter("mediatype"), Some(&ParamValue::Text("image/png".to_string())));
}

#[test]
fn test_from_str() {
    let uri: DataUri = "data:,x".parse().unwrap();
    assert_eq!(uri.payload(), b"x");
    assert!("x".parse::<DataUri>().is_err());
}

#[test]
fn test_invalid_scheme() {
    let err = parse_data_uri("text/plain,hi").unwrap_err();
    assert_eq!(err, Error::InvalidScheme(0..5));
    assert_eq!(err.kind(), ErrorKind::InvalidScheme);

    assert_eq!(parse_data_uri("dat").unwrap_err(), Error::InvalidScheme(0..3));
    assert_eq!(parse_data_uri("").unwrap_err(), Error::InvalidScheme(0..0));
    assert_eq!(
        parse_data_uri("DATA:,hi").unwrap_err().kind(),
        ErrorKind::InvalidScheme
    );
}

#[test]
fn test_malformed_separator() {
    let err = parse_data_uri("data:text/plain,a,b").unwrap_err();
    assert_eq!(err, Error::MalformedSeparator(2, 17..18));
    assert_eq!(err.kind(), ErrorKind::MalformedSeparator);

    let err = parse_data_uri("data:text/plain").unwrap_err();
    assert_eq!(err, Error::MalformedSeparator(0, 15..15));

    let err = parse_data_uri("data:").unwrap_err();
    assert_eq!(err, Error::MalformedSeparator(0, 5..5));

    let err = parse_data_uri("data:,,,").unwrap_err();
    assert_eq!(err, Error::MalformedSeparator(3, 6..7));
}

#[test]
fn test_invalid_media_type() {
    let err = parse_data_uri("data:textplain,x").unwrap_err();
    assert_eq!(err, Error::InvalidMediaType("textplain".to_string(), 5..14));
    assert_eq!(err.kind(), ErrorKind::InvalidMediaType);

    let err = parse_data_uri("data:a/b/c,x").unwrap_err();
    assert_eq!(err, Error::InvalidMediaType("a/b/c".to_string(), 5..10));

    let err = parse_data_uri("data:/plain,x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidMediaType);

    // A later mediatype parameter is checked too
    let err = parse_data_uri("data:text/plain;mediatype=png,x").unwrap_err();
    assert_eq!(err, Error::InvalidMediaType("png".to_string(), 26..29));
}

#[test]
fn test_malformed_parameter() {
    let err = parse_data_uri("data:text/plain;charset,x").unwrap_err();
    assert_eq!(err, Error::MalformedParameter("charset".to_string(), 16..23));
    assert_eq!(err.kind(), ErrorKind::MalformedParameter);

    // Empty segment
    let err = parse_data_uri("data:text/plain;,x").unwrap_err();
    assert_eq!(err, Error::MalformedParameter(String::new(), 16..16));

    // The flag is case-sensitive
    let err = parse_data_uri("data:text/plain;BASE64,aGk").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedParameter);
}

#[test]
fn test_full_message() {
    let src = "data:text/plain;charset,x";
    let err = parse_data_uri(src).unwrap_err();
    let expected = indoc! {"
        Malformed parameter 'charset', expected attribute=value or base64 (at byte 16)
        data:text/plain;charset,x
                        ^^^^^^^"};
    assert_eq!(err.full_message(src), expected);

    let src = "data:text/plain";
    let err = parse_data_uri(src).unwrap_err();
    let expected = indoc! {"
        Expected exactly one comma separating parameters from data, found 0 (at byte 15)
        data:text/plain
                       ^"};
    assert_eq!(err.full_message(src), expected);

    // Multi-byte characters take one column each
    let src = "data:téxt,x";
    let err = parse_data_uri(src).unwrap_err();
    assert_eq!(err, Error::InvalidMediaType("téxt".to_string(), 5..10));
    let expected = indoc! {"
        Invalid media type 'téxt', expected type/subtype (at byte 5)
        data:téxt,x
             ^^^^"};
    assert_eq!(err.full_message(src), expected);

    // Errors without a position render as the bare message
    let uri = DataUri::from_data("a,b", None, Parameters::new()).unwrap();
    let err = uri.compose().unwrap_err();
    assert_eq!(err.full_message("a,b"), err.to_string());
}
