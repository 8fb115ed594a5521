//! # Data URI Parser and Composer
//!
//! This crate provides tools for parsing and composing
//! [RFC 2397](https://datatracker.ietf.org/doc/html/rfc2397) `data:` URIs,
//! which embed small resources such as images or text blobs inline in a
//! string:
//!
//! ```text
//! data:[<mediatype>][;<attribute>=<value>...][;base64],<data>
//! ```
//!
//! It is intended for validating and decomposing values submitted by users
//! (form fields, JSON payloads) before they are stored or rendered. The whole
//! payload is held in memory, so callers should bound the input length before
//! parsing.
//!
//! The primary functions provided are:
//!
//! - `parse_data_uri`: Parses a string into a `DataUri`.
//! - `DataUri::from_data`: Builds a `DataUri` from a payload and a media type
//!   without parsing.
//! - `compose_data_uri`: Composes a `DataUri` back into its wire form.
//!
//! | Input                                 | Media type   | Parameters                                      | Payload     |
//! | ------------------------------------- | ------------ | ----------------------------------------------- | ----------- |
//! | `data:,hello`                         | `text/plain` | `mediatype=text/plain`<br>`charset=US-ASCII`    | `hello`     |
//! | `data:text/html,<p>hi</p>`            | `text/html`  | `mediatype=text/html`                           | `<p>hi</p>` |
//! | `data:text/plain;charset=utf-8,héllo` | `text/plain` | `mediatype=text/plain`<br>`charset=utf-8`       | `héllo`     |
//! | `data:image/png;base64,aGVsbG8`       | `image/png`  | `mediatype=image/png`<br>`base64=true`          | `hello`     |
//!
//! ## Base64 Payloads
//!
//! When the bare `base64` flag segment is present the data section is decoded
//! as base64url (`-` and `_` in place of `+` and `/`), with or without
//! padding. Composing always writes unpadded base64url. Payloads without the
//! flag are taken verbatim; percent-encoding is not interpreted.
//!
//! ## Validation Rules
//!
//! With the default `rules` feature the [`rules`] module provides named
//! validation predicates (data URI checks, presence checks, uniqueness
//! checks) for use by a host validation engine.

mod error;
pub use error::{ Error, ErrorKind, Result };

mod token;
pub(crate) use token::Token;

mod codec;

mod data_uri;
pub use data_uri::{
    BASE64,
    CHARSET,
    DEFAULT_CHARSET,
    DEFAULT_MEDIA_TYPE,
    DataUri,
    MEDIATYPE,
    ParamValue,
    Parameters,
    SCHEME,
};

mod parse;
pub use parse::parse_data_uri;

mod compose;
pub use compose::compose_data_uri;

#[cfg(feature = "rules")]
pub mod rules;
