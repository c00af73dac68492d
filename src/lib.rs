//! # HTTP Link Header Library
//!
//! web-links parses (and serializes) the value of an HTTP `Link` header ([RFC 5988]) into a list
//! of links. Each link consists of a target reference and a set of named parameters.
//! Clients use it to follow pagination links (`rel="next"`, `rel="prev"`, ...) without
//! re-parsing raw header text themselves.
//!
//! ## Example
//!
//! ```rust
//! let links = web_links::parse(
//!     r#"<https://example.com/page2>; rel="next", <https://example.com/page1>; rel="prev""#,
//! )
//! .unwrap();
//!
//! assert_eq!(links.len(), 2);
//! assert_eq!(links[0].uri(), "https://example.com/page2");
//!
//! let map = links.map();
//! assert_eq!(map["prev"].uri(), "https://example.com/page1");
//! ```
//!
//! ## Decoding
//!
//! Parsing is implemented through the [`Decoder`](crate::decode::Decoder) trait, implemented by
//! [`LinkCodec`]. [`parse`] is a shorthand for decoding with the default configuration.
//! Only the value portion of the header is accepted, i.e., without `Link:`.
//!
//! Decoding is best effort. Only headers that aren't a list of `<...>` references are rejected with
//! a [`MalformedHeaderError`]. Problems inside of parameters are rectified:
//!
//! * a parameter without `=` is kept with an empty value,
//! * an extended value (`title*=UTF-8'en'%E2%9C%93`) that fails to percent-decode is kept encoded,
//! * a value that is not a valid quoted string is kept as written.
//!
//! Extended parameters ([RFC 2231]) are returned under their name without the trailing `*`.
//! Multipart parameters are not reassembled.
//!
//! ## Encoding
//!
//! The [`Encoder`](crate::encode::Encoder) trait turns [`Links`] back into a header value.
//!
//! # Features
//!
//! | Feature             | Description                                               | Enabled by default |
//! |---------------------|-----------------------------------------------------------|--------------------|
//! | quirk_plus_as_space | Decode `+` as a space in extended values (via `quirk`).   | Yes                |
//! | serde               | Derive `serde`s `Serialize` and `Deserialize` implementations. | No            |
//!
//! [RFC 5988]: https://datatracker.ietf.org/doc/html/rfc5988
//! [RFC 2231]: https://datatracker.ietf.org/doc/html/rfc2231

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Test examples from README.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

mod codec;
mod core;
mod link;
#[cfg(test)]
mod testing;
pub mod types;

pub use codec::*;
pub use codec::decode::{MalformedHeaderError, MalformedHeaderErrorKind};
pub use types::{Link, Links, Param, ParamDefaults, DEFAULT_ENCODING, DEFAULT_LANGUAGE};

use crate::decode::Decoder;

/// Parse the value of a `Link` header with the default configuration.
///
/// See [`LinkCodec`] for a configurable version.
pub fn parse(input: &str) -> Result<Links, MalformedHeaderError> {
    LinkCodec::new().decode(input)
}
