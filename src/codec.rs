pub mod decode;
pub mod encode;

use crate::types::ParamDefaults;

/// Codec for `Link` header values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
// We use `#[non_exhaustive]` to prevent users from using struct literal syntax.
//
// This allows to add configuration options later.
#[non_exhaustive]
pub struct LinkCodec {
    defaults: ParamDefaults,
}

impl LinkCodec {
    /// Create codec with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create codec that tags parameters without explicit metadata with `defaults`.
    pub fn with_defaults(defaults: ParamDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ParamDefaults {
        &self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decode::Decoder,
        testing::kat_inverse_links,
        types::{Link, Links, Param},
    };

    fn link(uri: &str, params: &[(&str, Param)]) -> Link {
        Link::new(
            uri,
            params
                .iter()
                .map(|(name, param)| (name.to_string(), param.clone()))
                .collect(),
        )
    }

    fn plain(value: &str) -> Param {
        Param::new(value, "us-ascii", "en-us")
    }

    #[test]
    fn test_kat_inverse_links() {
        kat_inverse_links(&[
            ("", Links::default()),
            (
                r#"<http://example.com/foo>; rel="bar""#,
                Links::new(vec![link(
                    "http://example.com/foo",
                    &[("rel", plain("bar"))],
                )]),
            ),
            (
                r#"<a>; rel="first", <b>; rel="second""#,
                Links::new(vec![
                    link("a", &[("rel", plain("first"))]),
                    link("b", &[("rel", plain("second"))]),
                ]),
            ),
            (
                "<https://example.com/?page=2>",
                Links::new(vec![link("https://example.com/?page=2", &[])]),
            ),
            (
                r#"<x>; title="say \"hi\"", <y>; title*=UTF-8'de'%E2%9C%93; rel=next"#,
                Links::new(vec![
                    link("x", &[("title", plain(r#"say "hi""#))]),
                    link(
                        "y",
                        &[
                            ("title", Param::new("✓", "UTF-8", "de")),
                            ("rel", plain("next")),
                        ],
                    ),
                ]),
            ),
            (
                "<s>; title**=x",
                Links::new(vec![link("s", &[("title*", plain("x"))])]),
            ),
            (
                "<z>; noequals",
                Links::new(vec![link("z", &[("noequals", plain(""))])]),
            ),
        ]);
    }

    #[test]
    fn test_codec_defaults() {
        let codec = LinkCodec::with_defaults(ParamDefaults {
            encoding: "utf-8".into(),
            language: "de".into(),
        });

        let links = codec.decode(r#"<a>; rel="next"; title*=%C3%A4"#).unwrap();

        let rel = links[0].param("rel").unwrap();
        assert_eq!(rel.encoding(), "utf-8");
        assert_eq!(rel.language(), "de");

        let title = links[0].param("title").unwrap();
        assert_eq!(title.value(), "ä");
        assert_eq!(title.encoding(), "utf-8");
        assert_eq!(title.language(), "de");

        assert_eq!(LinkCodec::new().defaults(), &ParamDefaults::default());
    }
}
