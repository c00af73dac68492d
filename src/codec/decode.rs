use nom::error::{ErrorKind, ParseError};
use thiserror::Error;

use crate::{codec::LinkCodec, core::is_ows_char, link::links, types::Links};

/// An extended version of [`nom::IResult`].
pub(crate) type LinkResult<I, O> = Result<(I, O), nom::Err<LinkParseError<I>>>;

/// An extended version of [`nom::error::Error`].
#[derive(Debug)]
pub(crate) struct LinkParseError<I> {
    pub input: I,
    pub kind: LinkErrorKind,
}

/// An extended version of [`nom::error::ErrorKind`].
#[derive(Debug)]
pub(crate) enum LinkErrorKind {
    MissingOpeningBracket,
    MissingClosingBracket,
    UnexpectedCharacter(char),
    Nom(ErrorKind),
}

impl<I> LinkParseError<I> {
    pub(crate) fn failure(input: I, kind: LinkErrorKind) -> nom::Err<Self> {
        nom::Err::Failure(Self { input, kind })
    }
}

impl<I> ParseError<I> for LinkParseError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: LinkErrorKind::Nom(kind),
        }
    }

    fn append(input: I, kind: ErrorKind, _: Self) -> Self {
        Self {
            input,
            kind: LinkErrorKind::Nom(kind),
        }
    }
}

pub trait Decoder {
    type Message;
    type Error;

    fn decode(&self, input: &str) -> Result<Self::Message, Self::Error>;
}

/// Error returned when a header value isn't a list of `<...>` references.
///
/// Problems inside of parameters never lead to this error. Such parameters are kept as good as
/// possible instead.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
#[error("Malformed link header at byte {position}: {kind}")]
pub struct MalformedHeaderError {
    position: usize,
    kind: MalformedHeaderErrorKind,
}

impl MalformedHeaderError {
    /// Byte offset of the offending character in the decoded input.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn kind(&self) -> MalformedHeaderErrorKind {
        self.kind
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[non_exhaustive]
pub enum MalformedHeaderErrorKind {
    #[error("Expected `<`")]
    MissingOpeningBracket,
    #[error("Missing `>`")]
    MissingClosingBracket,
    #[error("Unexpected character {0:?}")]
    UnexpectedCharacter(char),
}

// -------------------------------------------------------------------------------------------------

impl Decoder for LinkCodec {
    type Message = Links;
    type Error = MalformedHeaderError;

    fn decode(&self, input: &str) -> Result<Self::Message, Self::Error> {
        let trimmed = input.trim_start_matches(is_ows_char);
        let leading = input.len() - trimmed.len();
        let trimmed = trimmed.trim_end_matches(is_ows_char);

        let position = |remaining: &str| leading + trimmed.len() - remaining.len();

        match links(trimmed, self.defaults()) {
            Ok((_, links)) => Ok(links),
            Err(nom::Err::Failure(error)) | Err(nom::Err::Error(error)) => {
                let kind = match error.kind {
                    LinkErrorKind::MissingOpeningBracket => {
                        MalformedHeaderErrorKind::MissingOpeningBracket
                    }
                    LinkErrorKind::MissingClosingBracket => {
                        MalformedHeaderErrorKind::MissingClosingBracket
                    }
                    LinkErrorKind::UnexpectedCharacter(character) => {
                        MalformedHeaderErrorKind::UnexpectedCharacter(character)
                    }
                    // Every grammar rule of `links` reports its own kind.
                    LinkErrorKind::Nom(kind) => {
                        log::debug!("Unclassified {kind:?} error at {:?}", error.input);
                        MalformedHeaderErrorKind::MissingOpeningBracket
                    }
                };

                Err(MalformedHeaderError {
                    position: position(error.input),
                    kind,
                })
            }
            // Only `streaming` parsers return `Incomplete`.
            Err(nom::Err::Incomplete(_)) => Err(MalformedHeaderError {
                position: leading + trimmed.len(),
                kind: MalformedHeaderErrorKind::MissingClosingBracket,
            }),
        }
    }
}
