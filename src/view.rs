//! *"I can't explain myself, I'm afraid, sir," said Alice, "because I'm not myself, you see."*
//!
//! The same text can be parsed as graphemes ([`Graphemes`]), as Unicode scalars (`&str`) or as UTF-8 bytes
//! (`&[u8]`). Coarser views are easier to get right (a grapheme parser never splits an accent from its letter) while
//! finer ones are faster. These adapters let a parser written for one view run inside a parser for another, so that
//! each part of a format can be parsed at the level that suits it.
//!
//! | Adapter                | Wrapped parser runs on | Adapter runs on | Method                                  |
//! |------------------------|------------------------|-----------------|-----------------------------------------|
//! | [`GraphemesToChars`]   | [`Graphemes`]          | `&str`          | [`GraphemeParserExt::unicode_scalars`]  |
//! | [`GraphemesToBytes`]   | [`Graphemes`]          | `&[u8]`         | [`GraphemeParserExt::utf8`]             |
//! | [`CharsToBytes`]       | `&str`                 | `&[u8]`         | [`CharParserExt::utf8`]                 |
//! | [`BytesToGraphemes`]   | `&[u8]`                | [`Graphemes`]   | [`ByteParserExt::graphemes`]            |
//! | [`BytesToChars`]       | `&[u8]`                | `&str`          | [`ByteParserExt::unicode_scalars`]      |
//!
//! # Performance
//!
//! Running a text parser on bytes has to check that the remaining bytes are valid UTF-8 first, which costs time
//! proportional to the *whole remaining input* on every call. Inside a [`Many`] that is quadratic: prefer converting
//! once, around the outermost parser, to converting once per element.
//!
//! A byte parser that stops in the middle of a UTF-8 sequence can't hand its leftover back to a text view. When that
//! happens the adapter fails and leaves the input as it was.

use super::*;
use crate::input::Graphemes;

/// The longest prefix of `bytes` that is valid UTF-8.
fn valid_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

/// A parser over [`Graphemes`], adapted to run on `&str`. See [`GraphemeParserExt::unicode_scalars`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphemesToChars<P> {
    upstream: P,
}

impl<P> GraphemesToChars<P> {
    /// Adapt `upstream` to run on `&str`.
    pub fn new(upstream: P) -> Self {
        Self { upstream }
    }
}

impl<'a, P> Parser<&'a str> for GraphemesToChars<P>
where
    P: Parser<Graphemes<'a>>,
{
    type Output = P::Output;

    #[inline]
    fn parse(&self, input: &mut &'a str) -> PResult<P::Output> {
        let mut graphemes = Graphemes::new(*input);
        let result = self.upstream.parse(&mut graphemes);
        *input = graphemes.as_str();
        result
    }
}

impl<'a, P> Printer<&'a str> for GraphemesToChars<P>
where
    P: Printer<Graphemes<'a>>,
{
    #[inline]
    fn print(&self, output: P::Output, buffer: &mut String) -> PResult<()> {
        self.upstream.print(output, buffer)
    }
}

/// A parser over [`Graphemes`], adapted to run on UTF-8 bytes. See [`GraphemeParserExt::utf8`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphemesToBytes<P> {
    upstream: P,
}

impl<P> GraphemesToBytes<P> {
    /// Adapt `upstream` to run on `&[u8]`.
    pub fn new(upstream: P) -> Self {
        Self { upstream }
    }
}

impl<'a, P> Parser<&'a [u8]> for GraphemesToBytes<P>
where
    P: Parser<Graphemes<'a>>,
{
    type Output = P::Output;

    fn parse(&self, input: &mut &'a [u8]) -> PResult<P::Output> {
        let bytes = *input;
        let text = valid_prefix(bytes);
        let mut graphemes = Graphemes::new(text);
        let result = self.upstream.parse(&mut graphemes);
        *input = &bytes[text.len() - graphemes.len()..];
        result
    }
}

impl<'a, P> Printer<&'a [u8]> for GraphemesToBytes<P>
where
    P: Printer<Graphemes<'a>>,
{
    fn print(&self, output: P::Output, buffer: &mut Vec<u8>) -> PResult<()> {
        let mut scratch = String::new();
        self.upstream.print(output, &mut scratch)?;
        buffer.extend_from_slice(scratch.as_bytes());
        Ok(())
    }
}

/// A parser over `&str`, adapted to run on UTF-8 bytes. See [`CharParserExt::utf8`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharsToBytes<P> {
    upstream: P,
}

impl<P> CharsToBytes<P> {
    /// Adapt `upstream` to run on `&[u8]`.
    pub fn new(upstream: P) -> Self {
        Self { upstream }
    }
}

impl<'a, P> Parser<&'a [u8]> for CharsToBytes<P>
where
    P: Parser<&'a str>,
{
    type Output = P::Output;

    fn parse(&self, input: &mut &'a [u8]) -> PResult<P::Output> {
        let bytes = *input;
        let text = valid_prefix(bytes);
        let mut rest = text;
        let result = self.upstream.parse(&mut rest);
        *input = &bytes[text.len() - rest.len()..];
        result
    }
}

impl<'a, P> Printer<&'a [u8]> for CharsToBytes<P>
where
    P: Printer<&'a str>,
{
    fn print(&self, output: P::Output, buffer: &mut Vec<u8>) -> PResult<()> {
        let mut scratch = String::new();
        self.upstream.print(output, &mut scratch)?;
        buffer.extend_from_slice(scratch.as_bytes());
        Ok(())
    }
}

/// A parser over UTF-8 bytes, adapted to run on [`Graphemes`]. See [`ByteParserExt::graphemes`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BytesToGraphemes<P> {
    upstream: P,
}

impl<P> BytesToGraphemes<P> {
    /// Adapt `upstream` to run on [`Graphemes`].
    pub fn new(upstream: P) -> Self {
        Self { upstream }
    }
}

impl<'a, P> Parser<Graphemes<'a>> for BytesToGraphemes<P>
where
    P: Parser<&'a [u8]>,
{
    type Output = P::Output;

    fn parse(&self, input: &mut Graphemes<'a>) -> PResult<P::Output> {
        let text = input.as_str();
        let mut bytes = text.as_bytes();
        let result = self.upstream.parse(&mut bytes);
        match text.get(text.len() - bytes.len()..) {
            Some(rest) => {
                *input = Graphemes::new(rest);
                result
            }
            // The leftover starts mid-scalar and has no text form, so even a successful output is dropped.
            None => Err(Error::Parse),
        }
    }
}

impl<'a, P> Printer<Graphemes<'a>> for BytesToGraphemes<P>
where
    P: Printer<&'a [u8]>,
{
    fn print(&self, output: P::Output, buffer: &mut String) -> PResult<()> {
        let mut scratch = Vec::new();
        self.upstream.print(output, &mut scratch)?;
        let text = String::from_utf8(scratch).map_err(|_| Error::Print)?;
        buffer.push_str(&text);
        Ok(())
    }
}

/// A parser over UTF-8 bytes, adapted to run on `&str`. See [`ByteParserExt::unicode_scalars`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BytesToChars<P> {
    upstream: P,
}

impl<P> BytesToChars<P> {
    /// Adapt `upstream` to run on `&str`.
    pub fn new(upstream: P) -> Self {
        Self { upstream }
    }
}

impl<'a, P> Parser<&'a str> for BytesToChars<P>
where
    P: Parser<&'a [u8]>,
{
    type Output = P::Output;

    fn parse(&self, input: &mut &'a str) -> PResult<P::Output> {
        let text = *input;
        let mut bytes = text.as_bytes();
        let result = self.upstream.parse(&mut bytes);
        match text.get(text.len() - bytes.len()..) {
            Some(rest) => {
                *input = rest;
                result
            }
            // The leftover starts mid-scalar and has no text form, so even a successful output is dropped.
            None => Err(Error::Parse),
        }
    }
}

impl<'a, P> Printer<&'a str> for BytesToChars<P>
where
    P: Printer<&'a [u8]>,
{
    fn print(&self, output: P::Output, buffer: &mut String) -> PResult<()> {
        let mut scratch = Vec::new();
        self.upstream.print(output, &mut scratch)?;
        let text = String::from_utf8(scratch).map_err(|_| Error::Print)?;
        buffer.push_str(&text);
        Ok(())
    }
}

/// Methods for running a grapheme parser on finer-grained views of the same text.
pub trait GraphemeParserExt<'a>: Parser<Graphemes<'a>> + Sized {
    /// Run this parser on `&str`.
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let letter = any::<Graphemes>().unicode_scalars();
    ///
    /// let mut input = "e\u{301}t\u{e9}";
    /// assert_eq!(letter.parse(&mut input), Ok("e\u{301}"));
    /// assert_eq!(input, "t\u{e9}");
    /// ```
    fn unicode_scalars(self) -> GraphemesToChars<Self> {
        GraphemesToChars::new(self)
    }

    /// Run this parser on UTF-8 bytes.
    fn utf8(self) -> GraphemesToBytes<Self> {
        GraphemesToBytes::new(self)
    }
}

impl<'a, P: Parser<Graphemes<'a>>> GraphemeParserExt<'a> for P {}

/// Methods for running a `&str` parser on UTF-8 bytes.
pub trait CharParserExt<'a>: Parser<&'a str> + Sized {
    /// Run this parser on UTF-8 bytes.
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let name = text::ident::<&str>().utf8();
    ///
    /// let mut input = "caf\u{e9} au lait".as_bytes();
    /// assert_eq!(name.parse(&mut input), Ok("caf\u{e9}"));
    /// assert_eq!(input, b" au lait");
    /// assert_eq!(name.print_to_buffer("na\u{ef}ve"), Ok("na\u{ef}ve".as_bytes().to_vec()));
    /// ```
    fn utf8(self) -> CharsToBytes<Self> {
        CharsToBytes::new(self)
    }
}

impl<'a, P: Parser<&'a str>> CharParserExt<'a> for P {}

/// Methods for running a byte parser on coarser views of the same text.
pub trait ByteParserExt<'a>: Parser<&'a [u8]> + Sized {
    /// Run this parser on [`Graphemes`].
    fn graphemes(self) -> BytesToGraphemes<Self> {
        BytesToGraphemes::new(self)
    }

    /// Run this parser on `&str`.
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let digits = take_while::<_, &[u8]>(u8::is_ascii_digit).unicode_scalars();
    ///
    /// let mut input = "42\u{b0}C";
    /// assert_eq!(digits.parse(&mut input), Ok(&b"42"[..]));
    /// assert_eq!(input, "\u{b0}C");
    /// ```
    fn unicode_scalars(self) -> BytesToChars<Self> {
        BytesToChars::new(self)
    }
}

impl<'a, P: Parser<&'a [u8]>> ByteParserExt<'a> for P {}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn valid_prefix_stops_at_invalid_bytes() {
        assert_eq!(super::valid_prefix(b"ok\xffno"), "ok");
        assert_eq!(super::valid_prefix(b"\xe2\x82"), "");
        assert_eq!(super::valid_prefix("\u{20ac}".as_bytes()), "\u{20ac}");
    }

    #[test]
    fn byte_parser_is_transparent_on_text() {
        let digits = take_while::<_, &[u8]>(u8::is_ascii_digit).at_least(1);

        let mut bytes = &b"123abc"[..];
        let mut text = "123abc";
        assert_eq!(digits.parse(&mut bytes), Ok(&b"123"[..]));
        assert_eq!(digits.unicode_scalars().parse(&mut text), Ok(&b"123"[..]));
        assert_eq!(bytes, text.as_bytes());

        assert_eq!(digits.unicode_scalars().print_to_buffer(&b"7"[..]), Ok("7".to_string()));
    }

    #[test]
    fn byte_parser_stopping_mid_scalar_fails() {
        let mut input = "\u{e9}t\u{e9}";
        assert_eq!(any::<&[u8]>().unicode_scalars().parse(&mut input), Err(Error::Parse));
        assert_eq!(input, "\u{e9}t\u{e9}");

        let mut input = Graphemes::new("\u{e9}");
        assert_eq!(any::<&[u8]>().graphemes().parse(&mut input), Err(Error::Parse));
        assert_eq!(input.as_str(), "\u{e9}");
    }

    #[test]
    fn invalid_utf8_is_unprintable_as_text() {
        assert_eq!(any::<&[u8]>().unicode_scalars().print_to_buffer(0xC3), Err(Error::Print));
        assert_eq!(any::<&[u8]>().graphemes().print_to_buffer(b'a'), Ok("a".to_string()));
    }

    #[test]
    fn grapheme_parser_on_bytes() {
        let accented = just::<_, Graphemes>("e\u{301}").utf8();

        let mut input = "e\u{301}x".as_bytes();
        assert_eq!(accented.parse(&mut input), Ok(()));
        assert_eq!(input, b"x");

        let mut input = "e".as_bytes();
        assert_eq!(accented.parse(&mut input), Err(Error::Parse));
        assert_eq!(input, b"e");

        assert_eq!(accented.print_to_buffer(()), Ok("e\u{301}".as_bytes().to_vec()));
    }

    #[test]
    fn text_parser_on_invalid_bytes() {
        let word = text::ident::<&str>().utf8();

        let mut input = &b"ab\xffcd"[..];
        assert_eq!(word.parse(&mut input), Ok("ab"));
        assert_eq!(input, b"\xffcd");
        assert_eq!(word.parse(&mut input), Err(Error::Parse));
        assert_eq!(input, b"\xffcd");
    }

    #[test]
    fn grapheme_parser_on_scalars_prints_directly() {
        let cluster = any::<Graphemes>().unicode_scalars();

        let mut buffer = String::from("a");
        assert_eq!(cluster.print("\u{1f1eb}\u{1f1f7}", &mut buffer), Ok(()));
        assert_eq!(buffer, "a\u{1f1eb}\u{1f1f7}");
    }
}
