//! These are the leaves of a parser tree. Each one honours the rollback contract on its own: a failed parse consumes
//! nothing and a failed print writes nothing.

use super::*;
use crate::input::Graphemes;
use core::marker::PhantomData;

/// See [`always`].
pub struct Always<T, I> {
    value: T,
    phantom: PhantomData<I>,
}

impl<T: Copy, I> Copy for Always<T, I> {}
impl<T: Clone, I> Clone for Always<T, I> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            phantom: PhantomData,
        }
    }
}

impl<T: Clone, I: Input> Parser<I> for Always<T, I> {
    type Output = T;

    #[inline]
    fn parse(&self, _input: &mut I) -> PResult<T> {
        Ok(self.value.clone())
    }
}

impl<T: Clone, I: Input> Printer<I> for Always<T, I> {
    #[inline]
    fn print(&self, _output: T, _buffer: &mut I::Buffer) -> PResult<()> {
        Ok(())
    }
}

/// A parser that consumes nothing and always succeeds with a copy of the given value. Printing writes nothing.
///
/// `always(())` is the zero-width separator that [`Parser::many`] uses by default.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let mut input = "abc";
/// assert_eq!(always::<_, &str>(42).parse(&mut input), Ok(42));
/// assert_eq!(input, "abc");
/// ```
pub fn always<T: Clone, I: Input>(value: T) -> Always<T, I> {
    Always {
        value,
        phantom: PhantomData,
    }
}

/// See [`end`].
pub struct End<I>(PhantomData<I>);

impl<I> Copy for End<I> {}
impl<I> Clone for End<I> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<I: Input> Parser<I> for End<I> {
    type Output = ();

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<()> {
        if input.is_empty() {
            Ok(())
        } else {
            Err(Error::Parse)
        }
    }
}

impl<I: Input> Printer<I> for End<I> {
    #[inline]
    fn print(&self, (): (), _buffer: &mut I::Buffer) -> PResult<()> {
        Ok(())
    }
}

/// A parser that accepts only the end of input.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// assert_eq!(end::<&str>().parse(&mut ""), Ok(()));
/// assert!(end::<&str>().parse(&mut "hello").is_err());
/// ```
pub fn end<I: Input>() -> End<I> {
    End(PhantomData)
}

/// See [`any`].
pub struct Any<I>(PhantomData<I>);

impl<I> Copy for Any<I> {}
impl<I> Clone for Any<I> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<I: Input> Parser<I> for Any<I> {
    type Output = I::Token;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<I::Token> {
        input.next_token().ok_or(Error::Parse)
    }
}

impl<I: Input> Printer<I> for Any<I> {
    #[inline]
    fn print(&self, output: I::Token, buffer: &mut I::Buffer) -> PResult<()> {
        I::write_token(buffer, output);
        Ok(())
    }
}

/// A parser that accepts any single token.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let mut input = "e\u{301}";
/// assert_eq!(any().parse(&mut input), Ok('e'));
///
/// let mut input = Graphemes::new("e\u{301}");
/// assert_eq!(any().parse(&mut input), Ok("e\u{301}"));
/// ```
pub fn any<I: Input>() -> Any<I> {
    Any(PhantomData)
}

/// A fixed sequence of tokens that [`just`] can match and print.
pub trait Literal<I: Input> {
    /// Remove the literal from the front of `input`, returning false (and leaving `input` alone) if it isn't there.
    fn strip(&self, input: &mut I) -> bool;

    /// Append the literal to `buffer`.
    fn write(&self, buffer: &mut I::Buffer);
}

impl<'a, 'b> Literal<&'a str> for &'b str {
    fn strip(&self, input: &mut &'a str) -> bool {
        match input.strip_prefix(*self) {
            Some(rest) => {
                *input = rest;
                true
            }
            None => false,
        }
    }

    fn write(&self, buffer: &mut String) {
        buffer.push_str(self);
    }
}

impl<'a> Literal<&'a str> for char {
    fn strip(&self, input: &mut &'a str) -> bool {
        match input.strip_prefix(*self) {
            Some(rest) => {
                *input = rest;
                true
            }
            None => false,
        }
    }

    fn write(&self, buffer: &mut String) {
        buffer.push(*self);
    }
}

impl<'a, 'b> Literal<&'a [u8]> for &'b [u8] {
    fn strip(&self, input: &mut &'a [u8]) -> bool {
        match input.strip_prefix(*self) {
            Some(rest) => {
                *input = rest;
                true
            }
            None => false,
        }
    }

    fn write(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self);
    }
}

impl<'a, 'b> Literal<&'a [u8]> for &'b str {
    fn strip(&self, input: &mut &'a [u8]) -> bool {
        self.as_bytes().strip(input)
    }

    fn write(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self.as_bytes());
    }
}

impl<'a, 'b, const N: usize> Literal<&'a [u8]> for &'b [u8; N] {
    fn strip(&self, input: &mut &'a [u8]) -> bool {
        (&self[..]).strip(input)
    }

    fn write(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self[..]);
    }
}

impl<'a, const N: usize> Literal<&'a [u8]> for [u8; N] {
    fn strip(&self, input: &mut &'a [u8]) -> bool {
        (&self[..]).strip(input)
    }

    fn write(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self);
    }
}

impl<'a> Literal<&'a [u8]> for u8 {
    fn strip(&self, input: &mut &'a [u8]) -> bool {
        (&[*self][..]).strip(input)
    }

    fn write(&self, buffer: &mut Vec<u8>) {
        buffer.push(*self);
    }
}

// A literal only matches whole graphemes: "e" must not match the start of "e\u{301}".
impl<'a, 'b> Literal<Graphemes<'a>> for &'b str {
    fn strip(&self, input: &mut Graphemes<'a>) -> bool {
        match input.as_str().strip_prefix(*self) {
            Some(rest) if input.is_boundary(self.len()) => {
                *input = Graphemes::new(rest);
                true
            }
            _ => false,
        }
    }

    fn write(&self, buffer: &mut String) {
        buffer.push_str(self);
    }
}

#[cfg(feature = "bytes")]
impl<'b> Literal<bytes::Bytes> for &'b [u8] {
    fn strip(&self, input: &mut bytes::Bytes) -> bool {
        if input.starts_with(self) {
            bytes::Buf::advance(input, self.len());
            true
        } else {
            false
        }
    }

    fn write(&self, buffer: &mut bytes::BytesMut) {
        buffer.extend_from_slice(self);
    }
}

#[cfg(feature = "bytes")]
impl<'b> Literal<bytes::Bytes> for &'b str {
    fn strip(&self, input: &mut bytes::Bytes) -> bool {
        self.as_bytes().strip(input)
    }

    fn write(&self, buffer: &mut bytes::BytesMut) {
        buffer.extend_from_slice(self.as_bytes());
    }
}

/// See [`just`].
pub struct Just<T, I> {
    literal: T,
    phantom: PhantomData<I>,
}

impl<T: Copy, I> Copy for Just<T, I> {}
impl<T: Clone, I> Clone for Just<T, I> {
    fn clone(&self) -> Self {
        Self {
            literal: self.literal.clone(),
            phantom: PhantomData,
        }
    }
}

impl<T: Literal<I>, I: Input> Parser<I> for Just<T, I> {
    type Output = ();

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<()> {
        if self.literal.strip(input) {
            Ok(())
        } else {
            Err(Error::Parse)
        }
    }
}

impl<T: Literal<I>, I: Input> Printer<I> for Just<T, I> {
    #[inline]
    fn print(&self, (): (), buffer: &mut I::Buffer) -> PResult<()> {
        self.literal.write(buffer);
        Ok(())
    }
}

/// A parser that accepts only the given literal, and prints it back.
///
/// Text inputs accept `&str` and [`char`] literals, byte inputs accept `&str`, `&[u8]`, byte arrays and single
/// bytes, and [`Graphemes`] accepts `&str` literals that end on a grapheme boundary.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let get = just::<_, &[u8]>("GET");
///
/// let mut input = &b"GET /"[..];
/// assert_eq!(get.parse(&mut input), Ok(()));
/// assert_eq!(input, b" /");
/// assert_eq!(get.print_to_buffer(()), Ok(b"GET".to_vec()));
/// ```
pub fn just<T: Literal<I>, I: Input>(literal: T) -> Just<T, I> {
    Just {
        literal,
        phantom: PhantomData,
    }
}

/// See [`take_while`].
pub struct TakeWhile<F, I> {
    predicate: F,
    at_least: usize,
    at_most: usize,
    phantom: PhantomData<I>,
}

impl<F: Copy, I> Copy for TakeWhile<F, I> {}
impl<F: Clone, I> Clone for TakeWhile<F, I> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            at_least: self.at_least,
            at_most: self.at_most,
            phantom: PhantomData,
        }
    }
}

impl<F, I> TakeWhile<F, I> {
    /// Require at least `at_least` tokens to match.
    ///
    /// A `take_while` that may match nothing always succeeds, which makes it a poor element for
    /// [`Many`]: requiring at least one token guarantees progress.
    pub fn at_least(self, at_least: usize) -> Self {
        assert!(
            at_least <= self.at_most,
            "take_while requires at_least <= at_most"
        );
        Self { at_least, ..self }
    }

    /// Stop after at most `at_most` tokens.
    pub fn at_most(self, at_most: usize) -> Self {
        assert!(
            self.at_least <= at_most,
            "take_while requires at_least <= at_most"
        );
        Self { at_most, ..self }
    }
}

impl<F, I> Parser<I> for TakeWhile<F, I>
where
    I: Input,
    F: Fn(&I::Token) -> bool,
{
    type Output = I::Slice;

    fn parse(&self, input: &mut I) -> PResult<I::Slice> {
        let before = input.clone();
        let mut count = 0;
        while count < self.at_most {
            let mut ahead = input.clone();
            match ahead.next_token() {
                Some(token) if (self.predicate)(&token) => {
                    *input = ahead;
                    count += 1;
                }
                _ => break,
            }
        }
        if count < self.at_least {
            *input = before;
            return Err(Error::Parse);
        }
        Ok(input.consumed_since(&before))
    }
}

impl<F, I> Printer<I> for TakeWhile<F, I>
where
    I: Input,
    F: Fn(&I::Token) -> bool,
{
    fn print(&self, output: I::Slice, buffer: &mut I::Buffer) -> PResult<()> {
        let mut tokens = I::from_slice(output.clone());
        let mut count = 0;
        while let Some(token) = tokens.next_token() {
            if !(self.predicate)(&token) {
                return Err(Error::Print);
            }
            count += 1;
        }
        if count < self.at_least || count > self.at_most {
            return Err(Error::Print);
        }
        I::write_slice(buffer, &output);
        Ok(())
    }
}

/// A parser that accepts the longest run of tokens matching a predicate, producing the matched slice.
///
/// By default the run may be empty. Printing checks that every token of the slice matches the predicate (and that
/// its length is within bounds) before writing it, so a printer never emits something it couldn't parse back.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let digits = take_while::<_, &str>(|c: &char| c.is_ascii_digit()).at_least(1);
///
/// let mut input = "123abc";
/// assert_eq!(digits.parse(&mut input), Ok("123"));
/// assert_eq!(input, "abc");
///
/// assert!(digits.parse(&mut input).is_err());
/// assert!(digits.print_to_buffer("12a").is_err());
/// ```
pub fn take_while<F, I>(predicate: F) -> TakeWhile<F, I>
where
    I: Input,
    F: Fn(&I::Token) -> bool,
{
    TakeWhile {
        predicate,
        at_least: 0,
        at_most: usize::MAX,
        phantom: PhantomData,
    }
}

/// See [`newline`].
pub struct Newline<I>(PhantomData<I>);

impl<I> Copy for Newline<I> {}
impl<I> Clone for Newline<I> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<I> Parser<I> for Newline<I>
where
    I: Input,
    &'static str: Literal<I>,
{
    type Output = ();

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<()> {
        if "\r\n".strip(input) || "\n".strip(input) {
            Ok(())
        } else {
            Err(Error::Parse)
        }
    }
}

impl<I> Printer<I> for Newline<I>
where
    I: Input,
    &'static str: Literal<I>,
{
    #[inline]
    fn print(&self, (): (), buffer: &mut I::Buffer) -> PResult<()> {
        "\n".write(buffer);
        Ok(())
    }
}

/// A parser that accepts a line ending, either `"\n"` or `"\r\n"`. Printing always writes `"\n"`.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let line = take_while::<_, &str>(|c: &char| *c != '\r' && *c != '\n').then_ignore(newline());
///
/// assert_eq!(line.parse_all("hello\r\n"), Ok("hello"));
/// assert_eq!(line.parse_all("hello\n"), Ok("hello"));
/// assert_eq!(line.print_to_buffer("hello"), Ok("hello\n".to_string()));
/// ```
pub fn newline<I>() -> Newline<I>
where
    I: Input,
    &'static str: Literal<I>,
{
    Newline(PhantomData)
}
