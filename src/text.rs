//! *"'Twas brillig, and the slithy toves did gyre and gimble in the wabe."*
//!
//! The parsers in this module are generic over both Unicode scalar ([`char`]) and byte ([`u8`]) tokens, so the same
//! parser works on `&str` and `&[u8]` inputs. Byte inputs follow ASCII rules.

use super::*;
use core::{fmt::Display, marker::PhantomData, str::FromStr};

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for char {}
}

/// A trait implemented by textual character types (currently, [`u8`] and [`char`]).
///
/// Avoid implementing this trait yourself if you can: it's *very* likely to be expanded in future versions!
pub trait Char: private::Sealed + Copy + PartialEq {
    /// Returns this character as a [`char`].
    fn to_char(&self) -> char;

    /// Convert a [`char`] into this character type, if it can be represented.
    fn from_char(c: char) -> Option<Self>;

    /// Returns true if the character is canonically considered to be a numeric digit.
    fn is_digit(&self, radix: u32) -> bool;

    /// Returns true if the character is canonically considered to be whitespace.
    fn is_whitespace(&self) -> bool;

    /// Returns true if the character is whitespace that doesn't end a line (a space or a tab, for example).
    fn is_inline_whitespace(&self) -> bool;

    /// Returns true if the character may begin an identifier.
    fn is_ident_start(&self) -> bool;

    /// Returns true if the character may appear after the first character of an identifier.
    fn is_ident_continue(&self) -> bool;
}

impl Char for u8 {
    fn to_char(&self) -> char {
        *self as char
    }
    fn from_char(c: char) -> Option<Self> {
        u8::try_from(c).ok().filter(u8::is_ascii)
    }
    fn is_digit(&self, radix: u32) -> bool {
        (*self as char).is_digit(radix)
    }
    fn is_whitespace(&self) -> bool {
        self.is_ascii_whitespace()
    }
    fn is_inline_whitespace(&self) -> bool {
        *self == b' ' || *self == b'\t'
    }
    fn is_ident_start(&self) -> bool {
        self.is_ascii_alphabetic() || *self == b'_'
    }
    fn is_ident_continue(&self) -> bool {
        self.is_ascii_alphanumeric() || *self == b'_'
    }
}

impl Char for char {
    fn to_char(&self) -> char {
        *self
    }
    fn from_char(c: char) -> Option<Self> {
        Some(c)
    }
    fn is_digit(&self, radix: u32) -> bool {
        char::is_digit(*self, radix)
    }
    fn is_whitespace(&self) -> bool {
        char::is_whitespace(*self)
    }
    fn is_inline_whitespace(&self) -> bool {
        char::is_whitespace(*self)
            && !matches!(
                self,
                '\n' | '\r' | '\x0B' | '\x0C' | '\u{85}' | '\u{2028}' | '\u{2029}'
            )
    }
    fn is_ident_start(&self) -> bool {
        unicode_ident::is_xid_start(*self) || *self == '_'
    }
    fn is_ident_continue(&self) -> bool {
        unicode_ident::is_xid_continue(*self)
    }
}

/// See [`int`].
pub struct Int<T, I>(PhantomData<(T, I)>);

impl<T, I> Copy for Int<T, I> {}
impl<T, I> Clone for Int<T, I> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<T, I> Parser<I> for Int<T, I>
where
    T: FromStr,
    I: Input,
    I::Token: Char,
{
    type Output = T;

    fn parse(&self, input: &mut I) -> PResult<T> {
        let mut ahead = input.clone();
        let mut text = String::new();

        let mut probe = ahead.clone();
        if probe.next_token().map_or(false, |c| c.to_char() == '-') {
            ahead = probe;
            text.push('-');
        }
        loop {
            let mut probe = ahead.clone();
            match probe.next_token() {
                Some(c) if c.is_digit(10) => {
                    ahead = probe;
                    text.push(c.to_char());
                }
                _ => break,
            }
        }

        // Overflow is a parse failure like any other.
        let value = text.parse::<T>().map_err(|_| Error::Parse)?;
        *input = ahead;
        Ok(value)
    }
}

impl<T, I> Printer<I> for Int<T, I>
where
    T: FromStr + Display,
    I: Input,
    I::Token: Char,
{
    fn print(&self, output: T, buffer: &mut I::Buffer) -> PResult<()> {
        let text = output.to_string();
        let digits = text.strip_prefix('-').unwrap_or(&text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Print);
        }
        for c in text.chars() {
            // Digits and '-' are ASCII, so every character type can represent them.
            if let Some(token) = <I::Token as Char>::from_char(c) {
                I::write_token(buffer, token);
            }
        }
        Ok(())
    }
}

/// A parser that accepts an optionally negative decimal integer, converting it with [`FromStr`].
///
/// Leading zeroes are accepted, and values that don't fit in `T` fail to parse. Printing writes the value's
/// [`Display`] form, and fails if that isn't a plain decimal integer (so `T` should be an integer type).
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let number = text::int::<i16, &[u8]>();
///
/// assert_eq!(number.parse_all(&b"-123"[..]), Ok(-123));
/// assert_eq!(number.parse_all(&b"007"[..]), Ok(7));
/// assert!(number.parse_all(&b"40000"[..]).is_err());
/// assert!(number.parse_all(&b"-"[..]).is_err());
/// assert_eq!(number.print_to_buffer(-42), Ok(b"-42".to_vec()));
/// ```
pub fn int<T, I>() -> Int<T, I>
where
    T: FromStr,
    I: Input,
    I::Token: Char,
{
    Int(PhantomData)
}

/// See [`ident`].
pub struct Ident<I>(PhantomData<I>);

impl<I> Copy for Ident<I> {}
impl<I> Clone for Ident<I> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<I> Parser<I> for Ident<I>
where
    I: Input,
    I::Token: Char,
{
    type Output = I::Slice;

    fn parse(&self, input: &mut I) -> PResult<I::Slice> {
        let before = input.clone();
        let mut ahead = input.clone();
        match ahead.next_token() {
            Some(c) if c.is_ident_start() => {}
            _ => return Err(Error::Parse),
        }
        loop {
            let mut probe = ahead.clone();
            match probe.next_token() {
                Some(c) if c.is_ident_continue() => ahead = probe,
                _ => break,
            }
        }
        *input = ahead;
        Ok(input.consumed_since(&before))
    }
}

impl<I> Printer<I> for Ident<I>
where
    I: Input,
    I::Token: Char,
{
    fn print(&self, output: I::Slice, buffer: &mut I::Buffer) -> PResult<()> {
        let mut tokens = I::from_slice(output.clone());
        match tokens.next_token() {
            Some(c) if c.is_ident_start() => {}
            _ => return Err(Error::Print),
        }
        while let Some(c) = tokens.next_token() {
            if !c.is_ident_continue() {
                return Err(Error::Print);
            }
        }
        I::write_slice(buffer, &output);
        Ok(())
    }
}

/// A parser that accepts an identifier.
///
/// For [`char`] tokens, an identifier is a character with the Unicode `XID_Start` property (or an underscore)
/// followed by any number of `XID_Continue` characters. For [`u8`] tokens, the same rule is restricted to ASCII
/// letters, digits and underscores.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let ident = text::ident::<&str>();
///
/// assert_eq!(ident.parse_all("_private"), Ok("_private"));
/// assert_eq!(ident.parse_all("δέλτα"), Ok("δέλτα"));
/// assert!(ident.parse_all("1st").is_err());
/// assert!(ident.print_to_buffer("two words").is_err());
/// ```
pub fn ident<I>() -> Ident<I>
where
    I: Input,
    I::Token: Char,
{
    Ident(PhantomData)
}
