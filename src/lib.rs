#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod blanket;
/// Combinators that allow combining and extending existing parsers.
pub mod combinator;
#[cfg(debug_assertions)]
mod debug;
#[cfg(feature = "either")]
mod either;
/// Error types, traits and utilities.
pub mod error;
/// Input representations and the buffers that printers write into.
pub mod input;
/// Bounded repetition with separators and custom accumulation.
pub mod many;
/// Parser primitives that accept specific token patterns.
pub mod primitive;
/// Text-specific parsers and utilities.
pub mod text;
/// Adapters that run a parser over a different representation of the same text.
pub mod view;

/// Commonly used functions, traits and types.
pub mod prelude {
    pub use super::{
        error::{Error, PResult},
        input::{Buffer as _, Graphemes, Input},
        many::Many,
        primitive::{always, any, end, just, newline, take_while},
        text,
        view::{ByteParserExt as _, CharParserExt as _, GraphemeParserExt as _},
        Parser, Printer,
    };
}

use crate::{
    combinator::*,
    error::{Error, PResult},
    input::{Buffer, Input},
    many::{Append, Elements, Fresh, Many},
    primitive::Always,
};

/// A trait implemented by parsers.
///
/// A parser takes exclusive access to an input value and either returns an output, leaving the input advanced past
/// whatever it consumed, or fails. **A parser that fails must leave its input exactly as it found it.** Every
/// combinator in this crate relies on that contract: it is what lets [`Parser::or`], [`Parser::or_not`] and
/// [`Many`] treat failure as an ordinary way to stop, without tracking what each sub-parser did.
///
/// Inputs are cheap, independent copies of a cursor into a shared buffer (see [`Input`]), so a parser that needs to
/// back out simply keeps a copy of the input from before it started and writes it back.
///
/// Parsers that can also run in reverse implement [`Printer`].
pub trait Parser<I: Input> {
    /// The type of value produced by a successful parse.
    type Output;

    /// Parse a prefix of the input, advancing it past the consumed prefix.
    ///
    /// On failure, `input` is left unchanged.
    fn parse(&self, input: &mut I) -> PResult<Self::Output>;

    /// Parse the whole of an input, failing if anything is left over afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let number = text::int::<u32, &str>();
    ///
    /// assert_eq!(number.parse_all("42"), Ok(42));
    /// assert_eq!(number.parse_all("42!"), Err(Error::Parse));
    /// ```
    fn parse_all(&self, mut input: I) -> PResult<Self::Output>
    where
        Self: Sized,
    {
        let output = self.parse(&mut input)?;
        if input.is_empty() {
            Ok(output)
        } else {
            Err(Error::Parse)
        }
    }

    /// Parse one pattern and then another, producing both outputs as a tuple.
    ///
    /// If the second pattern fails, any input consumed by the first is given back.
    ///
    /// # Examples
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let pair = text::int::<i32, &str>().then_ignore(just(',')).then(text::int::<i32, &str>());
    ///
    /// assert_eq!(pair.parse_all("3,-4"), Ok((3, -4)));
    /// assert_eq!(pair.print_to_buffer((10, 20)), Ok("10,20".to_string()));
    /// ```
    fn then<B>(self, other: B) -> Then<Self, B>
    where
        Self: Sized,
        B: Parser<I>,
    {
        Then {
            parser_a: self,
            parser_b: other,
        }
    }

    /// Parse one pattern, ignoring its output, and then another.
    ///
    /// When printing, the ignored side must have an output of `()` so that it can be printed without a value.
    fn ignore_then<B>(self, other: B) -> IgnoreThen<Self, B>
    where
        Self: Sized,
        B: Parser<I>,
    {
        IgnoreThen {
            parser_a: self,
            parser_b: other,
        }
    }

    /// Parse one pattern and then another, ignoring the output of the second.
    ///
    /// When printing, the ignored side must have an output of `()` so that it can be printed without a value.
    fn then_ignore<B>(self, other: B) -> ThenIgnore<Self, B>
    where
        Self: Sized,
        B: Parser<I>,
    {
        ThenIgnore {
            parser_a: self,
            parser_b: other,
        }
    }

    /// Parse one pattern, or another if the first fails.
    ///
    /// Printing tries the first printer, then the second.
    ///
    /// # Examples
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let yes_no = just::<_, &str>("yes").or(just("no"));
    ///
    /// assert_eq!(yes_no.parse_all("no"), Ok(()));
    /// assert!(yes_no.parse_all("maybe").is_err());
    /// ```
    fn or<B>(self, other: B) -> Or<Self, B>
    where
        Self: Sized,
        B: Parser<I, Output = Self::Output>,
    {
        Or {
            parser_a: self,
            parser_b: other,
        }
    }

    /// Attempt to parse something, but only if it exists.
    ///
    /// If parsing of the pattern is successful, the output is `Some(_)`. Otherwise, the output is `None` and no input
    /// is consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let signed = just::<_, &str>('+').or_not().then(text::int::<u8, &str>());
    ///
    /// assert_eq!(signed.parse_all("+7"), Ok((Some(()), 7)));
    /// assert_eq!(signed.parse_all("7"), Ok((None, 7)));
    /// ```
    fn or_not(self) -> OrNot<Self>
    where
        Self: Sized,
    {
        OrNot { parser: self }
    }

    /// Map the output of this parser to another value.
    ///
    /// The mapping only runs one way, so the resulting parser cannot print. Use [`Parser::convert`] when the mapping
    /// can be undone.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map {
            parser: self,
            mapper: f,
        }
    }

    /// Map the output of this parser to another value with a pair of functions that undo each other.
    ///
    /// `apply` runs after parsing, `unapply` runs before printing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// #[derive(Debug, PartialEq)]
    /// struct Celsius(i32);
    ///
    /// let temperature = text::int::<i32, &str>()
    ///     .then_ignore(just("C"))
    ///     .convert(Celsius, |Celsius(degrees): Celsius| degrees);
    ///
    /// assert_eq!(temperature.parse_all("-5C"), Ok(Celsius(-5)));
    /// assert_eq!(temperature.print_to_buffer(Celsius(21)), Ok("21C".to_string()));
    /// ```
    fn convert<U, F, G>(self, apply: F, unapply: G) -> Convert<Self, F, G>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
        G: Fn(U) -> Self::Output,
    {
        Convert {
            parser: self,
            apply,
            unapply,
        }
    }

    /// Parse with this parser, discarding its output, but print with another printer.
    ///
    /// This is useful for patterns that accept many spellings but have one canonical form, such as a run of
    /// whitespace that should be printed as a single space.
    ///
    /// # Examples
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let spaces = take_while::<_, &str>(|c: &char| *c == ' ' || *c == '\t')
    ///     .at_least(1)
    ///     .printing(just(' '));
    ///
    /// assert_eq!(spaces.parse_all(" \t  "), Ok(()));
    /// assert_eq!(spaces.print_to_buffer(()), Ok(" ".to_string()));
    /// ```
    fn printing<Q>(self, printer: Q) -> Printing<Self, Q>
    where
        Self: Sized,
        Q: Printer<I, Output = ()>,
    {
        Printing {
            parser: self,
            printer,
        }
    }

    /// Parse this pattern any number of times (including zero times), collecting the outputs into a [`Vec`].
    ///
    /// See [`Many`] for bounds, separators and custom accumulation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let word = take_while::<_, &str>(|c: &char| c.is_alphabetic()).at_least(1);
    /// let words = word.then_ignore(just(' ').or_not()).many();
    ///
    /// assert_eq!(words.parse_all("the quick fox"), Ok(vec!["the", "quick", "fox"]));
    /// ```
    fn many(self) -> Many<Self, Always<(), I>, Fresh<Self::Output>, Append<Self::Output>, Elements<Self::Output>>
    where
        Self: Sized,
    {
        Many::new(self)
    }

    /// Parse this pattern any number of times, with another pattern between each occurrence.
    ///
    /// A trailing separator that is not followed by another element is left unconsumed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let numbers = text::int::<i64, &str>().separated_by(just(','));
    ///
    /// let mut input = "1,2,3,";
    /// assert_eq!(numbers.parse(&mut input), Ok(vec![1, 2, 3]));
    /// assert_eq!(input, ",");
    ///
    /// assert_eq!(numbers.print_to_buffer(vec![4, 5, 6]), Ok("4,5,6".to_string()));
    /// ```
    fn separated_by<S>(
        self,
        separator: S,
    ) -> Many<Self, S, Fresh<Self::Output>, Append<Self::Output>, Elements<Self::Output>>
    where
        Self: Sized,
        S: Parser<I>,
    {
        Many::new(self).separated_by(separator)
    }
}

/// A parser that can also run backwards, turning an output back into the input that would produce it.
///
/// Printing appends to the owned [`Input::Buffer`] of the input representation (a [`String`] for text, a
/// [`Vec<u8>`] for bytes). **A printer that fails must leave the buffer exactly as it found it**, which every
/// printer in this crate does by truncating back to a [`Buffer::checkpoint`].
///
/// For a printer `p` and a value `v`, parsing the output of `p.print_to_buffer(v)` with `p` should give back `v`.
pub trait Printer<I: Input>: Parser<I> {
    /// Append the printed form of `output` to `buffer`.
    ///
    /// On failure, `buffer` is left unchanged.
    fn print(&self, output: Self::Output, buffer: &mut I::Buffer) -> PResult<()>;

    /// Print `output` into a fresh buffer.
    fn print_to_buffer(&self, output: Self::Output) -> PResult<I::Buffer>
    where
        Self: Sized,
    {
        let mut buffer = I::Buffer::default();
        self.print(output, &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn parse_all_requires_end() {
        let word = take_while::<_, &str>(|c: &char| c.is_alphabetic());

        assert_eq!(word.parse_all("hello"), Ok("hello"));
        assert_eq!(word.parse_all("hello world"), Err(Error::Parse));
    }

    #[test]
    fn failed_sequence_restores_input() {
        let greeting = just::<_, &str>("hello").then(just(" world"));

        let mut input = "hello there";
        assert_eq!(greeting.parse(&mut input), Err(Error::Parse));
        assert_eq!(input, "hello there");
    }

    #[test]
    fn failed_sequence_restores_buffer() {
        let digits = take_while::<_, &str>(|c: &char| c.is_ascii_digit()).at_least(1);
        let pair = digits.then_ignore(just('-')).then(digits);

        let mut buffer = String::from("start:");
        assert_eq!(pair.print(("12", "ab"), &mut buffer), Err(Error::Print));
        assert_eq!(buffer, "start:");

        assert_eq!(pair.print(("12", "34"), &mut buffer), Ok(()));
        assert_eq!(buffer, "start:12-34");
    }

    #[test]
    fn or_prints_first_accepting_branch() {
        let digits = take_while::<_, &str>(|c: &char| c.is_ascii_digit()).at_least(1);
        let letters = take_while::<_, &str>(|c: &char| c.is_ascii_alphabetic()).at_least(1);
        let token = digits.or(letters);

        assert_eq!(token.parse_all("abc"), Ok("abc"));
        assert_eq!(token.print_to_buffer("123"), Ok("123".to_string()));
        assert_eq!(token.print_to_buffer("xyz"), Ok("xyz".to_string()));
        assert_eq!(token.print_to_buffer("x1"), Err(Error::Print));
    }

    #[test]
    fn or_not_matches_optionally() {
        let flag = just::<_, &[u8]>("true").convert(|()| true, |_: bool| ());

        let mut input = &b"true Hello, world!"[..];
        assert_eq!(flag.or_not().parse(&mut input), Ok(Some(true)));
        assert_eq!(input, b" Hello, world!");

        let mut input = &b"Hello, world!"[..];
        assert_eq!(flag.or_not().parse(&mut input), Ok(None));
        assert_eq!(input, b"Hello, world!");
    }

    #[test]
    fn map_is_parse_only() {
        let length = take_while::<_, &str>(|c: &char| c.is_alphabetic()).map(str::len);

        assert_eq!(length.parse_all("abcd"), Ok(4));
    }

    #[test]
    fn boxed_and_borrowed_parsers() {
        let number = text::int::<u8, &str>();
        let boxed: Box<dyn Printer<&str, Output = u8>> = Box::new(number);

        assert_eq!((&number).parse_all("12"), Ok(12));
        assert_eq!(boxed.parse_all("12"), Ok(12));
        assert_eq!(boxed.print_to_buffer(7), Ok("7".to_string()));
    }
}
