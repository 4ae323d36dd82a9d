//! *"It's a poor sort of memory that only works backwards," the Queen remarked.*
//!
//! Failure in this crate is deliberately flat: a parser or printer either succeeds or it doesn't, and a failed call
//! never leaves its input (or output buffer) modified. Richer diagnostics belong to the leaf parsers of a particular
//! format, not to the combinators that compose them.

/// The error produced when a parser or printer fails.
///
/// Errors carry no payload. Combinators such as [`Many`](crate::many::Many) and [`Parser::or_not`](crate::Parser::or_not)
/// treat a failure from a sub-parser as an ordinary termination condition, so constructing an error must be cheap.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let mut input = "hello";
/// assert_eq!(just("bye").parse(&mut input), Err(Error::Parse));
/// assert_eq!(input, "hello");
///
/// assert_eq!(just::<_, &str>("hi").print_to_buffer(()), Ok("hi".to_string()));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// The input did not match.
    #[error("failed to parse input")]
    Parse,
    /// The output value could not be printed.
    #[error("failed to print output")]
    Print,
}

/// The result of a single parse or print step.
pub type PResult<T> = Result<T, Error>;
