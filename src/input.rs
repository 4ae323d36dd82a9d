//! *"Why, it's a Looking-glass book, of course! And if I hold it up to a glass, the words will all go the right way
//! again."*
//!
//! [`Input`] is the primary trait used to feed input data into a parser. Every input is a cheap, independent cursor
//! into a buffer that it shares with its copies: cloning an input takes a snapshot, and assigning a snapshot back is
//! how parsers roll back. The same logical text can be viewed several ways:
//!
//! - `&str`, whose tokens are Unicode scalar values ([`char`])
//! - `&[u8]`, whose tokens are UTF-8 code units ([`u8`])
//! - [`Graphemes`], whose tokens are extended grapheme clusters (`&str`)
//! - `bytes::Bytes` (with the `bytes` feature), whose tokens are [`u8`]
//!
//! See [`crate::view`] for running a parser written for one of these against another.

use unicode_segmentation::{GraphemeCursor, UnicodeSegmentation};

/// An owned, growable buffer that printers append to.
///
/// Buffers support constant-time rollback: a [`Buffer::checkpoint`] is just the current length, and
/// [`Buffer::rewind`] truncates back to it.
pub trait Buffer: Default {
    /// Remember the current end of the buffer.
    fn checkpoint(&self) -> usize;

    /// Discard everything appended since `checkpoint` was taken.
    fn rewind(&mut self, checkpoint: usize);
}

impl Buffer for String {
    #[inline]
    fn checkpoint(&self) -> usize {
        self.len()
    }

    #[inline]
    fn rewind(&mut self, checkpoint: usize) {
        self.truncate(checkpoint);
    }
}

impl<T> Buffer for Vec<T> {
    #[inline]
    fn checkpoint(&self) -> usize {
        self.len()
    }

    #[inline]
    fn rewind(&mut self, checkpoint: usize) {
        self.truncate(checkpoint);
    }
}

/// A trait for types that represent a position within a stream of input tokens.
///
/// Implementors must be value types: cloning produces an independent snapshot, and mutating one copy never affects
/// another. Parsers only ever move an input forwards, so the remaining length is enough to tell two snapshots of the
/// same buffer apart.
pub trait Input: Clone {
    /// The type of singular items read from the input.
    type Token;

    /// The type of a run of consumed input, as produced by parsers like [`take_while`](crate::primitive::take_while).
    type Slice: Clone;

    /// The owned buffer that printers over this input append to.
    type Buffer: Buffer;

    /// The number of code units (bytes) remaining in the input.
    fn len(&self) -> usize;

    /// Returns true if there is no input remaining.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove the next token from the front of the input.
    fn next_token(&mut self) -> Option<Self::Token>;

    /// The slice consumed between `before` and `self`.
    ///
    /// `self` must have been produced by advancing a copy of `before`.
    fn consumed_since(&self, before: &Self) -> Self::Slice;

    /// View a slice as an input in its own right.
    fn from_slice(slice: Self::Slice) -> Self;

    /// Append a single token to a buffer.
    fn write_token(buffer: &mut Self::Buffer, token: Self::Token);

    /// Append a slice to a buffer.
    fn write_slice(buffer: &mut Self::Buffer, slice: &Self::Slice);
}

impl<'a> Input for &'a str {
    type Token = char;
    type Slice = &'a str;
    type Buffer = String;

    #[inline]
    fn len(&self) -> usize {
        str::len(self)
    }

    #[inline]
    fn next_token(&mut self) -> Option<Self::Token> {
        let mut chars = self.chars();
        let c = chars.next()?;
        *self = chars.as_str();
        Some(c)
    }

    #[inline]
    fn consumed_since(&self, before: &Self) -> Self::Slice {
        &before[..before.len() - self.len()]
    }

    #[inline]
    fn from_slice(slice: Self::Slice) -> Self {
        slice
    }

    #[inline]
    fn write_token(buffer: &mut Self::Buffer, token: Self::Token) {
        buffer.push(token);
    }

    #[inline]
    fn write_slice(buffer: &mut Self::Buffer, slice: &Self::Slice) {
        buffer.push_str(slice);
    }
}

impl<'a> Input for &'a [u8] {
    type Token = u8;
    type Slice = &'a [u8];
    type Buffer = Vec<u8>;

    #[inline]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    #[inline]
    fn next_token(&mut self) -> Option<Self::Token> {
        let (&first, rest) = self.split_first()?;
        *self = rest;
        Some(first)
    }

    #[inline]
    fn consumed_since(&self, before: &Self) -> Self::Slice {
        &before[..before.len() - self.len()]
    }

    #[inline]
    fn from_slice(slice: Self::Slice) -> Self {
        slice
    }

    #[inline]
    fn write_token(buffer: &mut Self::Buffer, token: Self::Token) {
        buffer.push(token);
    }

    #[inline]
    fn write_slice(buffer: &mut Self::Buffer, slice: &Self::Slice) {
        buffer.extend_from_slice(slice);
    }
}

/// A view of a string as a sequence of extended grapheme clusters: what a reader would call its characters.
///
/// `"e\u{301}"` is two [`char`]s but a single grapheme, so a parser over `Graphemes` never splits an accent from the
/// letter it decorates.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let mut input = Graphemes::new("e\u{301}tude");
/// assert_eq!(input.next_token(), Some("e\u{301}"));
/// assert_eq!(input.as_str(), "tude");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Graphemes<'a>(&'a str);

impl<'a> Graphemes<'a> {
    /// View `text` as a sequence of graphemes.
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }

    /// The remaining text.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Returns true if `offset` (in bytes) falls between two graphemes of the remaining text.
    pub(crate) fn is_boundary(&self, offset: usize) -> bool {
        GraphemeCursor::new(offset, self.0.len(), true)
            .is_boundary(self.0, 0)
            .unwrap_or(false)
    }
}

impl<'a> From<&'a str> for Graphemes<'a> {
    fn from(text: &'a str) -> Self {
        Self(text)
    }
}

impl<'a> Input for Graphemes<'a> {
    type Token = &'a str;
    type Slice = &'a str;
    type Buffer = String;

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn next_token(&mut self) -> Option<Self::Token> {
        let grapheme = self.0.graphemes(true).next()?;
        self.0 = &self.0[grapheme.len()..];
        Some(grapheme)
    }

    #[inline]
    fn consumed_since(&self, before: &Self) -> Self::Slice {
        &before.0[..before.0.len() - self.0.len()]
    }

    #[inline]
    fn from_slice(slice: Self::Slice) -> Self {
        Self(slice)
    }

    #[inline]
    fn write_token(buffer: &mut Self::Buffer, token: Self::Token) {
        buffer.push_str(token);
    }

    #[inline]
    fn write_slice(buffer: &mut Self::Buffer, slice: &Self::Slice) {
        buffer.push_str(slice);
    }
}

#[cfg(feature = "bytes")]
impl Buffer for bytes::BytesMut {
    #[inline]
    fn checkpoint(&self) -> usize {
        self.len()
    }

    #[inline]
    fn rewind(&mut self, checkpoint: usize) {
        self.truncate(checkpoint);
    }
}

#[cfg(feature = "bytes")]
impl Input for bytes::Bytes {
    type Token = u8;
    type Slice = bytes::Bytes;
    type Buffer = bytes::BytesMut;

    #[inline]
    fn len(&self) -> usize {
        bytes::Bytes::len(self)
    }

    #[inline]
    fn next_token(&mut self) -> Option<Self::Token> {
        if bytes::Bytes::is_empty(self) {
            None
        } else {
            Some(bytes::Buf::get_u8(self))
        }
    }

    #[inline]
    fn consumed_since(&self, before: &Self) -> Self::Slice {
        before.slice(..bytes::Bytes::len(before) - bytes::Bytes::len(self))
    }

    #[inline]
    fn from_slice(slice: Self::Slice) -> Self {
        slice
    }

    #[inline]
    fn write_token(buffer: &mut Self::Buffer, token: Self::Token) {
        bytes::BufMut::put_u8(buffer, token);
    }

    #[inline]
    fn write_slice(buffer: &mut Self::Buffer, slice: &Self::Slice) {
        buffer.extend_from_slice(slice);
    }
}
