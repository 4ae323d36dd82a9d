//! *"When I use a word," Humpty Dumpty said, in rather a scornful tone, "it means just what I choose it to mean,
//! neither more nor less."*
//!
//! Although it's *sometimes* useful to be able to name their type, most of these parsers are much easier to work with
//! when accessed through their respective methods on [`Parser`].

use super::*;

/// See [`Parser::then`].
pub struct Then<A, B> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
}

impl<A: Copy, B: Copy> Copy for Then<A, B> {}
impl<A: Clone, B: Clone> Clone for Then<A, B> {
    fn clone(&self) -> Self {
        Then {
            parser_a: self.parser_a.clone(),
            parser_b: self.parser_b.clone(),
        }
    }
}

impl<I, A, B> Parser<I> for Then<A, B>
where
    I: Input,
    A: Parser<I>,
    B: Parser<I>,
{
    type Output = (A::Output, B::Output);

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<Self::Output> {
        let before = input.clone();
        let a = self.parser_a.parse(input)?;
        match self.parser_b.parse(input) {
            Ok(b) => Ok((a, b)),
            Err(e) => {
                *input = before;
                Err(e)
            }
        }
    }
}

impl<I, A, B> Printer<I> for Then<A, B>
where
    I: Input,
    A: Printer<I>,
    B: Printer<I>,
{
    #[inline]
    fn print(&self, (a, b): Self::Output, buffer: &mut I::Buffer) -> PResult<()> {
        let before = buffer.checkpoint();
        self.parser_a.print(a, buffer)?;
        self.parser_b.print(b, buffer).map_err(|e| {
            buffer.rewind(before);
            e
        })
    }
}

/// See [`Parser::ignore_then`].
pub struct IgnoreThen<A, B> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
}

impl<A: Copy, B: Copy> Copy for IgnoreThen<A, B> {}
impl<A: Clone, B: Clone> Clone for IgnoreThen<A, B> {
    fn clone(&self) -> Self {
        IgnoreThen {
            parser_a: self.parser_a.clone(),
            parser_b: self.parser_b.clone(),
        }
    }
}

impl<I, A, B> Parser<I> for IgnoreThen<A, B>
where
    I: Input,
    A: Parser<I>,
    B: Parser<I>,
{
    type Output = B::Output;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<Self::Output> {
        let before = input.clone();
        self.parser_a.parse(input)?;
        self.parser_b.parse(input).map_err(|e| {
            *input = before;
            e
        })
    }
}

impl<I, A, B> Printer<I> for IgnoreThen<A, B>
where
    I: Input,
    A: Printer<I, Output = ()>,
    B: Printer<I>,
{
    #[inline]
    fn print(&self, output: Self::Output, buffer: &mut I::Buffer) -> PResult<()> {
        let before = buffer.checkpoint();
        self.parser_a.print((), buffer)?;
        self.parser_b.print(output, buffer).map_err(|e| {
            buffer.rewind(before);
            e
        })
    }
}

/// See [`Parser::then_ignore`].
pub struct ThenIgnore<A, B> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
}

impl<A: Copy, B: Copy> Copy for ThenIgnore<A, B> {}
impl<A: Clone, B: Clone> Clone for ThenIgnore<A, B> {
    fn clone(&self) -> Self {
        ThenIgnore {
            parser_a: self.parser_a.clone(),
            parser_b: self.parser_b.clone(),
        }
    }
}

impl<I, A, B> Parser<I> for ThenIgnore<A, B>
where
    I: Input,
    A: Parser<I>,
    B: Parser<I>,
{
    type Output = A::Output;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<Self::Output> {
        let before = input.clone();
        let a = self.parser_a.parse(input)?;
        match self.parser_b.parse(input) {
            Ok(_) => Ok(a),
            Err(e) => {
                *input = before;
                Err(e)
            }
        }
    }
}

impl<I, A, B> Printer<I> for ThenIgnore<A, B>
where
    I: Input,
    A: Printer<I>,
    B: Printer<I, Output = ()>,
{
    #[inline]
    fn print(&self, output: Self::Output, buffer: &mut I::Buffer) -> PResult<()> {
        let before = buffer.checkpoint();
        self.parser_a.print(output, buffer)?;
        self.parser_b.print((), buffer).map_err(|e| {
            buffer.rewind(before);
            e
        })
    }
}

/// See [`Parser::or`].
pub struct Or<A, B> {
    pub(crate) parser_a: A,
    pub(crate) parser_b: B,
}

impl<A: Copy, B: Copy> Copy for Or<A, B> {}
impl<A: Clone, B: Clone> Clone for Or<A, B> {
    fn clone(&self) -> Self {
        Or {
            parser_a: self.parser_a.clone(),
            parser_b: self.parser_b.clone(),
        }
    }
}

impl<I, A, B> Parser<I> for Or<A, B>
where
    I: Input,
    A: Parser<I>,
    B: Parser<I, Output = A::Output>,
{
    type Output = A::Output;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<Self::Output> {
        // Failed parsers leave the input alone, so no snapshot is needed between the branches.
        self.parser_a
            .parse(input)
            .or_else(|_| self.parser_b.parse(input))
    }
}

impl<I, A, B> Printer<I> for Or<A, B>
where
    I: Input,
    A: Printer<I>,
    A::Output: Clone,
    B: Printer<I, Output = A::Output>,
{
    #[inline]
    fn print(&self, output: Self::Output, buffer: &mut I::Buffer) -> PResult<()> {
        self.parser_a
            .print(output.clone(), buffer)
            .or_else(|_| self.parser_b.print(output, buffer))
    }
}

/// See [`Parser::or_not`].
#[derive(Copy, Clone)]
pub struct OrNot<A> {
    pub(crate) parser: A,
}

impl<I, A> Parser<I> for OrNot<A>
where
    I: Input,
    A: Parser<I>,
{
    type Output = Option<A::Output>;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<Self::Output> {
        Ok(self.parser.parse(input).ok())
    }
}

impl<I, A> Printer<I> for OrNot<A>
where
    I: Input,
    A: Printer<I>,
{
    #[inline]
    fn print(&self, output: Self::Output, buffer: &mut I::Buffer) -> PResult<()> {
        match output {
            Some(output) => self.parser.print(output, buffer),
            None => Ok(()),
        }
    }
}

/// See [`Parser::map`].
pub struct Map<A, F> {
    pub(crate) parser: A,
    pub(crate) mapper: F,
}

impl<A: Copy, F: Copy> Copy for Map<A, F> {}
impl<A: Clone, F: Clone> Clone for Map<A, F> {
    fn clone(&self) -> Self {
        Map {
            parser: self.parser.clone(),
            mapper: self.mapper.clone(),
        }
    }
}

impl<I, U, A, F> Parser<I> for Map<A, F>
where
    I: Input,
    A: Parser<I>,
    F: Fn(A::Output) -> U,
{
    type Output = U;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<U> {
        self.parser.parse(input).map(&self.mapper)
    }
}

/// See [`Parser::convert`].
pub struct Convert<A, F, G> {
    pub(crate) parser: A,
    pub(crate) apply: F,
    pub(crate) unapply: G,
}

impl<A: Copy, F: Copy, G: Copy> Copy for Convert<A, F, G> {}
impl<A: Clone, F: Clone, G: Clone> Clone for Convert<A, F, G> {
    fn clone(&self) -> Self {
        Convert {
            parser: self.parser.clone(),
            apply: self.apply.clone(),
            unapply: self.unapply.clone(),
        }
    }
}

impl<I, U, A, F, G> Parser<I> for Convert<A, F, G>
where
    I: Input,
    A: Parser<I>,
    F: Fn(A::Output) -> U,
    G: Fn(U) -> A::Output,
{
    type Output = U;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<U> {
        self.parser.parse(input).map(&self.apply)
    }
}

impl<I, U, A, F, G> Printer<I> for Convert<A, F, G>
where
    I: Input,
    A: Printer<I>,
    F: Fn(A::Output) -> U,
    G: Fn(U) -> A::Output,
{
    #[inline]
    fn print(&self, output: U, buffer: &mut I::Buffer) -> PResult<()> {
        self.parser.print((self.unapply)(output), buffer)
    }
}

/// See [`Parser::printing`].
pub struct Printing<A, Q> {
    pub(crate) parser: A,
    pub(crate) printer: Q,
}

impl<A: Copy, Q: Copy> Copy for Printing<A, Q> {}
impl<A: Clone, Q: Clone> Clone for Printing<A, Q> {
    fn clone(&self) -> Self {
        Printing {
            parser: self.parser.clone(),
            printer: self.printer.clone(),
        }
    }
}

impl<I, A, Q> Parser<I> for Printing<A, Q>
where
    I: Input,
    A: Parser<I>,
{
    type Output = ();

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<()> {
        self.parser.parse(input).map(|_| ())
    }
}

impl<I, A, Q> Printer<I> for Printing<A, Q>
where
    I: Input,
    A: Parser<I>,
    Q: Printer<I, Output = ()>,
{
    #[inline]
    fn print(&self, (): (), buffer: &mut I::Buffer) -> PResult<()> {
        self.printer.print((), buffer)
    }
}
