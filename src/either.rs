//! A small module that implements the [`Parser`](Parser) and [`Printer`](Printer) traits for the
//! [`either::Either`](https://docs.rs/either/latest/either/enum.Either.html) type.

use either::Either;

use crate::{error::PResult, input::Input, Parser, Printer};

impl<L, R, I> Parser<I> for Either<L, R>
where
    I: Input,
    L: Parser<I>,
    R: Parser<I, Output = L::Output>,
{
    type Output = L::Output;

    fn parse(&self, input: &mut I) -> PResult<L::Output> {
        match self {
            Either::Left(l) => l.parse(input),
            Either::Right(r) => r.parse(input),
        }
    }
}

impl<L, R, I> Printer<I> for Either<L, R>
where
    I: Input,
    L: Printer<I>,
    R: Printer<I, Output = L::Output>,
{
    fn print(&self, output: L::Output, buffer: &mut I::Buffer) -> PResult<()> {
        match self {
            Either::Left(l) => l.print(output, buffer),
            Either::Right(r) => r.print(output, buffer),
        }
    }
}
