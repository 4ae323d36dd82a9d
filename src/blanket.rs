use super::*;
use std::rc::Rc;

impl<'p, T, I> Parser<I> for &'p T
where
    T: ?Sized + Parser<I>,
    I: Input,
{
    type Output = T::Output;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<Self::Output> {
        (**self).parse(input)
    }
}

impl<'p, T, I> Printer<I> for &'p T
where
    T: ?Sized + Printer<I>,
    I: Input,
{
    #[inline]
    fn print(&self, output: Self::Output, buffer: &mut I::Buffer) -> PResult<()> {
        (**self).print(output, buffer)
    }
}

impl<T, I> Parser<I> for Box<T>
where
    T: ?Sized + Parser<I>,
    I: Input,
{
    type Output = T::Output;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<Self::Output> {
        (**self).parse(input)
    }
}

impl<T, I> Printer<I> for Box<T>
where
    T: ?Sized + Printer<I>,
    I: Input,
{
    #[inline]
    fn print(&self, output: Self::Output, buffer: &mut I::Buffer) -> PResult<()> {
        (**self).print(output, buffer)
    }
}

impl<T, I> Parser<I> for Rc<T>
where
    T: ?Sized + Parser<I>,
    I: Input,
{
    type Output = T::Output;

    #[inline]
    fn parse(&self, input: &mut I) -> PResult<Self::Output> {
        (**self).parse(input)
    }
}

impl<T, I> Printer<I> for Rc<T>
where
    T: ?Sized + Printer<I>,
    I: Input,
{
    #[inline]
    fn print(&self, output: Self::Output, buffer: &mut I::Buffer) -> PResult<()> {
        (**self).print(output, buffer)
    }
}
