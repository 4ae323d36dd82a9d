//! *"The time has come," the Walrus said, "To talk of many things."*
//!
//! [`Many`] runs an element parser repeatedly, optionally with a separator between occurrences, and folds each
//! output into an accumulator. To print, it needs the inverse of that fold: a *decomposition* that turns an
//! accumulator back into the sequence of element outputs to print. The default accumulator is a [`Vec`], whose
//! decomposition is just [`IntoIterator::into_iter`].

use super::*;
use core::iter::Empty;

/// The seed used by [`Parser::many`]: a fresh, empty [`Vec`] for every parse.
pub type Fresh<O> = fn() -> Vec<O>;

/// The fold used by [`Parser::many`]: push each output onto a [`Vec`].
pub type Append<O> = fn(&mut Vec<O>, O);

/// The decomposition used by [`Parser::many`]: iterate the [`Vec`] of outputs.
pub type Elements<O> = fn(Vec<O>) -> std::vec::IntoIter<O>;

/// The decomposition installed by [`Many::fold`]: yields nothing, so the repetition can only print an empty
/// sequence until [`Many::decompose`] replaces it.
pub type Nothing<R, O> = fn(R) -> Empty<O>;

fn nothing<R, O>(_: R) -> Empty<O> {
    core::iter::empty()
}

/// A parser that accepts a pattern repeatedly, with an optional separator between each occurrence.
///
/// See [`Parser::many`] and [`Parser::separated_by`].
///
/// - `P` parses one element.
/// - `S` parses the separator. Without one, this is [`Always<()>`](crate::primitive::Always).
/// - `N` creates a new accumulator for each parse, and `F` folds each element output into it.
/// - `D` decomposes an accumulator back into element outputs for printing.
///
/// # Parsing
///
/// Elements are parsed until one fails, a separator fails, or `at_most` elements have been accepted. A separator is
/// only consumed if another element follows it, so `"1,2,"` parsed with `int.separated_by(just(','))` stops before
/// the trailing comma. If fewer than `at_least` elements were found, the whole repetition fails and gives back
/// everything it consumed.
///
/// # Printing
///
/// The accumulator is decomposed and each element is printed with the separator between. If an element after the
/// first fails to print, printing *stops* there: the separator before it is withdrawn and the elements printed so
/// far are kept, mirroring how parsing stops at the first element that doesn't match. Any other failure (the first
/// element, a separator, or a count outside the bounds) fails the whole print and leaves the buffer untouched.
///
/// # Examples
///
/// ```
/// # use duplex::prelude::*;
/// let numbers = text::int::<i64, &str>()
///     .separated_by(just(','))
///     .at_least(1)
///     .fold(|| 0, |sum: &mut i64, n: i64| *sum += n)
///     .decompose(|sum: i64| vec![sum]);
///
/// assert_eq!(numbers.parse_all("1,2,3"), Ok(6));
/// assert_eq!(numbers.print_to_buffer(6), Ok("6".to_string()));
/// assert!(numbers.parse_all("").is_err());
/// ```
pub struct Many<P, S, N, F, D> {
    pub(crate) element: P,
    pub(crate) separator: S,
    pub(crate) at_least: usize,
    // `usize::MAX` means unbounded
    pub(crate) at_most: usize,
    pub(crate) initial: N,
    pub(crate) fold: F,
    pub(crate) decompose: D,
}

impl<P: Copy, S: Copy, N: Copy, F: Copy, D: Copy> Copy for Many<P, S, N, F, D> {}
impl<P: Clone, S: Clone, N: Clone, F: Clone, D: Clone> Clone for Many<P, S, N, F, D> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            separator: self.separator.clone(),
            at_least: self.at_least,
            at_most: self.at_most,
            initial: self.initial.clone(),
            fold: self.fold.clone(),
            decompose: self.decompose.clone(),
        }
    }
}

impl<I, P, O> Many<P, Always<(), I>, Fresh<O>, Append<O>, Elements<O>>
where
    I: Input,
    P: Parser<I, Output = O>,
{
    pub(crate) fn new(element: P) -> Self {
        Self {
            element,
            separator: primitive::always(()),
            at_least: 0,
            at_most: usize::MAX,
            initial: Vec::new as Fresh<O>,
            fold: Vec::push as Append<O>,
            decompose: <Vec<O> as IntoIterator>::into_iter as Elements<O>,
        }
    }
}

impl<P, S, N, F, D> Many<P, S, N, F, D> {
    /// Require a separator between each element.
    ///
    /// Separators are only consumed when another element follows them: a trailing separator is left in the input.
    pub fn separated_by<S2>(self, separator: S2) -> Many<P, S2, N, F, D> {
        Many {
            element: self.element,
            separator,
            at_least: self.at_least,
            at_most: self.at_most,
            initial: self.initial,
            fold: self.fold,
            decompose: self.decompose,
        }
    }

    /// Require that the pattern appear at least a minimum number of times.
    ///
    /// # Panics
    ///
    /// Panics if `at_least` exceeds the current maximum.
    pub fn at_least(self, at_least: usize) -> Self {
        assert!(
            at_least <= self.at_most,
            "`Many` requires at_least ({}) <= at_most ({})",
            at_least,
            self.at_most,
        );
        Self { at_least, ..self }
    }

    /// Require that the pattern appear at most a maximum number of times.
    ///
    /// # Panics
    ///
    /// Panics if `at_most` is below the current minimum.
    pub fn at_most(self, at_most: usize) -> Self {
        assert!(
            self.at_least <= at_most,
            "`Many` requires at_least ({}) <= at_most ({})",
            self.at_least,
            at_most,
        );
        Self { at_most, ..self }
    }

    /// Require that the pattern appear exactly the given number of times.
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// let rgb = take_while::<_, &str>(|c: &char| c.is_ascii_hexdigit())
    ///     .at_least(2)
    ///     .at_most(2)
    ///     .many()
    ///     .exactly(3);
    ///
    /// let mut input = "ff8000ab";
    /// assert_eq!(rgb.parse(&mut input), Ok(vec!["ff", "80", "00"]));
    /// assert_eq!(input, "ab");
    /// assert!(rgb.parse_all("ff80").is_err());
    /// ```
    pub fn exactly(self, count: usize) -> Self {
        Self {
            at_least: count,
            at_most: count,
            ..self
        }
    }

    /// Fold element outputs into a custom accumulator. Each parse starts from a new accumulator made by `initial`.
    ///
    /// This resets the decomposition to one that yields no elements, so printing only succeeds for an empty
    /// repetition until a matching [`Many::decompose`] is supplied.
    pub fn fold<I, N2, R2, F2>(self, initial: N2, fold: F2) -> Many<P, S, N2, F2, Nothing<R2, P::Output>>
    where
        I: Input,
        P: Parser<I>,
        N2: Fn() -> R2,
        F2: Fn(&mut R2, P::Output),
    {
        Many {
            element: self.element,
            separator: self.separator,
            at_least: self.at_least,
            at_most: self.at_most,
            initial,
            fold,
            decompose: nothing::<R2, P::Output> as Nothing<R2, P::Output>,
        }
    }

    /// Supply the inverse of the fold: a function that splits an accumulator back into the element outputs that
    /// should be printed, in order.
    ///
    /// ```
    /// # use duplex::prelude::*;
    /// use std::collections::BTreeSet;
    ///
    /// let set = text::int::<u8, &str>()
    ///     .separated_by(just(','))
    ///     .fold(BTreeSet::new, |set: &mut BTreeSet<u8>, n: u8| {
    ///         set.insert(n);
    ///     })
    ///     .decompose(|set: BTreeSet<u8>| set);
    ///
    /// let parsed = set.parse_all("3,1,3,2").unwrap();
    /// assert_eq!(parsed, BTreeSet::from([1, 2, 3]));
    /// assert_eq!(set.print_to_buffer(parsed), Ok("1,2,3".to_string()));
    /// ```
    pub fn decompose<R, D2, It>(self, decompose: D2) -> Many<P, S, N, F, D2>
    where
        N: Fn() -> R,
        D2: Fn(R) -> It,
        It: IntoIterator,
    {
        Many {
            element: self.element,
            separator: self.separator,
            at_least: self.at_least,
            at_most: self.at_most,
            initial: self.initial,
            fold: self.fold,
            decompose,
        }
    }
}

impl<I, P, S, N, R, F, D> Parser<I> for Many<P, S, N, F, D>
where
    I: Input,
    P: Parser<I>,
    S: Parser<I>,
    N: Fn() -> R,
    F: Fn(&mut R, P::Output),
{
    type Output = R;

    fn parse(&self, input: &mut I) -> PResult<R> {
        let original = input.clone();
        let mut rest = input.clone();
        let mut result = (self.initial)();
        let mut count = 0;

        while count < self.at_most {
            #[cfg(debug_assertions)]
            let before = input.len();

            let Ok(output) = self.element.parse(input) else {
                break;
            };
            count += 1;
            (self.fold)(&mut result, output);
            rest = input.clone();

            if self.separator.parse(input).is_err() {
                break;
            }

            #[cfg(debug_assertions)]
            if input.len() == before {
                crate::debug::no_progress::<P::Output>();
            }
        }

        if count < self.at_least {
            *input = original;
            return Err(Error::Parse);
        }
        *input = rest;
        Ok(result)
    }
}

impl<I, P, S, N, R, F, D, It> Printer<I> for Many<P, S, N, F, D>
where
    I: Input,
    P: Printer<I>,
    S: Printer<I, Output = ()>,
    N: Fn() -> R,
    F: Fn(&mut R, P::Output),
    D: Fn(R) -> It,
    It: IntoIterator<Item = P::Output>,
{
    fn print(&self, output: R, buffer: &mut I::Buffer) -> PResult<()> {
        let original = buffer.checkpoint();
        let mut elements = (self.decompose)(output).into_iter();

        let Some(first) = elements.next() else {
            return if self.at_least == 0 {
                Ok(())
            } else {
                Err(Error::Print)
            };
        };
        self.element.print(first, buffer)?;
        let mut count = 1;
        if count > self.at_most {
            buffer.rewind(original);
            return Err(Error::Print);
        }

        for element in elements {
            let rest = buffer.checkpoint();
            if self.separator.print((), buffer).is_err() {
                buffer.rewind(original);
                return Err(Error::Print);
            }
            if self.element.print(element, buffer).is_err() {
                buffer.rewind(rest);
                return Ok(());
            }
            count += 1;
            if count > self.at_most {
                buffer.rewind(original);
                return Err(Error::Print);
            }
        }

        if count < self.at_least {
            buffer.rewind(original);
            return Err(Error::Print);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn digits<'a>() -> impl Printer<&'a str, Output = &'a str> + Copy {
        take_while::<_, &'a str>(|c: &char| c.is_ascii_digit()).at_least(1)
    }

    #[test]
    fn trailing_separator_is_left_unconsumed() {
        let list = digits().separated_by(just(','));

        let mut input = "1,2,3,";
        assert_eq!(list.parse(&mut input), Ok(vec!["1", "2", "3"]));
        assert_eq!(input, ",");
    }

    #[test]
    fn too_few_restores_input() {
        let list = digits().separated_by(just(',')).at_least(3);

        let mut input = "1,2";
        assert_eq!(list.parse(&mut input), Err(Error::Parse));
        assert_eq!(input, "1,2");
    }

    #[test]
    fn stops_at_maximum() {
        let list = digits().separated_by(just(',')).at_most(2);

        let mut input = "1,2,3";
        assert_eq!(list.parse(&mut input), Ok(vec!["1", "2"]));
        assert_eq!(input, ",3");

        assert_eq!(list.print_to_buffer(vec!["1", "2"]), Ok("1,2".to_string()));
        assert_eq!(list.print_to_buffer(vec!["1", "2", "3"]), Err(Error::Print));
    }

    #[test]
    fn zero_matches() {
        let list = digits().separated_by(just(','));

        let mut input = "abc";
        assert_eq!(list.parse(&mut input), Ok(vec![]));
        assert_eq!(input, "abc");

        assert_eq!(list.at_least(1).parse(&mut input), Err(Error::Parse));
    }

    #[test]
    fn fold_into_sum() {
        let sum = text::int::<i32, &str>()
            .separated_by(just('+'))
            .fold(|| 0, |total: &mut i32, n: i32| *total += n);

        assert_eq!(sum.parse_all("1+2+39"), Ok(42));
        // Without a decomposition, only the empty repetition prints.
        assert_eq!(sum.print_to_buffer(42), Ok(String::new()));
        assert_eq!(sum.at_least(1).print_to_buffer(42), Err(Error::Print));
    }

    #[test]
    fn printing_stops_at_first_unprintable_element() {
        let list = digits().separated_by(just(','));

        let mut buffer = String::from(">");
        assert_eq!(list.print(vec!["1", "2", "x", "4", "5"], &mut buffer), Ok(()));
        assert_eq!(buffer, ">1,2");
    }

    #[test]
    fn outputs_need_not_be_clone() {
        #[derive(Debug, PartialEq)]
        struct Port(u16);

        let ports = text::int::<u16, &str>()
            .convert(Port, |p: Port| p.0)
            .separated_by(just(','));

        assert_eq!(ports.parse_all("80,443"), Ok(vec![Port(80), Port(443)]));
        assert_eq!(ports.print_to_buffer(vec![Port(8080)]), Ok("8080".to_string()));
    }

    #[test]
    fn unprintable_first_element_fails() {
        let list = digits().separated_by(just(','));

        let mut buffer = String::from(">");
        assert_eq!(list.print(vec!["x", "1"], &mut buffer), Err(Error::Print));
        assert_eq!(buffer, ">");
    }

    #[test]
    fn empty_decomposition() {
        let list = digits().separated_by(just(','));

        assert_eq!(list.print_to_buffer(vec![]), Ok(String::new()));
        assert_eq!(list.at_least(1).print_to_buffer(vec![]), Err(Error::Print));
    }

    #[test]
    fn printing_below_minimum_rolls_back() {
        let list = digits().separated_by(just(',')).at_least(3);

        let mut buffer = String::from(">");
        assert_eq!(list.print(vec!["1", "2"], &mut buffer), Err(Error::Print));
        assert_eq!(buffer, ">");
    }

    #[test]
    fn truncation_below_minimum_keeps_prefix() {
        let list = digits().separated_by(just(',')).at_least(3);

        // Once an element fails to print, the minimum is no longer checked.
        let mut buffer = String::from(">");
        assert_eq!(list.print(vec!["1", "2", "x", "4", "5"], &mut buffer), Ok(()));
        assert_eq!(buffer, ">1,2");
    }

    #[test]
    fn unprintable_separator_fails() {
        let comma = just::<_, &str>(',').then(take_while(|c: &char| *c == ' ').at_least(1));
        // Prints no spaces, which its own parser rejects.
        let unprintable = take_while::<_, &str>(|c: &char| *c == ' ')
            .at_least(1)
            .convert(|_| (), |()| "");
        let list = text::int::<u8, &str>().separated_by(comma.printing(unprintable));

        assert_eq!(list.parse_all("1, 2,  3"), Ok(vec![1, 2, 3]));
        assert_eq!(list.print_to_buffer(vec![1]), Ok("1".to_string()));
        assert_eq!(list.print_to_buffer(vec![1, 2]), Err(Error::Print));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "consumed no input")]
    fn zero_progress_is_detected() {
        let blanks = take_while::<_, &str>(|c: &char| c.is_whitespace()).many();
        let _ = blanks.parse(&mut "abc");
    }
}
