//! Checks that catch parsers which would never terminate.
//!
//! *"Now, here, you see, it takes all the running you can do, to keep in the same place."*
//!
//! Only compiled into debug builds.

use core::any::type_name;

/// Report a repetition whose element and separator both succeeded without consuming anything.
///
/// Such a loop would run until it hit its upper bound (by default, forever), so this is always a bug in the parser
/// rather than a property of the input.
#[cold]
#[track_caller]
pub(crate) fn no_progress<O>() -> ! {
    let message = format!(
        "`Many` detected a repetition of `{}` that consumed no input. Its element and separator both succeeded \
         without advancing, so the loop can never end. Require the element to consume input (for example \
         `take_while(..).at_least(1)`) or add a separator with `separated_by`.",
        type_name::<O>(),
    );
    log::error!("{message}");
    panic!("{message}");
}
