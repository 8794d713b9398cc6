//! Scoped extraction of outcome values.
//!
//! A sequence of fallible steps can be written straight-line by running
//! it inside [`error_scoped`] and pulling values out of intermediate
//! [`Outcome`]s with [`ErrorScope::try_unwrap`]: the first error unwinds
//! the rest of the block and is handed back, typed, at the boundary.
//!
//! ```
//! use outcome::{error_scoped, Outcome};
//!
//! #[derive(Debug, PartialEq)]
//! struct ParseError;
//!
//! fn parse(digits: &str) -> Outcome<u32, ParseError> {
//!     match digits.parse() {
//!         Ok(number) => Outcome::Ok(number),
//!         Err(_) => Outcome::Error(ParseError),
//!     }
//! }
//!
//! let sum: Outcome<u32, ParseError> = error_scoped(|scope| {
//!     let a = scope.try_unwrap(parse("17"));
//!     let b = scope.try_unwrap(parse("4"));
//!     a + b
//! });
//! assert_eq!(sum, Outcome::Ok(21));
//!
//! let sum: Outcome<u32, ParseError> = error_scoped(|scope| {
//!     let a = scope.try_unwrap(parse("17"));
//!     let b = scope.try_unwrap(parse("four"));
//!     a + b
//! });
//! assert_eq!(sum, Outcome::Error(ParseError));
//! ```

use core::any::Any;
use core::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::Outcome;

/// Capability handle for [`try_unwrap`][Self::try_unwrap], valid for the
/// duration of one [`error_scoped`] invocation.
///
/// Holds no state. It exists so that early exit is only reachable from
/// code that was handed a scope.
pub struct ErrorScope {
    _not_constructible: (),
}

impl ErrorScope {
    /// The contained value of `outcome`, or no return at all.
    ///
    /// On an error value, the error itself is raised as the unwind
    /// payload, skipping the remainder of the scope body. The enclosing
    /// [`error_scoped`] decides at its boundary whether to absorb it.
    pub fn try_unwrap<V, E>(&self, outcome: Outcome<V, E>) -> V
    where
        E: Any + Send,
    {
        match outcome {
            Outcome::Ok(value) => value,
            Outcome::Error(error) => panic::panic_any(error),
        }
    }
}

/// Runs `body` with a fresh [`ErrorScope`], collecting its fate into one
/// typed [`Outcome`].
///
/// A failure raised inside `body` (by [`ErrorScope::try_unwrap`] or any
/// other panic) is absorbed into `Outcome::Error` iff its payload is of
/// the declared error type `E`. Anything else keeps unwinding past this
/// boundary: an undeclared failure is a bug, not a modeled outcome, and
/// must surface further up.
pub fn error_scoped<E, T, F>(body: F) -> Outcome<T, E>
where
    E: Any,
    F: FnOnce(&ErrorScope) -> T,
{
    let scope = ErrorScope {
        _not_constructible: (),
    };
    match panic::catch_unwind(AssertUnwindSafe(|| body(&scope))) {
        Ok(value) => Outcome::Ok(value),
        Err(payload) => match payload.downcast::<E>() {
            Ok(error) => {
                #[cfg(feature = "scope-debug")]
                debug!("scope absorbed a {}", core::any::type_name::<E>());
                Outcome::Error(*error)
            }
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}

/// A captured panic payload.
///
/// What `panic!` and friends raise is an opaque `Box<dyn Any>`; the
/// common string payloads can be read back via
/// [`message`][Self::message], everything else via
/// [`into_payload`][Self::into_payload].
pub struct CaughtPanic {
    payload: Box<dyn Any + Send + 'static>,
}

impl CaughtPanic {
    /// The panic message, for `&str` and `String` payloads.
    pub fn message(&self) -> Option<&str> {
        if let Some(message) = self.payload.downcast_ref::<&'static str>() {
            Some(message)
        } else if let Some(message) = self.payload.downcast_ref::<String>() {
            Some(message)
        } else {
            None
        }
    }

    /// Borrows the raw payload.
    pub fn payload(&self) -> &(dyn Any + Send + 'static) {
        &*self.payload
    }

    /// The raw payload, in the form `resume_unwind` accepts.
    pub fn into_payload(self) -> Box<dyn Any + Send + 'static> {
        self.payload
    }
}

impl fmt::Debug for CaughtPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CaughtPanic")
            .field(&self.message().unwrap_or("<non-string payload>"))
            .finish()
    }
}

impl fmt::Display for CaughtPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "panicked: {}", message),
            None => f.write_str("panicked with a non-string payload"),
        }
    }
}

impl std::error::Error for CaughtPanic {}

/// Runs `operation`, capturing any panic into an [`Outcome`].
///
/// The bridge from panicking code into the typed world: a normal return
/// becomes `Ok`, an unwind becomes `Error` with the payload preserved.
pub fn catch_panics<T, F>(operation: F) -> Outcome<T, CaughtPanic>
where
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(operation)) {
        Ok(value) => Outcome::Ok(value),
        Err(payload) => {
            #[cfg(feature = "scope-debug")]
            debug!("captured a panic payload");
            Outcome::Error(CaughtPanic { payload })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::UnwrapError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct DeclaredError(u32);

    #[derive(Debug, PartialEq)]
    struct UndeclaredError;

    fn halve(value: u32) -> Outcome<u32, DeclaredError> {
        if value % 2 != 0 {
            return Outcome::Error(DeclaredError(value));
        }
        Outcome::Ok(value / 2)
    }

    #[test]
    fn absorbs_a_declared_error() {
        let result: Outcome<u32, DeclaredError> =
            error_scoped(|scope| scope.try_unwrap(Outcome::Error(DeclaredError(7))));
        assert_eq!(result, Outcome::Error(DeclaredError(7)));
    }

    #[test]
    fn passes_ok_values_through() {
        let result: Outcome<&str, DeclaredError> =
            error_scoped(|scope| scope.try_unwrap(Outcome::<_, DeclaredError>::Ok("I am ok")));
        assert_eq!(result, Outcome::Ok("I am ok"));
    }

    #[test]
    fn runs_the_whole_body_when_nothing_fails() {
        let result: Outcome<u32, DeclaredError> = error_scoped(|scope| {
            let a = scope.try_unwrap(halve(8));
            let b = scope.try_unwrap(halve(a));
            scope.try_unwrap(halve(b))
        });
        assert_eq!(result, Outcome::Ok(1));
    }

    #[test]
    fn exits_at_the_first_error() {
        let mut reached_second_step = false;
        let result: Outcome<u32, DeclaredError> = error_scoped(|scope| {
            let a = scope.try_unwrap(halve(6));
            let b = scope.try_unwrap(halve(a));
            reached_second_step = true;
            b
        });
        assert_eq!(result, Outcome::Error(DeclaredError(3)));
        assert!(!reached_second_step);
    }

    #[test]
    fn undeclared_failures_keep_propagating() {
        let caught = std::panic::catch_unwind(|| {
            let _: Outcome<u32, DeclaredError> = error_scoped(|scope| {
                scope.try_unwrap(Outcome::<u32, UndeclaredError>::Error(UndeclaredError))
            });
        })
        .unwrap_err();
        assert_eq!(
            caught.downcast_ref::<UndeclaredError>(),
            Some(&UndeclaredError)
        );
    }

    #[test]
    fn plain_panics_are_not_absorbed() {
        let caught = std::panic::catch_unwind(|| {
            let _: Outcome<(), DeclaredError> =
                error_scoped(|_scope| panic!("not a declared failure"));
        })
        .unwrap_err();
        assert_eq!(
            caught.downcast_ref::<&str>().copied(),
            Some("not a declared failure")
        );
    }

    #[test]
    fn scopes_can_declare_unwrap_failures() {
        let result: Outcome<u32, UnwrapError<DeclaredError>> =
            error_scoped(|_scope| Outcome::<u32, DeclaredError>::Error(DeclaredError(3)).unwrap());
        match result {
            Outcome::Error(raised) => assert_eq!(*raised.cause(), DeclaredError(3)),
            Outcome::Ok(_) => panic!("expected the unwrap failure to be absorbed"),
        }
    }

    #[test]
    fn catch_panics_captures_the_payload() {
        let result: Outcome<u32, CaughtPanic> = catch_panics(|| panic!("boom"));
        match result {
            Outcome::Error(caught) => assert_eq!(caught.message(), Some("boom")),
            Outcome::Ok(_) => panic!("expected a captured panic"),
        }
    }

    #[test]
    fn catch_panics_captures_formatted_messages() {
        let result: Outcome<u32, CaughtPanic> = catch_panics(|| panic!("boom {}", 2 + 2));
        match result {
            Outcome::Error(caught) => assert_eq!(caught.message(), Some("boom 4")),
            Outcome::Ok(_) => panic!("expected a captured panic"),
        }
    }

    #[test]
    fn catch_panics_passes_values_through() {
        assert_eq!(catch_panics(|| "ok").map_error(|_| ()), Outcome::Ok("ok"));
    }
}
