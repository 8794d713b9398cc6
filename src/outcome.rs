//! The two-variant container and its combinators.

use core::any::Any;
use core::fmt;

use crate::error::unwrap_failed;

/// Success or failure of one fallible operation.
///
/// Like `core::result::Result`, with an error payload that is an arbitrary
/// value (nothing forces it into an error trait), and with combinators
/// that keep both payloads inside the typed world until a caller
/// explicitly opts out via [`unwrap`][Self::unwrap] or
/// [`expect`][Self::expect].
///
/// Immutable once built; every combinator consumes `self` and produces a
/// fresh value.
///
/// ```
/// use outcome::Outcome;
///
/// fn half(value: u32) -> Outcome<u32, u32> {
///     if value % 2 != 0 {
///         return Outcome::Error(value);
///     }
///     Outcome::Ok(value / 2)
/// }
///
/// assert_eq!(half(4).and_then(half), Outcome::Ok(1));
/// assert_eq!(half(4).and_then(half).and_then(half), Outcome::Error(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome<V, E> {
    /// The operation produced a value.
    Ok(V),
    /// The operation failed with an error value.
    Error(E),
}

impl<V, E> Outcome<V, E> {
    /// `true` iff this is an `Ok`.
    pub fn is_ok(&self) -> bool {
        match self {
            Outcome::Ok(_) => true,
            Outcome::Error(_) => false,
        }
    }

    /// `true` iff this is an `Error`.
    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    /// The contained value.
    ///
    /// On an error value, raises [`UnwrapError`][crate::UnwrapError] with
    /// the contained error as cause. Callers who want a fallback instead
    /// of a crash use [`unwrap_or`][Self::unwrap_or] or
    /// [`unwrap_or_else`][Self::unwrap_or_else].
    pub fn unwrap(self) -> V
    where
        E: fmt::Debug + Any + Send,
    {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Error(error) => unwrap_failed("called unwrap on an error value", error),
        }
    }

    /// Same as [`unwrap`][Self::unwrap], with a caller-supplied diagnostic.
    ///
    /// The message must be `'static`, as it travels inside the raised
    /// payload.
    pub fn expect(self, message: &'static str) -> V
    where
        E: fmt::Debug + Any + Send,
    {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Error(error) => unwrap_failed(message, error),
        }
    }

    /// The contained value, or `default` on an error value. Never fails.
    pub fn unwrap_or(self, default: V) -> V {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Error(_) => default,
        }
    }

    /// The contained value, or `fallback` applied to the contained error.
    ///
    /// Total as long as `fallback` is; a panicking fallback propagates
    /// uncaught.
    pub fn unwrap_or_else<F>(self, fallback: F) -> V
    where
        F: FnOnce(E) -> V,
    {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Error(error) => fallback(error),
        }
    }

    /// Applies `transform` to the contained value, leaving an error value
    /// untouched.
    ///
    /// Never switches the active variant; `transform` runs at most once.
    pub fn map<T, F>(self, transform: F) -> Outcome<T, E>
    where
        F: FnOnce(V) -> T,
    {
        match self {
            Outcome::Ok(value) => Outcome::Ok(transform(value)),
            Outcome::Error(error) => Outcome::Error(error),
        }
    }

    /// Applies `transform` to the contained error, leaving an `Ok`
    /// untouched. The dual of [`map`][Self::map].
    pub fn map_error<F, M>(self, transform: M) -> Outcome<V, F>
    where
        M: FnOnce(E) -> F,
    {
        match self {
            Outcome::Ok(value) => Outcome::Ok(value),
            Outcome::Error(error) => Outcome::Error(transform(error)),
        }
    }

    /// Chains a further fallible step onto an `Ok`, flattening the result.
    ///
    /// The one combinator allowed to switch the active variant: an `Ok`
    /// input yields whatever `transform` returns. An error value passes
    /// through and `transform` is never invoked, so a chain of these
    /// short-circuits at the first failure.
    pub fn and_then<T, F>(self, transform: F) -> Outcome<T, E>
    where
        F: FnOnce(V) -> Outcome<T, E>,
    {
        match self {
            Outcome::Ok(value) => transform(value),
            Outcome::Error(error) => Outcome::Error(error),
        }
    }
}

#[cfg(feature = "zeroize")]
impl<V, E> zeroize::Zeroize for Outcome<V, E>
where
    V: zeroize::Zeroize,
    E: zeroize::Zeroize,
{
    fn zeroize(&mut self) {
        match self {
            Outcome::Ok(value) => value.zeroize(),
            Outcome::Error(error) => error.zeroize(),
        }
    }
}
