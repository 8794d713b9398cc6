#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "scope-debug")]
delog::generate_macros!();

mod error;
pub use error::UnwrapError;
mod iter;
pub use iter::{AndThenEach, OutcomeIterator};
mod outcome;
pub use outcome::Outcome;
#[cfg(feature = "std")]
mod scope;
#[cfg(feature = "std")]
pub use scope::{catch_panics, error_scoped, CaughtPanic, ErrorScope};
