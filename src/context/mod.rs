// ABOUTME: Context module - the rolling, token-budgeted conversation transcript.
// ABOUTME: Holds the context itself, token estimation, localization, and per-session storage.

mod conversation;
mod estimator;
mod locale;
mod store;

pub use conversation::*;
pub use estimator::*;
pub use locale::*;
pub use store::*;

#[cfg(test)]
mod estimator_test;
#[cfg(test)]
mod locale_test;
