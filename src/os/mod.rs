//! OS-level helpers.
//!
//! [`env`] abstracts where environmental variables come from, so resolution can run against
//! the live process environment or a fixed snapshot.

pub mod env;
