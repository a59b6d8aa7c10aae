//! OS-level interactions.
//!
//! Provides [`Env`](env::Env), the environment snapshot every path lookup is resolved against.

pub mod env;
