//! Configuration file utilities and standard directory paths.
//!
//! Provides helpers for locating configuration files, including XDG Base Directory support and
//! the `user-dirs.dirs` lookup.
//!
//! ```rust,no_run
//! # use userdirs::config_files::{user_dirs, xdg};
//! # use userdirs::os::env::Env;
//! let env = Env::new();
//!
//! let config_path = xdg::config(&env);
//! let desktop = user_dirs::get_user_dir(&env, "DESKTOP", Some("/tmp"));
//! ```

use std::{env::home_dir, path::PathBuf};

use crate::os::env::Env;

pub mod user_dirs;
pub mod xdg;

/// Home directory, as given by `$HOME` in `env`.
///
/// Empty `$HOME` is treated as unset. A [live](Env::is_live) `env` without `$HOME` falls back to
/// [`std::env::home_dir`], which consults the password database; injected snapshots never do.
pub fn home(env: &Env) -> Option<PathBuf> {
    env.get_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(|| env.is_live().then(home_dir).flatten())
        .filter(|home| !home.as_os_str().is_empty())
}
