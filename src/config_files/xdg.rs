//! XDG Base Directory Specification support.
//!
//! Only the config home is resolved here; it is where `user-dirs.dirs` lives.

use std::path::PathBuf;

use crate::config_files::home;
use crate::os::env::Env;

fn config_fallback(env: &Env) -> Option<PathBuf> {
    home(env).map(|mut home| {
        home.push(".config");
        home
    })
}

/// Get proper path for `$XDG_CONFIG_HOME`.
///
/// Values that are empty or relative are ignored, as the XDG Base Directory spec requires, and
/// `$HOME/.config` is used instead.
///
/// # Returns
///
/// Most of time it should be [`Some`] variant.
/// [`None`] is returned if and only if:
///     1. `env` has no usable `XDG_CONFIG_HOME`.
///     2. [`home`] returns `None`.
pub fn config(env: &Env) -> Option<PathBuf> {
    env.get_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|path| path.is_absolute())
        .or_else(|| config_fallback(env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::assert_none;

    #[test]
    fn explicit_config_home() {
        let env: Env = [("XDG_CONFIG_HOME", "/srv/conf"), ("HOME", "/home/user")]
            .into_iter()
            .collect();
        assert_eq!(config(&env), Some(PathBuf::from("/srv/conf")));
    }

    #[test]
    fn falls_back_to_home() {
        let env: Env = [("HOME", "/home/user")].into_iter().collect();
        assert_eq!(config(&env), Some(PathBuf::from("/home/user/.config")));
    }

    #[test]
    fn empty_or_relative_config_home_is_ignored() {
        for value in ["", "relative/conf"] {
            let env: Env = [("XDG_CONFIG_HOME", value), ("HOME", "/home/user")]
                .into_iter()
                .collect();
            assert_eq!(config(&env), Some(PathBuf::from("/home/user/.config")));
        }
    }

    #[test]
    fn nothing_to_go_on() {
        assert_none!(config(&Env::default()));
        let env: Env = [("XDG_CONFIG_HOME", "relative")].into_iter().collect();
        assert_none!(config(&env));
    }
}
