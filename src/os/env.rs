use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

use thiserror::Error;

/// Snapshot of environmental variables, consulted by every lookup in this crate instead of the
/// live process environment.
///
/// Keys are case-insensitive on Windows, like the environment they mirror.
///
/// ```rust
/// use userdirs::os::env::Env;
///
/// let env: Env = [("XDG_CONFIG_HOME", "/etc/xdg-test")].into_iter().collect();
/// assert_eq!(env.get("XDG_CONFIG_HOME").ok(), Some("/etc/xdg-test"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Env {
    keys: HashMap<OsString, OsString>,

    normalised_keys: HashMap<OsString, OsString>,

    live: bool,
}

/// Errors encountered when getting environmental variable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvStrError {
    /// Variable `Missing.0` is not set.
    #[error("there is no environmental variable `${0:?}`")]
    Missing(OsString),

    /// Variable `NonUTF8.0` is not an UTF-8 string.
    #[error("environmental variable `${0:?}` is not an UTF-8 string")]
    NonUTF8(OsString),
}

impl Env {
    /// Snapshot the current process environment.
    pub fn new() -> Self {
        Self {
            live: true,
            ..Self::new_from(std::env::vars_os().collect())
        }
    }

    /// Create new [`Env`] using `env` as existing environmental variables.
    pub fn new_from(env: HashMap<OsString, OsString>) -> Self {
        Self {
            normalised_keys: Env::normalize_map(&env),
            keys: env,
            live: false,
        }
    }

    fn normalize_key(key: impl AsRef<OsStr>) -> OsString {
        key.as_ref().to_ascii_uppercase()
    }

    fn normalize_map(keys: &HashMap<OsString, OsString>) -> HashMap<OsString, OsString> {
        keys.iter()
            .map(|(key, value)| (Env::normalize_key(key), value.clone()))
            .collect()
    }

    /// Replace the snapshot with `env`.
    pub fn reload_from(&mut self, env: HashMap<OsString, OsString>) {
        *self = Self::new_from(env);
    }

    /// Replace the snapshot with the current process environment.
    pub fn reload(&mut self) {
        *self = Self::new();
    }

    /// Whether `self` mirrors the process environment, i.e. came from [`Env::new`] or
    /// [`Env::reload`].
    ///
    /// Only live snapshots may consult process-wide state beyond the variables themselves.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Get environmental variable pointed by `key`.
    ///
    /// # Returns
    /// `None` if `key` is not set.
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        match self.keys.get(key) {
            Some(x) => Some(x),
            None if cfg!(windows) => self
                .normalised_keys
                .get(&Env::normalize_key(key))
                .map(|x| x.as_ref()),
            None => None,
        }
    }

    /// Get environmental variable pointed by `key` as UTF-8.
    ///
    /// # Returns
    /// See [`EnvStrError`] for the failure cases.
    pub fn get(&self, key: impl AsRef<OsStr>) -> Result<&str, EnvStrError> {
        let key = key.as_ref();
        self.get_os(key)
            .ok_or_else(|| EnvStrError::Missing(key.to_os_string()))?
            .to_str()
            .ok_or_else(|| EnvStrError::NonUTF8(key.to_os_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new_from(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
