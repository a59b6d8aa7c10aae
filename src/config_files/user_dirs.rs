//! Lookup of XDG user directories in `user-dirs.dirs`.
//!
//! The file is written by `xdg-user-dirs-update` and consists of shell-style assignments without
//! any section header:
//!
//! ```text
//! # This file is written by xdg-user-dirs-update
//! XDG_DESKTOP_DIR="$HOME/Desktop"
//! XDG_DOWNLOAD_DIR="$HOME/Downloads"
//! ```
//!
//! [`get_user_dir`] is the one-call entry point. It never fails: anything that goes wrong on the
//! way yields the caller's default. [`UserDirs`] gives access to the parsed file and its errors.
//!
//! Values are returned as stored. `$HOME` is not expanded unless
//! [`UserDirs::get_expanded`] (feature __expand-user__) is used.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::{FromStr, Utf8Error};

use thiserror::Error;
use tracing::{debug, trace};

use crate::config_files::xdg;
use crate::os::env::Env;

/// Name of the file inside `$XDG_CONFIG_HOME`.
pub const USER_DIRS_FILE: &str = "user-dirs.dirs";

/// Header of the only section that is visible to lookups.
const DEFAULT_SECTION: &str = "DEFAULT";

/// Errors encountered when loading `user-dirs.dirs`.
#[derive(Debug, Error)]
pub enum UserDirsError {
    /// Neither `$XDG_CONFIG_HOME` nor `$HOME` is usable.
    #[error("cannot determine XDG config home")]
    NoConfigHome,

    /// The file at `Io.path` could not be read.
    #[error("failed to read `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("user-dirs file is not an UTF-8 text")]
    Encoding(#[from] Utf8Error),

    /// A `=value` line with nothing before the `=`.
    #[error("line {line}: assignment without a key")]
    EmptyKey { line: usize },

    /// `DuplicateKey.key` appears twice within one section.
    #[error("line {line}: key `{key}` is already defined")]
    DuplicateKey { line: usize, key: String },

    /// `[DuplicateSection.section]` appears twice; `[DEFAULT]` may be repeated.
    #[error("line {line}: section `{section}` is already defined")]
    DuplicateSection { line: usize, section: String },
}

/// Outcome of a lookup: either the configured value, or a signal to use the caller's default.
///
/// Why a lookup fell back is only reported through `tracing` at debug level; callers that need
/// the reason should use [`UserDirs`] directly.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// The value stored in `user-dirs.dirs`.
    Resolved(String),
    /// Nothing usable was found; the caller's default applies.
    Fallback,
}

impl Lookup {
    /// Resolved value, or `default` unchanged.
    pub fn or(self, default: Option<&str>) -> Option<String> {
        match self {
            Lookup::Resolved(value) => Some(value),
            Lookup::Fallback => default.map(str::to_owned),
        }
    }

    /// Resolved value, or `None`.
    pub fn into_option(self) -> Option<String> {
        self.or(None)
    }

    /// Whether the value came from the file.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Lookup::Resolved(_))
    }
}

/// Well-known user directories, as created by `xdg-user-dirs-update`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum UserDir {
    Desktop,
    Download,
    Templates,
    PublicShare,
    Documents,
    Music,
    Pictures,
    Videos,
}

/// Returned by [`UserDir::from_str`] for names outside of [`UserDir::ALL`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user directory `{0}`")]
pub struct UnknownUserDir(pub String);

impl UserDir {
    pub const ALL: [UserDir; 8] = [
        UserDir::Desktop,
        UserDir::Download,
        UserDir::Templates,
        UserDir::PublicShare,
        UserDir::Documents,
        UserDir::Music,
        UserDir::Pictures,
        UserDir::Videos,
    ];

    /// Logical name, e.g. `DESKTOP`.
    pub const fn name(self) -> &'static str {
        match self {
            UserDir::Desktop => "DESKTOP",
            UserDir::Download => "DOWNLOAD",
            UserDir::Templates => "TEMPLATES",
            UserDir::PublicShare => "PUBLICSHARE",
            UserDir::Documents => "DOCUMENTS",
            UserDir::Music => "MUSIC",
            UserDir::Pictures => "PICTURES",
            UserDir::Videos => "VIDEOS",
        }
    }

    /// Key in `user-dirs.dirs`, e.g. `XDG_DESKTOP_DIR`.
    pub fn key(self) -> String {
        key_for(self.name())
    }
}

impl AsRef<str> for UserDir {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for UserDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UserDir {
    type Err = UnknownUserDir;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserDir::ALL
            .into_iter()
            .find(|dir| dir.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownUserDir(s.to_owned()))
    }
}

/// `XDG_<NAME>_DIR` for the logical directory `dir_name`.
fn key_for(dir_name: &str) -> String {
    format!("XDG_{}_DIR", dir_name.to_ascii_uppercase())
}

/// Strips one pair of matching quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Name of the `[section]` header on `line`, if it is one.
///
/// The name must be non-empty; anything after the last `]` is ignored.
fn section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest.rfind(']')?;
    Some(&rest[..end]).filter(|name| !name.is_empty())
}

/// Parsed contents of `user-dirs.dirs`.
///
/// Keys are stored upper-cased; a key declared without `=` has no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirs {
    entries: Vec<(String, Option<String>)>,
}

impl UserDirs {
    /// Parse `contents` as the header-less default section of an INI-like file.
    ///
    /// * Blank lines and lines starting with `#` or `;` are skipped.
    /// * `KEY=value` assigns, `KEY` alone declares a key without value.
    /// * A `[section]` header hides the entries after it from lookups, until `[DEFAULT]` reopens
    ///   the default section. Hidden entries are still checked.
    ///
    /// # Errors
    /// [`UserDirsError::EmptyKey`], [`UserDirsError::DuplicateKey`] and
    /// [`UserDirsError::DuplicateSection`], in any section.
    pub fn parse(contents: &str) -> Result<Self, UserDirsError> {
        let mut entries: Vec<(String, Option<String>)> = Vec::new();
        let mut sections: Vec<&str> = Vec::new();
        // Keys of the current named section; `None` while in the default one.
        let mut section_keys: Option<Vec<String>> = None;

        for (index, raw) in contents.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with(['#', ';']) {
                continue;
            }
            if let Some(section) = section_header(trimmed) {
                if section == DEFAULT_SECTION {
                    section_keys = None;
                } else if sections.contains(&section) {
                    return Err(UserDirsError::DuplicateSection {
                        line,
                        section: section.to_owned(),
                    });
                } else {
                    sections.push(section);
                    section_keys = Some(Vec::new());
                }
                continue;
            }

            let (key, value) = match trimmed.split_once('=') {
                Some((key, value)) => (key.trim_end(), Some(unquote(value.trim_start()))),
                None => (trimmed, None),
            };
            if key.is_empty() {
                return Err(UserDirsError::EmptyKey { line });
            }
            let key = key.to_ascii_uppercase();
            let duplicate = match &section_keys {
                Some(keys) => keys.contains(&key),
                None => entries.iter().any(|(existing, _)| *existing == key),
            };
            if duplicate {
                return Err(UserDirsError::DuplicateKey { line, key });
            }
            match &mut section_keys {
                Some(keys) => keys.push(key),
                None => entries.push((key, value.map(str::to_owned))),
            }
        }

        Ok(Self { entries })
    }

    /// Decode `bytes` as UTF-8 and [`parse`](UserDirs::parse) them.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, UserDirsError> {
        Self::parse(std::str::from_utf8(bytes)?)
    }

    /// Read and parse the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UserDirsError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| UserDirsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Load `user-dirs.dirs` from the config home described by `env`.
    pub fn from_env(env: &Env) -> Result<Self, UserDirsError> {
        let path = user_dirs_path(env).ok_or(UserDirsError::NoConfigHome)?;
        Self::load(path)
    }

    /// Value of `XDG_<DIR_NAME>_DIR`.
    ///
    /// ```rust
    /// use userdirs::{UserDir, UserDirs};
    ///
    /// # fn main() -> Result<(), userdirs::UserDirsError> {
    /// let dirs = UserDirs::parse("XDG_MUSIC_DIR=\"$HOME/Music\"\n")?;
    /// assert_eq!(dirs.get(UserDir::Music), Some("$HOME/Music"));
    /// assert_eq!(dirs.get("music"), Some("$HOME/Music"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, dir_name: impl AsRef<str>) -> Option<&str> {
        self.get_key(&key_for(dir_name.as_ref()))
    }

    /// Value stored under the raw `key`, compared case-insensitively.
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            .and_then(|(_, value)| value.as_deref())
    }

    /// Entries which carry a value, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| Some((key.as_str(), value.as_deref()?)))
    }

    /// Like [`get`](UserDirs::get), with `$VAR` and `${VAR}` expanded from `env`.
    ///
    /// Variables missing from `env` are left in place.
    #[cfg(feature = "expand-user")]
    #[cfg_attr(docsrs, doc(cfg(feature = "expand-user")))]
    pub fn get_expanded(&self, dir_name: impl AsRef<str>, env: &Env) -> Option<String> {
        let value = self.get(dir_name)?;
        Some(shellexpand::env_with_context_no_errors(value, |var| env.get(var).ok()).into_owned())
    }
}

/// `<config home>/user-dirs.dirs`, see [`xdg::config`].
pub fn user_dirs_path(env: &Env) -> Option<PathBuf> {
    xdg::config(env).map(|mut path| {
        path.push(USER_DIRS_FILE);
        path
    })
}

fn resolve(path: &Path, dir_name: &str) -> Lookup {
    let key = key_for(dir_name);
    match UserDirs::load(path) {
        Ok(dirs) => match dirs.get_key(&key) {
            Some(value) => {
                trace!(path = %path.display(), key = %key, value, "resolved user directory");
                Lookup::Resolved(value.to_owned())
            }
            None => {
                debug!(path = %path.display(), key = %key, "user directory not configured");
                Lookup::Fallback
            }
        },
        Err(error) => {
            debug!(path = %path.display(), key = %key, %error, "cannot read user directories");
            Lookup::Fallback
        }
    }
}

/// Look `dir_name` up in `<config_home>/user-dirs.dirs`.
pub fn lookup(config_home: impl AsRef<Path>, dir_name: impl AsRef<str>) -> Lookup {
    resolve(
        &config_home.as_ref().join(USER_DIRS_FILE),
        dir_name.as_ref(),
    )
}

/// Look `dir_name` up in the `user-dirs.dirs` of the config home described by `env`.
pub fn lookup_in(env: &Env, dir_name: impl AsRef<str>) -> Lookup {
    match user_dirs_path(env) {
        Some(path) => resolve(&path, dir_name.as_ref()),
        None => {
            debug!(error = %UserDirsError::NoConfigHome, "cannot read user directories");
            Lookup::Fallback
        }
    }
}

/// Get path to the XDG user directory `dir_name` (e.g. `DESKTOP`), or `default`.
///
/// Any failure (no config home, unreadable or malformed file, missing key) returns `default`
/// unchanged. The value is returned as written in the file, without `$HOME` expansion.
///
/// ```rust,no_run
/// use userdirs::{Env, UserDir, get_user_dir};
///
/// let env = Env::new();
/// let desktop = get_user_dir(&env, UserDir::Desktop, Some("/tmp"));
/// let templates = get_user_dir(&env, "TEMPLATES", None);
/// ```
pub fn get_user_dir(
    env: &Env,
    dir_name: impl AsRef<str>,
    default: Option<&str>,
) -> Option<String> {
    lookup_in(env, dir_name).or(default)
}
