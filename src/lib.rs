//! Userdirs - lookup of XDG user directories.
//!
//! This crate resolves entries such as `XDG_DESKTOP_DIR` from the per-user `user-dirs.dirs`
//! file, locating it through the XDG Base Directory rules and an injectable environment.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config_files;
pub mod os;

pub use config_files::user_dirs::{
    Lookup, UnknownUserDir, UserDir, UserDirs, UserDirsError, get_user_dir,
};
pub use os::env::Env;
