//! Basedirs - XDG-style base directory resolution.
//!
//! This crate resolves user data, configuration and cache directories from `$XDG_*`
//! overrides with per-platform fallbacks, optionally scoped to a single application.

pub mod base_dirs;
pub mod os;

pub use base_dirs::{AppDirs, AppIdentity, BaseDirs, Kind, Platform, PlatformDefaults};
