//! Platform fallbacks used when no `XDG_*` override is set.

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::os::env::EnvSource;

/// Fallback locations for the five base directories.
///
/// Queries never fail: a missing `$HOME` (or `%APPDATA%`, ...) produces a path with an
/// empty prefix rather than an error.
pub trait PlatformDefaults {
    /// Fallback for `$XDG_DATA_HOME`.
    fn data_home(&self, env: &dyn EnvSource) -> PathBuf;
    /// Fallback for `$XDG_DATA_DIRS`, in search order.
    fn data_dirs(&self, env: &dyn EnvSource) -> Vec<PathBuf>;
    /// Fallback for `$XDG_CONFIG_HOME`.
    fn config_home(&self, env: &dyn EnvSource) -> PathBuf;
    /// Fallback for `$XDG_CONFIG_DIRS`, in search order.
    fn config_dirs(&self, env: &dyn EnvSource) -> Vec<PathBuf>;
    /// Fallback for `$XDG_CACHE_HOME`.
    fn cache_home(&self, env: &dyn EnvSource) -> PathBuf;
}

/// Operating system family, selecting which fallback table applies.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Platform {
    /// Linux, BSDs and anything else that is neither macOS nor Windows.
    Unix,
    /// Same homes as [`Platform::Unix`], system dirs under `Library/Application Support`.
    MacOS,
    /// `%APPDATA%`, `%PROGRAMDATA%` and `%LOCALAPPDATA%`.
    Windows,
}

impl Platform {
    /// Family of the compilation target.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOS
        } else {
            Self::Unix
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

const MACOS_SYSTEM_DIR: &str = "Library/Application Support";

fn var_path(env: &dyn EnvSource, key: &str) -> PathBuf {
    env.var_os(OsStr::new(key)).map(PathBuf::from).unwrap_or_default()
}

fn under_home(env: &dyn EnvSource, segments: &[&str]) -> PathBuf {
    let mut home = var_path(env, "HOME");
    home.extend(segments);
    home
}

impl PlatformDefaults for Platform {
    fn data_home(&self, env: &dyn EnvSource) -> PathBuf {
        match self {
            Self::Unix | Self::MacOS => under_home(env, &[".local", "share"]),
            Self::Windows => var_path(env, "APPDATA"),
        }
    }

    fn data_dirs(&self, env: &dyn EnvSource) -> Vec<PathBuf> {
        match self {
            Self::Unix => vec![
                PathBuf::from("/usr/local/share/"),
                PathBuf::from("/usr/share/"),
            ],
            Self::MacOS => vec![PathBuf::from(MACOS_SYSTEM_DIR)],
            Self::Windows => vec![var_path(env, "PROGRAMDATA")],
        }
    }

    fn config_home(&self, env: &dyn EnvSource) -> PathBuf {
        match self {
            Self::Unix | Self::MacOS => under_home(env, &[".config"]),
            Self::Windows => var_path(env, "APPDATA"),
        }
    }

    fn config_dirs(&self, env: &dyn EnvSource) -> Vec<PathBuf> {
        match self {
            Self::Unix => vec![PathBuf::from("/etc/xdg")],
            Self::MacOS => vec![PathBuf::from(MACOS_SYSTEM_DIR)],
            Self::Windows => vec![var_path(env, "PROGRAMDATA")],
        }
    }

    fn cache_home(&self, env: &dyn EnvSource) -> PathBuf {
        match self {
            Self::Unix | Self::MacOS => under_home(env, &[".cache"]),
            Self::Windows => var_path(env, "LOCALAPPDATA"),
        }
    }
}
