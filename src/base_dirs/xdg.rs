//! XDG Base Directory resolution.
//!
//! Each `$XDG_*` variable wins when set to a non-empty value; otherwise the
//! [`PlatformDefaults`] of the resolver decide. Nothing is cached, every call reads the
//! environment again.

use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::debug;

use crate::base_dirs::app::{AppDirs, AppIdentity};
use crate::base_dirs::defaults::{Platform, PlatformDefaults};
use crate::os::env::{EnvSource, ProcessEnv};

/// Separator of `$XDG_*_DIRS` lists on the compilation target.
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Override for the user data directory.
pub const DATA_HOME: &str = "XDG_DATA_HOME";
/// Override for the system data search list.
pub const DATA_DIRS: &str = "XDG_DATA_DIRS";
/// Override for the user config directory.
pub const CONFIG_HOME: &str = "XDG_CONFIG_HOME";
/// Override for the system config search list.
pub const CONFIG_DIRS: &str = "XDG_CONFIG_DIRS";
/// Override for the user cache directory.
pub const CACHE_HOME: &str = "XDG_CACHE_HOME";

/// Split `value` on `separator`, keeping order.
///
/// Empty segments (leading, trailing or doubled separators) are kept as empty paths.
///
/// ```rust
/// # use basedirs::base_dirs::xdg::split_path_list;
/// # use std::path::PathBuf;
/// assert_eq!(
///     split_path_list("/a:/b", ':'),
///     vec![PathBuf::from("/a"), PathBuf::from("/b")]
/// );
/// ```
pub fn split_path_list(value: &str, separator: char) -> Vec<PathBuf> {
    value.split(separator).map(PathBuf::from).collect()
}

/// [`split_path_list`] for values which need not be UTF-8.
pub fn split_path_list_os(value: &OsStr, separator: char) -> Vec<PathBuf> {
    if let Some(value) = value.to_str() {
        return split_path_list(value, separator);
    }
    let mut buf = [0; 4];
    let separator = separator.encode_utf8(&mut buf).as_bytes();
    let bytes = value.as_encoded_bytes();

    let mut segments = Vec::new();
    let mut start = 0;
    let mut at = 0;
    while at + separator.len() <= bytes.len() {
        if &bytes[at..at + separator.len()] == separator {
            segments.push(&bytes[start..at]);
            at += separator.len();
            start = at;
        } else {
            at += 1;
        }
    }
    segments.push(&bytes[start..]);

    segments
        .into_iter()
        // SAFETY: each segment is cut at the ends of `value` or next to `separator`, which is
        // a non-empty UTF-8 substring.
        .map(|segment| PathBuf::from(unsafe { OsStr::from_encoded_bytes_unchecked(segment) }))
        .collect()
}

/// Resolver of the base directories.
///
/// Generic over where fallbacks come from (`D`) and where variables are read from (`E`).
/// [`BaseDirs::new`] uses the [current platform](Platform::current) and the live process
/// environment.
///
/// ```rust,no_run
/// # use basedirs::base_dirs::xdg::BaseDirs;
/// # use basedirs::base_dirs::defaults::Platform;
/// # use basedirs::os::env::Env;
/// let dirs = BaseDirs::with_env(Env::from_iter([("HOME", "/home/me")]))
///     .with_defaults(Platform::Unix);
/// let config = dirs.config_home();
/// let app_config = dirs.app("Acme", "Tool").config_home();
/// ```
#[derive(Debug, Clone)]
pub struct BaseDirs<D = Platform, E = ProcessEnv> {
    defaults: D,
    env: E,
    separator: char,
}

impl BaseDirs {
    /// Resolver for the current platform, reading the process environment.
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }
}

impl Default for BaseDirs {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvSource> BaseDirs<Platform, E> {
    /// Resolver for the current platform, reading variables from `env`.
    pub fn with_env(env: E) -> Self {
        Self {
            defaults: Platform::current(),
            env,
            separator: PATH_LIST_SEPARATOR,
        }
    }
}

impl<D: PlatformDefaults, E: EnvSource> BaseDirs<D, E> {
    /// Replace the fallback provider.
    pub fn with_defaults<T: PlatformDefaults>(self, defaults: T) -> BaseDirs<T, E> {
        BaseDirs {
            defaults,
            env: self.env,
            separator: self.separator,
        }
    }

    /// Replace the separator used to split `$XDG_*_DIRS`.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Fallback provider in use.
    pub fn defaults(&self) -> &D {
        &self.defaults
    }

    /// Source the `$XDG_*` variables are read from.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Separator used to split `$XDG_*_DIRS`.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Scope this resolver to `vendor`/`application`.
    pub fn app(self, vendor: impl Into<String>, application: impl Into<String>) -> AppDirs<D, E> {
        AppDirs::with_base(self, AppIdentity::new(vendor, application))
    }

    fn home(&self, key: &str, fallback: impl FnOnce(&D, &dyn EnvSource) -> PathBuf) -> PathBuf {
        match self.env.non_empty_os(OsStr::new(key)) {
            Some(value) => PathBuf::from(value),
            None => {
                debug!(var = key, "unset, using platform default");
                let env: &dyn EnvSource = &self.env;
                fallback(&self.defaults, env)
            }
        }
    }

    fn dirs(
        &self,
        key: &str,
        fallback: impl FnOnce(&D, &dyn EnvSource) -> Vec<PathBuf>,
    ) -> Vec<PathBuf> {
        let dirs = self
            .env
            .non_empty_os(OsStr::new(key))
            .map(|value| split_path_list_os(&value, self.separator))
            .unwrap_or_default();
        if dirs.is_empty() {
            debug!(var = key, "unset, using platform default");
            let env: &dyn EnvSource = &self.env;
            fallback(&self.defaults, env)
        } else {
            dirs
        }
    }

    /// Get proper path for `$XDG_DATA_HOME`.
    pub fn data_home(&self) -> PathBuf {
        self.home(DATA_HOME, D::data_home)
    }

    /// Get proper list of paths for `$XDG_DATA_DIRS`, most important first.
    pub fn data_dirs(&self) -> Vec<PathBuf> {
        self.dirs(DATA_DIRS, D::data_dirs)
    }

    /// Get proper path for `$XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.home(CONFIG_HOME, D::config_home)
    }

    /// Get proper list of paths for `$XDG_CONFIG_DIRS`, most important first.
    pub fn config_dirs(&self) -> Vec<PathBuf> {
        self.dirs(CONFIG_DIRS, D::config_dirs)
    }

    /// Get proper path for `$XDG_CACHE_HOME`.
    pub fn cache_home(&self) -> PathBuf {
        self.home(CACHE_HOME, D::cache_home)
    }
}

/// [`BaseDirs::data_home`] of the default resolver.
pub fn data_home() -> PathBuf {
    BaseDirs::new().data_home()
}

/// [`BaseDirs::data_dirs`] of the default resolver.
pub fn data_dirs() -> Vec<PathBuf> {
    BaseDirs::new().data_dirs()
}

/// [`BaseDirs::config_home`] of the default resolver.
pub fn config_home() -> PathBuf {
    BaseDirs::new().config_home()
}

/// [`BaseDirs::config_dirs`] of the default resolver.
pub fn config_dirs() -> Vec<PathBuf> {
    BaseDirs::new().config_dirs()
}

/// [`BaseDirs::cache_home`] of the default resolver.
pub fn cache_home() -> PathBuf {
    BaseDirs::new().cache_home()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::os::env::Env;

    /// Fallbacks returning fixed values.
    #[derive(Debug, Clone)]
    pub(crate) struct Fixed {
        pub home: PathBuf,
        pub dirs: Vec<PathBuf>,
    }

    impl Fixed {
        pub(crate) fn new(home: &str, dirs: &[&str]) -> Self {
            Self {
                home: PathBuf::from(home),
                dirs: dirs.iter().map(PathBuf::from).collect(),
            }
        }
    }

    impl PlatformDefaults for Fixed {
        fn data_home(&self, _: &dyn EnvSource) -> PathBuf {
            self.home.clone()
        }
        fn data_dirs(&self, _: &dyn EnvSource) -> Vec<PathBuf> {
            self.dirs.clone()
        }
        fn config_home(&self, _: &dyn EnvSource) -> PathBuf {
            self.home.clone()
        }
        fn config_dirs(&self, _: &dyn EnvSource) -> Vec<PathBuf> {
            self.dirs.clone()
        }
        fn cache_home(&self, _: &dyn EnvSource) -> PathBuf {
            self.home.clone()
        }
    }

    /// Fallbacks which must never be consulted.
    struct Unreachable;

    impl PlatformDefaults for Unreachable {
        fn data_home(&self, _: &dyn EnvSource) -> PathBuf {
            panic!("data_home default consulted")
        }
        fn data_dirs(&self, _: &dyn EnvSource) -> Vec<PathBuf> {
            panic!("data_dirs default consulted")
        }
        fn config_home(&self, _: &dyn EnvSource) -> PathBuf {
            panic!("config_home default consulted")
        }
        fn config_dirs(&self, _: &dyn EnvSource) -> Vec<PathBuf> {
            panic!("config_dirs default consulted")
        }
        fn cache_home(&self, _: &dyn EnvSource) -> PathBuf {
            panic!("cache_home default consulted")
        }
    }

    fn resolver<D: PlatformDefaults>(
        vars: &[(&str, &str)],
        defaults: D,
    ) -> BaseDirs<D, Env> {
        BaseDirs::with_env(Env::from_iter(vars.iter().copied()))
            .with_defaults(defaults)
            .with_separator(':')
    }

    fn paths(raw: &[&str]) -> Vec<PathBuf> {
        raw.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn unset_falls_through_to_defaults() {
        let dirs = resolver(&[], Fixed::new("/some/path", &["/some/path", "/some/other/path"]));
        assert_eq!(dirs.data_home(), PathBuf::from("/some/path"));
        assert_eq!(dirs.config_home(), PathBuf::from("/some/path"));
        assert_eq!(dirs.cache_home(), PathBuf::from("/some/path"));
        assert_eq!(dirs.data_dirs(), paths(&["/some/path", "/some/other/path"]));
        assert_eq!(dirs.config_dirs(), paths(&["/some/path", "/some/other/path"]));
    }

    #[test]
    fn empty_falls_through_to_defaults() {
        let dirs = resolver(
            &[
                (DATA_HOME, ""),
                (DATA_DIRS, ""),
                (CONFIG_HOME, ""),
                (CONFIG_DIRS, ""),
                (CACHE_HOME, ""),
            ],
            Fixed::new("/default", &["/default/dir"]),
        );
        assert_eq!(dirs.data_home(), PathBuf::from("/default"));
        assert_eq!(dirs.config_home(), PathBuf::from("/default"));
        assert_eq!(dirs.cache_home(), PathBuf::from("/default"));
        assert_eq!(dirs.data_dirs(), paths(&["/default/dir"]));
        assert_eq!(dirs.config_dirs(), paths(&["/default/dir"]));
    }

    #[test]
    fn override_wins_without_consulting_defaults() {
        let dirs = resolver(
            &[
                (DATA_HOME, "/data/home"),
                (DATA_DIRS, "/data/a:/data/b"),
                (CONFIG_HOME, "/config/home"),
                (CONFIG_DIRS, "/config/a:/config/b"),
                (CACHE_HOME, "/cache/home"),
            ],
            Unreachable,
        );
        assert_eq!(dirs.data_home(), PathBuf::from("/data/home"));
        assert_eq!(dirs.data_dirs(), paths(&["/data/a", "/data/b"]));
        assert_eq!(dirs.config_home(), PathBuf::from("/config/home"));
        assert_eq!(dirs.config_dirs(), paths(&["/config/a", "/config/b"]));
        assert_eq!(dirs.cache_home(), PathBuf::from("/cache/home"));
    }

    #[test]
    fn override_is_taken_verbatim() {
        let dirs = resolver(&[(CONFIG_HOME, "relative/not-there")], Unreachable);
        assert_eq!(dirs.config_home(), PathBuf::from("relative/not-there"));
    }

    #[test]
    fn split_keeps_order() {
        assert_eq!(split_path_list("/a:/b", ':'), paths(&["/a", "/b"]));
        assert_eq!(split_path_list("/b;/a", ';'), paths(&["/b", "/a"]));
    }

    #[test]
    fn split_keeps_empty_segments() {
        assert_eq!(split_path_list(":/a::/b:", ':'), paths(&["", "/a", "", "/b", ""]));
    }

    #[test]
    fn dirs_use_configured_separator() {
        let dirs = resolver(&[(DATA_DIRS, "/a;/b")], Unreachable).with_separator(';');
        assert_eq!(dirs.data_dirs(), paths(&["/a", "/b"]));

        let dirs = resolver(&[(DATA_DIRS, "/a;/b")], Unreachable);
        assert_eq!(dirs.data_dirs(), paths(&["/a;/b"]));
    }

    #[test]
    fn separator_follows_target() {
        if cfg!(windows) {
            assert_eq!(PATH_LIST_SEPARATOR, ';');
        } else {
            assert_eq!(PATH_LIST_SEPARATOR, ':');
        }
        assert_eq!(BaseDirs::new().separator(), PATH_LIST_SEPARATOR);
    }

    #[test]
    fn split_os_matches_str_split() {
        assert_eq!(
            split_path_list_os(OsStr::new(":/a::/b"), ':'),
            split_path_list(":/a::/b", ':')
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_dirs_override_is_split() {
        use std::ffi::OsString;
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let env = Env::from_iter([(
            OsString::from(DATA_DIRS),
            OsString::from_vec(b"/a\xff:/b::/c\xfe".to_vec()),
        )]);
        let dirs = BaseDirs::with_env(env)
            .with_defaults(Unreachable)
            .with_separator(':');
        assert_eq!(
            dirs.data_dirs(),
            vec![
                PathBuf::from(OsStr::from_bytes(b"/a\xff")),
                PathBuf::from("/b"),
                PathBuf::new(),
                PathBuf::from(OsStr::from_bytes(b"/c\xfe")),
            ]
        );
    }

    #[test]
    fn platform_defaults_through_resolver() {
        let dirs = resolver(&[("HOME", "/home/me")], Platform::Unix);
        assert_eq!(dirs.data_home(), PathBuf::from("/home/me/.local/share"));
        assert_eq!(dirs.config_dirs(), paths(&["/etc/xdg"]));
        assert_eq!(dirs.cache_home(), PathBuf::from("/home/me/.cache"));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let dirs = resolver(
            &[(DATA_DIRS, "/x:/y"), (CACHE_HOME, "/c")],
            Fixed::new("/d", &["/dd"]),
        );
        assert_eq!(dirs.data_dirs(), dirs.data_dirs());
        assert_eq!(dirs.cache_home(), dirs.cache_home());
        assert_eq!(dirs.config_home(), dirs.config_home());
    }
}
