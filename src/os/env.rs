use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

use thiserror::Error;

/// Source of environmental variables read during directory resolution.
///
/// Every resolution call goes through this trait, so swapping the source (a live process
/// environment or a frozen [`Env`] snapshot) changes what the resolver observes.
pub trait EnvSource {
    /// Raw value of `key`, or [`None`] if it is not set.
    fn var_os(&self, key: &OsStr) -> Option<OsString>;

    /// Value of `key`, if it is set to a non-empty value.
    fn non_empty_os(&self, key: &OsStr) -> Option<OsString> {
        self.var_os(key).filter(|value| !value.is_empty())
    }

    /// Value of `key` as a non-empty UTF-8 string.
    ///
    /// # Returns
    /// `Result<String, EnvStrError>`. See [`EnvStrError`] for failure cases.
    fn non_empty_str(&self, key: &OsStr) -> Result<String, EnvStrError> {
        let value = self
            .var_os(key)
            .ok_or_else(|| EnvStrError::Missing(key.to_os_string()))?;
        if value.is_empty() {
            return Err(EnvStrError::Empty(key.to_os_string()));
        }
        value
            .into_string()
            .map_err(|_| EnvStrError::NonUTF8(key.to_os_string()))
    }
}

/// Live view of the process environment.
///
/// Reads [`std::env::var_os`] on every lookup, so changes made between calls are observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, key: &OsStr) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Frozen copy of environmental variables for a [`BaseDirs`](crate::base_dirs::BaseDirs).
///
/// Lookups never see later changes to the process environment until [`Env::reload`]. An
/// exact-name miss on Windows retries with the ASCII upper-cased name, so `AppData` answers
/// for `APPDATA`.
#[derive(Debug, Clone)]
pub struct Env {
    vars: HashMap<OsString, OsString>,
    /// Same values, keyed by upper-cased name.
    folded: HashMap<OsString, OsString>,
}

/// Why [`EnvSource::non_empty_str`] found no usable value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvStrError {
    /// The variable is not set.
    #[error("there is no environmental variable `${0:?}`")]
    Missing(OsString),

    /// The variable is set to an empty string.
    #[error("environmental variable `${0:?}` is empty")]
    Empty(OsString),

    /// The variable holds bytes that are not UTF-8.
    #[error("environmental variable `${0:?}` is not an UTF-8 string")]
    NonUTF8(OsString),
}

impl Env {
    /// Capture the current process environment.
    pub fn new() -> Self {
        Self::new_from(std::env::vars_os().collect())
    }

    /// Snapshot holding exactly `vars`.
    pub fn new_from(vars: HashMap<OsString, OsString>) -> Self {
        let folded = vars
            .iter()
            .map(|(key, value)| (key.to_ascii_uppercase(), value.clone()))
            .collect();
        Self { vars, folded }
    }

    /// Replace the snapshot with the current process environment.
    pub fn reload(&mut self) {
        *self = Self::new();
    }

    /// Value recorded for `key`, or [`None`] if the snapshot has no such variable.
    ///
    /// # Examples
    /// ```rust
    /// use basedirs::os::env::Env;
    /// use std::ffi::OsStr;
    ///
    /// let env = Env::from_iter([("XDG_CACHE_HOME", "/tmp/cache")]);
    /// assert_eq!(env.get_os("XDG_CACHE_HOME"), Some(OsStr::new("/tmp/cache")));
    /// assert_eq!(env.get_os("XDG_DATA_HOME"), None);
    /// ```
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        self.vars
            .get(key)
            .or_else(|| {
                cfg!(windows)
                    .then(|| self.folded.get(&key.to_ascii_uppercase()))
                    .flatten()
            })
            .map(OsString::as_os_str)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvSource for Env {
    fn var_os(&self, key: &OsStr) -> Option<OsString> {
        self.get_os(key).map(OsStr::to_os_string)
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
