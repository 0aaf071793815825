//! Application-scoped base directories.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, instrument};

use crate::base_dirs::defaults::{Platform, PlatformDefaults};
use crate::base_dirs::xdg::BaseDirs;
use crate::os::env::{EnvSource, ProcessEnv};

/// Vendor and application name of the calling program.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct AppIdentity {
    vendor: String,
    application: String,
}

impl AppIdentity {
    /// Identity of `application` published by `vendor`.
    pub fn new(vendor: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            application: application.into(),
        }
    }

    /// Organisation segment, joined first.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Product segment, joined after the vendor.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// `base/vendor/application`.
    ///
    /// Roots and drive prefixes in either name are dropped, so `base` is always kept.
    pub fn scope(&self, base: impl AsRef<Path>) -> PathBuf {
        let mut path = base.as_ref().to_path_buf();
        append_relative(&mut path, &self.vendor);
        append_relative(&mut path, &self.application);
        path
    }
}

fn append_relative(path: &mut PathBuf, segment: &str) {
    path.extend(
        Path::new(segment)
            .components()
            .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_))),
    );
}

/// Which family of directories [`AppDirs::query`] searches.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Kind {
    /// `$XDG_DATA_HOME`, then `$XDG_DATA_DIRS`.
    Data,
    /// `$XDG_CONFIG_HOME`, then `$XDG_CONFIG_DIRS`.
    Config,
    /// `$XDG_CACHE_HOME` only.
    Cache,
}

/// [`BaseDirs`] with every result scoped under `vendor/application`.
///
/// ```rust,no_run
/// # use basedirs::base_dirs::app::AppDirs;
/// let app = AppDirs::new("Acme", "Tool");
/// let cache = app.cache_home(); // e.g. ~/.cache/Acme/Tool
/// if let Some(settings) = app.query_config("settings.toml") {
///     println!("loading {}", settings.display());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AppDirs<D = Platform, E = ProcessEnv> {
    base: BaseDirs<D, E>,
    identity: AppIdentity,
}

impl AppDirs {
    /// Scope the default resolver to `vendor`/`application`.
    pub fn new(vendor: impl Into<String>, application: impl Into<String>) -> Self {
        Self::with_base(BaseDirs::new(), AppIdentity::new(vendor, application))
    }
}

impl<D: PlatformDefaults, E: EnvSource> AppDirs<D, E> {
    /// Scope `base` to `identity`.
    pub fn with_base(base: BaseDirs<D, E>, identity: AppIdentity) -> Self {
        Self { base, identity }
    }

    /// Vendor and application this facade is scoped to.
    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    /// Unscoped resolver underneath.
    pub fn base(&self) -> &BaseDirs<D, E> {
        &self.base
    }

    fn scope_all(&self, dirs: Vec<PathBuf>) -> Vec<PathBuf> {
        dirs.into_iter().map(|dir| self.identity.scope(dir)).collect()
    }

    /// Application directory under `$XDG_DATA_HOME`.
    pub fn data_home(&self) -> PathBuf {
        self.identity.scope(self.base.data_home())
    }

    /// Application directories under each of `$XDG_DATA_DIRS`.
    pub fn data_dirs(&self) -> Vec<PathBuf> {
        self.scope_all(self.base.data_dirs())
    }

    /// Application directory under `$XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.identity.scope(self.base.config_home())
    }

    /// Application directories under each of `$XDG_CONFIG_DIRS`.
    pub fn config_dirs(&self) -> Vec<PathBuf> {
        self.scope_all(self.base.config_dirs())
    }

    /// Application directory under `$XDG_CACHE_HOME`.
    pub fn cache_home(&self) -> PathBuf {
        self.identity.scope(self.base.cache_home())
    }

    /// Directories searched by [`AppDirs::query`] for `kind`, in search order.
    pub fn search_paths(&self, kind: Kind) -> Vec<PathBuf> {
        match kind {
            Kind::Data => std::iter::once(self.data_home())
                .chain(self.data_dirs())
                .collect(),
            Kind::Config => std::iter::once(self.config_home())
                .chain(self.config_dirs())
                .collect(),
            Kind::Cache => vec![self.cache_home()],
        }
    }

    /// Find the first existing `relative` file among [`AppDirs::search_paths`].
    ///
    /// # Returns
    /// Full path of the first match, or [`None`] if no candidate exists.
    #[instrument(level = "debug", skip(self, relative), fields(file = %relative.as_ref().display()))]
    pub fn query(&self, kind: Kind, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let relative = relative.as_ref();
        let found = self
            .search_paths(kind)
            .into_iter()
            .map(|dir| dir.join(relative))
            .find(|candidate| candidate.exists());
        if let Some(path) = &found {
            debug!(path = %path.display(), "found");
        }
        found
    }

    /// [`AppDirs::query`] over the data directories.
    pub fn query_data(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        self.query(Kind::Data, relative)
    }

    /// [`AppDirs::query`] over the config directories.
    pub fn query_config(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        self.query(Kind::Config, relative)
    }

    /// [`AppDirs::query`] over the cache directory.
    pub fn query_cache(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        self.query(Kind::Cache, relative)
    }
}
