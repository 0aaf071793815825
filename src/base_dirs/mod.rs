//! Standard per-application directories.
//!
//! Resolves the XDG base directories (`$XDG_DATA_HOME`, `$XDG_CONFIG_DIRS`, ...) with
//! per-platform fallbacks, and scopes them under a vendor/application pair.
//!
//! ```rust,no_run
//! # use basedirs::base_dirs::{app::AppDirs, xdg};
//! let shared = xdg::data_dirs();
//!
//! let app = AppDirs::new("Acme", "Tool");
//! let config = app.config_home();
//! let theme = app.query_data("themes/dark.toml");
//! ```

pub mod app;
pub mod defaults;
pub mod xdg;

pub use app::{AppDirs, AppIdentity, Kind};
pub use defaults::{Platform, PlatformDefaults};
pub use xdg::{BaseDirs, PATH_LIST_SEPARATOR, split_path_list, split_path_list_os};
