//! Configuration for the portal chrome
//!
//! Three layers, later wins:
//! 1. TOML file (`atrium.toml`), unknown keys warn instead of failing
//! 2. Host-page body attributes (`data-*`, `theme-*` class)
//! 3. `ATRIUM_*` environment variables

mod loader;
mod markup;
mod types;

pub use loader::{load_or_default, load_with_warnings, with_env_overrides, ConfigWarning};
pub use markup::apply_body_attributes;
pub use types::{
    BrandingConfig, CalendarConfig, Config, DebugConfig, DocumentsConfig, EditButtonConfig,
    NavigationConfig, SiteConfig, SortConfig, SortField, ViewMode, ViewStyle,
};
