//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AtriumResult;

use super::loader::{self, ConfigWarning};

/// Top-level configuration, one section per portal component.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub documents: DocumentsConfig,

    #[serde(default)]
    pub branding: BrandingConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> AtriumResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and surface unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> AtriumResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }
}

/// Navigation menu configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Selector of the element the menu mounts into
    #[serde(default = "default_nav_container")]
    pub container: String,

    /// GUID of the navigation list
    #[serde(default)]
    pub list_guid: Option<String>,

    /// Force click-toggle behavior even outside an embedded frame
    #[serde(default)]
    pub force_click_behavior: bool,

    /// Hover expand/collapse delay in milliseconds
    #[serde(default = "default_hover_delay_ms")]
    pub hover_delay_ms: u64,

    /// Maximum menu depth (1 = main, 2 = sub, 3 = sub-sub)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Keep parent items with children inside the host frame
    #[serde(default)]
    pub disable_parent_item_links: bool,

    #[serde(default)]
    pub edit_button: EditButtonConfig,
}

impl NavigationConfig {
    /// The depth limit is a positive integer; zero coerces to one.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.max(1)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            container: default_nav_container(),
            list_guid: None,
            force_click_behavior: false,
            hover_delay_ms: default_hover_delay_ms(),
            max_depth: default_max_depth(),
            disable_parent_item_links: false,
            edit_button: EditButtonConfig::default(),
        }
    }
}

/// Edit button shown to members of the allowed groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditButtonConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// List editor URL the button opens
    #[serde(default)]
    pub url: Option<String>,

    /// Group names whose members see the button
    #[serde(default)]
    pub allowed_roles: Vec<String>,

    /// Bypass the group check entirely
    #[serde(default)]
    pub show_for_current_user: bool,
}

impl Default for EditButtonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: None,
            allowed_roles: Vec::new(),
            show_for_current_user: false,
        }
    }
}

/// Calendar (upcoming events) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_calendar_container")]
    pub container: String,

    #[serde(default)]
    pub list_guid: Option<String>,

    #[serde(default = "default_calendar_title")]
    pub title: String,

    /// Events per page
    #[serde(default = "default_item_count")]
    pub item_count: usize,

    #[serde(default = "default_true")]
    pub show_pagination: bool,

    #[serde(default)]
    pub add_event_url: Option<String>,

    /// Base URL the per-event detail link is appended to
    #[serde(default)]
    pub edit_event_url: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            container: default_calendar_container(),
            list_guid: None,
            title: default_calendar_title(),
            item_count: default_item_count(),
            show_pagination: true,
            add_event_url: None,
            edit_event_url: None,
            base_url: None,
        }
    }
}

/// Which document library entries to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Combined,
    DocumentsOnly,
    FoldersOnly,
}

/// Row or card layout for the document browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewStyle {
    #[default]
    Rows,
    Cards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    #[default]
    Modified,
    Type,
}

/// Default sort for the document browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub field: SortField,

    #[serde(default)]
    pub ascending: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::Modified,
            ascending: false,
        }
    }
}

/// Document browser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_documents_container")]
    pub container: String,

    #[serde(default)]
    pub list_guid: Option<String>,

    #[serde(default = "default_documents_title")]
    pub title: String,

    #[serde(default)]
    pub view_mode: ViewMode,

    #[serde(default)]
    pub view_style: ViewStyle,

    #[serde(default)]
    pub default_sort: SortConfig,

    #[serde(default)]
    pub add_document_url: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            container: default_documents_container(),
            list_guid: None,
            title: default_documents_title(),
            view_mode: ViewMode::default(),
            view_style: ViewStyle::default(),
            default_sort: SortConfig::default(),
            add_document_url: None,
            base_url: None,
        }
    }
}

/// Branding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Replaces the header title when set
    #[serde(default)]
    pub custom_header: Option<String>,

    #[serde(default = "default_true")]
    pub apply_to_header: bool,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            custom_header: None,
            apply_to_header: true,
        }
    }
}

/// Site root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Fallback origin when detection finds nothing
    #[serde(default)]
    pub root: Option<String>,

    /// Derive the site URL from the page URL's `/sites/...` segment
    #[serde(default = "default_true")]
    pub detect_subsites: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: None,
            detect_subsites: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    #[serde(default)]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

fn default_nav_container() -> String {
    "#menu".to_string()
}

fn default_hover_delay_ms() -> u64 {
    250
}

fn default_max_depth() -> usize {
    3
}

fn default_calendar_container() -> String {
    "#calendar-container".to_string()
}

fn default_calendar_title() -> String {
    "Planning".to_string()
}

fn default_item_count() -> usize {
    4
}

fn default_documents_container() -> String {
    "#document-container".to_string()
}

fn default_documents_title() -> String {
    "Documenten".to_string()
}

fn default_theme() -> String {
    "blue".to_string()
}
