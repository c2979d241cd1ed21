//! Atrium - portal chrome renderer for list-driven intranet sites
//!
//! Atrium turns flat REST list data into the chrome of an intranet portal:
//! a hierarchical navigation menu built from a parent-referencing item list,
//! an upcoming-events calendar, and a filterable document browser, all themed
//! through a small palette of brand colors.

pub mod calendar;
pub mod config;
pub mod diag;
pub mod documents;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod menu;
pub mod models;
pub mod portal;
pub mod theme;

// Re-exports for convenience
pub use config::Config;
pub use diag::{CollectedDiagnostics, Diagnostic, DiagnosticSink, NullSink, Severity};
pub use error::{AtriumError, AtriumResult};
pub use menu::{build_forest, render_forest, MenuInteraction, MenuNode};
pub use models::{DocumentRecord, EventRecord, MenuItemRecord};
pub use portal::{Portal, PortalContext};
