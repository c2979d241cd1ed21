//! Fallback navigation
//!
//! When the list endpoint cannot be reached the portal still needs a usable
//! menu. These records point at the standard site surfaces and go through the
//! regular tree builder and renderer.

use crate::models::{LinkField, MenuItemRecord};

/// Standard site navigation, rooted at `site_url`.
pub fn fallback_records(site_url: &str) -> Vec<MenuItemRecord> {
    vec![
        record(1, "Home", site_url.to_string(), "home", None, 1),
        record(
            2,
            "Documents",
            format!("{site_url}/Shared%20Documents"),
            "description",
            None,
            2,
        ),
        record(
            21,
            "Shared Files",
            format!("{site_url}/Shared%20Documents/Forms/AllItems.aspx"),
            "folder_shared",
            Some(2),
            1,
        ),
        record(
            211,
            "Recent",
            format!("{site_url}/Shared%20Documents"),
            "schedule",
            Some(21),
            1,
        ),
        record(
            3,
            "Lists",
            format!("{site_url}/_layouts/15/viewlsts.aspx"),
            "format_list_bulleted",
            None,
            3,
        ),
    ]
}

fn record(
    id: i64,
    title: &str,
    url: String,
    icon: &str,
    parent_id: Option<i64>,
    order: i64,
) -> MenuItemRecord {
    MenuItemRecord {
        id,
        title: Some(title.to_string()),
        url: Some(LinkField::Plain(url)),
        note: None,
        icon: Some(icon.to_string()),
        parent_id,
        order: Some(order),
    }
}
