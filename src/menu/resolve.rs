//! Item URL resolution
//!
//! The `URL` column comes in three shapes; older lists also abuse the `Note`
//! column as a link field. Resolution happens once at ingestion so the
//! renderer never re-sniffs the shape.

use crate::models::{LinkField, MenuItemRecord};

/// Resolve a single navigable URL for an item.
///
/// Precedence: structured link object with a non-empty inner URL, then a
/// plain string URL with non-empty trimmed content, then the Note column.
/// Malformed input resolves to `None`, never an error.
pub fn resolve_url(record: &MenuItemRecord) -> Option<String> {
    match &record.url {
        Some(LinkField::Structured { url, .. }) if !url.is_empty() => {
            return Some(url.clone());
        }
        Some(LinkField::Plain(raw)) if !raw.trim().is_empty() => {
            return Some(raw.trim().to_string());
        }
        _ => {}
    }

    record
        .note
        .as_deref()
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string)
}
