//! Core data models for Atrium
//!
//! Record shapes as they come off the list endpoint:
//! - `MenuItemRecord`: one navigation item from the menu list
//! - `EventRecord`: one calendar entry
//! - `DocumentRecord`: one file or folder from a document library
//! - `ListEnvelope`: the OData-verbose `{"d":{"results":[...]}}` wrapper
//!
//! Fields keep the endpoint's column names; everything beyond the identifier
//! is optional and coerced best-effort.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The `URL` column is either a structured link object or a plain string.
/// Anything else is carried as `Other` and resolves to no URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkField {
    Structured {
        #[serde(rename = "Url")]
        url: String,
        #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Plain(String),
    Other(serde_json::Value),
}

/// One item from the navigation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemRecord {
    #[serde(rename = "Id", alias = "ID")]
    pub id: i64,

    #[serde(rename = "Title", default)]
    pub title: Option<String>,

    #[serde(rename = "URL", default)]
    pub url: Option<LinkField>,

    /// Fallback link column used when `URL` is empty
    #[serde(rename = "Note", default)]
    pub note: Option<String>,

    #[serde(rename = "Icon", default)]
    pub icon: Option<String>,

    /// Absent for root items
    #[serde(rename = "ParentID1", default)]
    pub parent_id: Option<i64>,

    /// Explicit sibling ordering value
    #[serde(rename = "VolgordeID", default)]
    pub order: Option<i64>,
}

impl MenuItemRecord {
    /// Display title, with the same fallback the renderer uses.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// One entry from the events list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Id", alias = "ID")]
    pub id: i64,

    #[serde(rename = "Title", default)]
    pub title: Option<String>,

    #[serde(rename = "EventDate", default)]
    pub event_date: Option<String>,

    /// Alternate start columns seen on older lists
    #[serde(rename = "Start", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(rename = "StartDate", default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(rename = "EndDate", default)]
    pub end_date: Option<String>,
    #[serde(rename = "End", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(rename = "EndTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(rename = "Location", default)]
    pub location: Option<String>,

    #[serde(rename = "Category", default)]
    pub category: Option<String>,
}

impl EventRecord {
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        first_datetime(&[&self.event_date, &self.start, &self.start_date])
    }

    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        first_datetime(&[&self.end_date, &self.end, &self.end_time])
    }
}

/// Editor reference expanded via `$expand=Editor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorRef {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
}

/// File detail expanded via `$expand=File`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FileInfo {
    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "ServerRelativeUrl", default)]
    pub server_relative_url: Option<String>,

    #[serde(rename = "TimeLastModified", default)]
    pub time_last_modified: Option<String>,
}

/// One file or folder from a document library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "Id", alias = "ID")]
    pub id: i64,

    #[serde(rename = "Title", default)]
    pub title: Option<String>,

    #[serde(rename = "FileLeafRef", default)]
    pub file_leaf_ref: Option<String>,

    #[serde(rename = "FileRef", default)]
    pub file_ref: Option<String>,

    #[serde(rename = "Modified", default)]
    pub modified: Option<String>,

    /// 1 = folder, 0 = file
    #[serde(rename = "FSObjType", default)]
    pub fs_obj_type: Option<i64>,

    #[serde(rename = "FileSizeDisplay", default)]
    pub file_size_display: Option<String>,

    #[serde(rename = "Editor", default)]
    pub editor: Option<EditorRef>,

    #[serde(rename = "File", default)]
    pub file: Option<FileInfo>,
}

impl DocumentRecord {
    pub fn is_folder(&self) -> bool {
        self.fs_obj_type == Some(1)
    }

    /// File name, preferring the list column over the expanded file entity.
    pub fn file_name(&self) -> &str {
        if let Some(name) = self.file_leaf_ref.as_deref() {
            return name;
        }
        self.file
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .unwrap_or("")
    }

    pub fn modified_at(&self) -> Option<NaiveDateTime> {
        let file_time = self.file.as_ref().and_then(|f| f.time_last_modified.clone());
        first_datetime(&[&self.modified, &file_time])
    }

    /// Lowercased extension, or "folder" for folders. Used for type sorting.
    pub fn type_key(&self) -> String {
        if self.is_folder() {
            return "folder".to_string();
        }
        self.file_name()
            .rsplit('.')
            .next()
            .unwrap_or("")
            .to_lowercase()
    }
}

/// OData-verbose response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub d: ListResults<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResults<T> {
    pub results: Vec<T>,
}

/// Best-effort datetime coercion: RFC 3339 first, then the bare
/// `2025-01-21T10:00:00` shape the endpoint sometimes returns.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

fn first_datetime(candidates: &[&Option<String>]) -> Option<NaiveDateTime> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find_map(parse_datetime)
}
