//! Document library browser
//!
//! Files and folders from one library folder, with a view-mode filter
//! (combined, documents only, folders only), case-insensitive search over
//! file name and title, and sorting by name, modified date, or type. Folders
//! sort under the synthetic type key "folder".

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDateTime};

use crate::config::{DocumentsConfig, SortConfig, SortField, ViewMode, ViewStyle};
use crate::dom::Element;
use crate::models::DocumentRecord;

const NO_DOCUMENTS_MESSAGE: &str = "Geen documenten gevonden";

/// Material icon per file type.
fn file_icon(doc: &DocumentRecord) -> &'static str {
    if doc.is_folder() {
        return "folder";
    }
    match doc.type_key().as_str() {
        "doc" | "docx" => "description",
        "xls" | "xlsx" | "csv" => "table_chart",
        "ppt" | "pptx" => "slideshow",
        "pdf" => "picture_as_pdf",
        "png" | "jpg" | "jpeg" | "gif" | "bmp" => "image",
        "zip" | "rar" | "7z" => "folder_zip",
        _ => "insert_drive_file",
    }
}

/// One filtered, sorted view over a fetched folder listing.
pub struct DocumentBrowser<'a> {
    config: &'a DocumentsConfig,
    documents: Vec<DocumentRecord>,
    /// Server-relative path of the folder being browsed; empty at the root
    folder: String,
    search: String,
    view_mode: ViewMode,
    sort: SortConfig,
}

impl<'a> DocumentBrowser<'a> {
    pub fn new(config: &'a DocumentsConfig, documents: Vec<DocumentRecord>) -> Self {
        Self {
            documents,
            folder: String::new(),
            search: String::new(),
            view_mode: config.view_mode,
            sort: config.default_sort,
            config,
        }
    }

    pub fn enter_folder(&mut self, server_relative: impl Into<String>) {
        self.folder = server_relative.into();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into().to_lowercase();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
    }

    pub fn in_folder(&self) -> bool {
        !self.folder.is_empty()
    }

    /// Apply view mode, search, and sort. Comparisons that cannot rank a pair
    /// leave it in input order.
    pub fn filtered(&self) -> Vec<&DocumentRecord> {
        let mut docs: Vec<&DocumentRecord> = self
            .documents
            .iter()
            .filter(|doc| match self.view_mode {
                ViewMode::Combined => true,
                ViewMode::DocumentsOnly => !doc.is_folder(),
                ViewMode::FoldersOnly => doc.is_folder(),
            })
            .filter(|doc| {
                if self.search.is_empty() {
                    return true;
                }
                doc.file_name().to_lowercase().contains(&self.search)
                    || doc
                        .title
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&self.search)
            })
            .collect();

        docs.sort_by(|a, b| {
            let ordering = match self.sort.field {
                SortField::Name => a
                    .file_name()
                    .to_lowercase()
                    .cmp(&b.file_name().to_lowercase()),
                SortField::Modified => match (a.modified_at(), b.modified_at()) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Greater,
                    (None, Some(_)) => Ordering::Less,
                    (None, None) => Ordering::Equal,
                },
                SortField::Type => a.type_key().cmp(&b.type_key()),
            };
            if self.sort.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        docs
    }

    /// Render the browser into its mount element.
    pub fn render(&self) -> Element {
        let docs = self.filtered();
        let mut container = Element::new("div").attr("id", "doc-list");

        if self.in_folder() {
            container.push(self.render_breadcrumb());
        }

        if docs.is_empty() {
            container.push(
                Element::new("div")
                    .class("p-3 bg-gray-50 text-gray-500 rounded-md border border-gray-200 text-center")
                    .text(NO_DOCUMENTS_MESSAGE),
            );
            return container;
        }

        match self.config.view_style {
            ViewStyle::Rows => {
                let mut list = Element::new("ul").class("divide-y divide-gray-100");
                for doc in &docs {
                    list.push(self.render_row(doc));
                }
                container.push(list);
            }
            ViewStyle::Cards => {
                let mut grid = Element::new("div").class("grid grid-cols-2 gap-3");
                for doc in &docs {
                    grid.push(self.render_card(doc));
                }
                container.push(grid);
            }
        }
        container
    }

    fn render_breadcrumb(&self) -> Element {
        let folder_name = self.folder.rsplit('/').next().unwrap_or(&self.folder);
        Element::new("div")
            .class("flex items-center mb-2 text-sm text-gray-600")
            .child(
                Element::new("button")
                    .class("flex items-center mr-2 hover:text-gray-900")
                    .attr("data-action", "folder-up")
                    .child(
                        Element::new("span")
                            .class("material-icons text-sm mr-1")
                            .text("arrow_back"),
                    )
                    .child(Element::new("span").text("Terug")),
            )
            .child(
                Element::new("span")
                    .class("font-medium")
                    .text(folder_name),
            )
    }

    fn render_row(&self, doc: &DocumentRecord) -> Element {
        let mut row = Element::new("li")
            .class("flex items-center py-2 px-2 hover:bg-gray-50 rounded")
            .child(
                Element::new("span")
                    .class("material-icons mr-3 text-gray-500")
                    .text(file_icon(doc)),
            )
            .child(self.render_name(doc));

        let mut meta = String::new();
        if let Some(modified) = doc.modified_at() {
            meta.push_str(&format_date_short(modified));
        }
        if let Some(editor) = doc
            .editor
            .as_ref()
            .and_then(|e| e.title.as_deref())
            .filter(|t| !t.is_empty())
        {
            if !meta.is_empty() {
                meta.push_str(" \u{2022} ");
            }
            meta.push_str(editor);
        }
        if let Some(size) = doc
            .file_size_display
            .as_deref()
            .filter(|s| !s.is_empty() && !doc.is_folder())
        {
            if !meta.is_empty() {
                meta.push_str(" \u{2022} ");
            }
            meta.push_str(&format_size(size));
        }
        if !meta.is_empty() {
            row.push(
                Element::new("span")
                    .class("ml-auto text-xs text-gray-400")
                    .text(meta),
            );
        }
        row
    }

    fn render_card(&self, doc: &DocumentRecord) -> Element {
        Element::new("div")
            .class("p-3 border border-gray-200 rounded-md hover:shadow transition-all text-center")
            .child(
                Element::new("span")
                    .class("material-icons text-3xl text-gray-500")
                    .text(file_icon(doc)),
            )
            .child(self.render_name(doc).class("block text-sm mt-1 truncate"))
    }

    fn render_name(&self, doc: &DocumentRecord) -> Element {
        let name = doc.file_name();
        if doc.is_folder() {
            return Element::new("a")
                .class("font-medium cursor-pointer")
                .attr("href", "#")
                .attr(
                    "data-folder",
                    doc.file_ref.as_deref().unwrap_or(name).to_string(),
                )
                .text(name);
        }

        let href = doc
            .file
            .as_ref()
            .and_then(|f| f.server_relative_url.as_deref())
            .or(doc.file_ref.as_deref());
        match href {
            Some(url) => Element::new("a")
                .attr("href", url)
                .attr("target", "_blank")
                .class("hover:underline")
                .text(name),
            None => Element::new("span").text(name),
        }
    }
}

fn format_date_short(dt: NaiveDateTime) -> String {
    format!("{:02}-{:02}-{}", dt.day(), dt.month(), dt.year())
}

/// The endpoint reports the size as a byte count in a string.
fn format_size(raw: &str) -> String {
    let Ok(bytes) = raw.trim().parse::<u64>() else {
        return raw.to_string();
    };
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{} kB", bytes / 1024)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
