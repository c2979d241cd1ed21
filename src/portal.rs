//! Portal page assembly
//!
//! Ties the components together: resolves the site URL, builds and renders
//! the menu, places the header with the brand gradient, decides on the edit
//! button, and produces the full document. Fetch failures degrade to a
//! visible error row plus the fallback navigation after a delay.

use std::time::Duration;

use crate::calendar::CalendarView;
use crate::config::Config;
use crate::diag::DiagnosticSink;
use crate::documents::DocumentBrowser;
use crate::dom::Element;
use crate::error::{AtriumError, AtriumResult};
use crate::fetch::{self, detect_site_url};
use crate::menu::{
    build_forest, fallback_records, render_forest, InteractionClock, InteractionMode,
    MenuInteraction, MenuNode, RenderContext,
};
use crate::models::{DocumentRecord, EventRecord, MenuItemRecord};
use crate::theme;

/// Delay before the fallback navigation replaces a failed menu fetch.
pub const FALLBACK_DELAY_MS: u64 = 3000;

/// Facts about the hosting page, separate from configuration.
#[derive(Debug, Clone, Default)]
pub struct PortalContext {
    /// Running inside a host frame
    pub embedded: bool,
    /// Absolute URL of the page, used for site detection
    pub page_url: Option<String>,
    /// Group names of the current user, for the edit button check
    pub user_groups: Vec<String>,
}

/// One portal instance: configuration plus page context.
pub struct Portal {
    pub config: Config,
    pub context: PortalContext,
}

impl Portal {
    pub fn new(config: Config, context: PortalContext) -> Self {
        Self { config, context }
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        InteractionMode::choose(
            self.context.embedded,
            self.config.navigation.force_click_behavior,
        )
    }

    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.config.navigation.hover_delay_ms)
    }

    /// Site URL for list queries and fallback links.
    pub fn site_url(&self) -> Option<String> {
        let root = self.config.site.root.as_deref();
        if !self.config.site.detect_subsites {
            return root.map(str::to_string);
        }
        match self.context.page_url.as_deref() {
            Some(page) => detect_site_url(page, root),
            None => root.map(str::to_string),
        }
    }

    /// Menu list query URL.
    pub fn menu_url(&self) -> AtriumResult<String> {
        let guid = self
            .config
            .navigation
            .list_guid
            .as_deref()
            .ok_or(AtriumError::MissingListGuid {
                component: "navigation",
            })?;
        let site = self.site_url().ok_or(AtriumError::Fetch {
            message: "no site URL available".to_string(),
        })?;
        Ok(fetch::menu_items_url(&site, guid))
    }

    /// Events query URL for one page.
    pub fn events_url(&self, today: chrono::NaiveDate, page: usize) -> AtriumResult<String> {
        let guid = self
            .config
            .calendar
            .list_guid
            .as_deref()
            .ok_or(AtriumError::MissingListGuid {
                component: "calendar",
            })?;
        let site = self
            .config
            .calendar
            .base_url
            .clone()
            .or_else(|| self.site_url())
            .ok_or(AtriumError::Fetch {
                message: "no site URL available".to_string(),
            })?;
        Ok(fetch::events_url(
            &site,
            guid,
            today,
            page,
            self.config.calendar.item_count,
        ))
    }

    /// Document library query URL for one folder.
    pub fn documents_url(&self, folder: &str) -> AtriumResult<String> {
        let guid = self
            .config
            .documents
            .list_guid
            .as_deref()
            .ok_or(AtriumError::MissingListGuid {
                component: "documents",
            })?;
        let site = self
            .config
            .documents
            .base_url
            .clone()
            .or_else(|| self.site_url())
            .ok_or(AtriumError::Fetch {
                message: "no site URL available".to_string(),
            })?;
        Ok(fetch::documents_url(&site, guid, folder))
    }

    /// Build the navigation forest from fetched records.
    pub fn build_menu(
        &self,
        records: &[MenuItemRecord],
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<MenuNode> {
        build_forest(
            records,
            self.config.navigation.effective_max_depth(),
            sink,
        )
    }

    /// Fallback forest pointing at the standard site surfaces.
    pub fn fallback_menu(&self, sink: &mut dyn DiagnosticSink) -> Vec<MenuNode> {
        let site = self.site_url().unwrap_or_else(|| "/".to_string());
        self.build_menu(&fallback_records(&site), sink)
    }

    /// Render a forest into menu markup plus its interaction controller.
    pub fn render_menu(&self, forest: &[MenuNode]) -> (Element, MenuInteraction, InteractionClock) {
        let mode = self.interaction_mode();
        let (mut interaction, clock) = MenuInteraction::new(mode, self.hover_delay());
        let ctx = RenderContext {
            max_depth: self.config.navigation.effective_max_depth(),
            theme: self.config.branding.theme.clone(),
            embedded: self.context.embedded,
            disable_parent_links: self.config.navigation.disable_parent_item_links,
            mode,
        };
        let markup = render_forest(forest, &ctx, &mut interaction);
        (markup, interaction, clock)
    }

    /// Header bar with the brand gradient and optional edit button.
    pub fn render_header(&self) -> Element {
        let title = self
            .config
            .branding
            .custom_header
            .as_deref()
            .unwrap_or("Portal");

        let mut header = Element::new("header")
            .attr("id", "page-header")
            .class("flex items-center justify-between px-4 py-3");
        if self.config.branding.apply_to_header {
            header = header.style(
                "background",
                "linear-gradient(90deg, var(--color-header-start), var(--color-header-end))",
            );
        }

        header.push(
            Element::new("h1")
                .attr("id", "header-title")
                .style("color", "white")
                .text(title),
        );

        let mut actions = Element::new("div").attr("id", "header-actions").class("flex");
        if self.can_edit() {
            if let Some(url) = self.edit_button_url() {
                actions.push(
                    Element::new("button")
                        .class("edit-nav-btn")
                        .attr("title", "Edit navigation")
                        .attr("data-edit-url", url)
                        .child(Element::new("span").class("material-icons").text("edit")),
                );
            }
        }
        header.push(actions);
        header
    }

    /// Whether the current user gets the edit button.
    pub fn can_edit(&self) -> bool {
        let button = &self.config.navigation.edit_button;
        if !button.enabled {
            return false;
        }
        if button.show_for_current_user {
            return true;
        }
        self.context
            .user_groups
            .iter()
            .any(|g| button.allowed_roles.contains(g))
    }

    /// Editor URL with list GUID, site URL, and depth appended.
    pub fn edit_button_url(&self) -> Option<String> {
        let mut url = self.config.navigation.edit_button.url.clone()?;
        if let Some(guid) = self.config.navigation.list_guid.as_deref() {
            url = append_query_param(&url, "listGuid", guid);
        }
        if let Some(site) = self.site_url() {
            url = append_query_param(&url, "siteUrl", &fetch::encode_query_component(&site));
        }
        url = append_query_param(
            &url,
            "maxDepth",
            &self.config.navigation.effective_max_depth().to_string(),
        );
        Some(url)
    }

    /// Error row shown in the menu mount when the fetch fails. The host
    /// swaps in the fallback navigation after [`FALLBACK_DELAY_MS`].
    pub fn render_fetch_error(&self, message: &str) -> Element {
        Element::new("div")
            .class("p-3 bg-red-50 text-red-600 rounded-md border border-red-200 text-center")
            .attr("data-fallback-delay-ms", FALLBACK_DELAY_MS.to_string())
            .child(Element::new("div").class("font-medium").text("Fout bij laden"))
            .child(Element::new("div").class("text-sm").text(message))
    }

    /// Assemble the complete document.
    pub fn render_page(
        &self,
        menu_records: Result<&[MenuItemRecord], String>,
        events: Option<Result<&[EventRecord], String>>,
        documents: Option<Vec<DocumentRecord>>,
        sink: &mut dyn DiagnosticSink,
    ) -> String {
        let theme_key = &self.config.branding.theme;

        let mut body_class = format!("theme-{theme_key}");
        if self.context.embedded {
            body_class.push_str(" iframe-mode");
        }
        let mut body = Element::new("body").class(body_class);

        body.push(self.render_header());

        // Navigation mount
        let mut nav = Element::new("nav").attr("id", "menu");
        match menu_records {
            Ok(records) => {
                let forest = self.build_menu(records, sink);
                let (markup, _, _) = self.render_menu(&forest);
                nav.push(markup);
            }
            Err(message) => {
                sink.error("menu", message.clone());
                nav.push(self.render_fetch_error(&message));
                let forest = self.fallback_menu(sink);
                let (markup, _, _) = self.render_menu(&forest);
                nav.push(markup);
            }
        }
        body.push(nav);

        if self.config.calendar.enabled {
            if let Some(events) = events {
                let view = CalendarView::new(&self.config.calendar, 1);
                let mut section = Element::new("section")
                    .attr("id", "calendar-container")
                    .child(
                        Element::new("h2")
                            .class("font-medium mb-2")
                            .text(&self.config.calendar.title),
                    );
                match events {
                    Ok(events) => {
                        section = section.child(view.render_events(events));
                        if let Some(pagination) = view.render_pagination(events.len()) {
                            section.push(pagination);
                        }
                    }
                    Err(message) => {
                        sink.error("calendar", message.clone());
                        section = section.child(view.render_error(&message));
                    }
                }
                body.push(section);
            }
        }

        if self.config.documents.enabled {
            if let Some(documents) = documents {
                let browser = DocumentBrowser::new(&self.config.documents, documents);
                body.push(
                    Element::new("section")
                        .attr("id", "document-container")
                        .child(
                            Element::new("h2")
                                .class("font-medium mb-2")
                                .text(&self.config.documents.title),
                        )
                        .child(browser.render()),
                );
            }
        }

        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><style>{}</style></head>{}</html>",
            theme::style_block(theme_key),
            body.to_html(),
        )
    }
}

/// Append `name=value`, picking the right separator.
fn append_query_param(url: &str, name: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{name}={value}")
}
