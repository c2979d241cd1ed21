//! Golden tests for emitted markup.
//!
//! These pin the exact HTML shapes the host page wires up against, so class
//! or attribute drift shows up as a reviewable diff.

use std::time::Duration;

use insta::assert_snapshot;

use atrium::calendar::CalendarView;
use atrium::config::CalendarConfig;
use atrium::menu::{render_forest, InteractionMode, MenuInteraction, MenuNode, RenderContext};
use atrium::theme::style_block;

fn leaf(id: i64, title: &str) -> MenuNode {
    MenuNode {
        id,
        title: title.to_string(),
        url: Some(format!("/pages/{id}")),
        icon: Some("home".to_string()),
        order: None,
        level: 1,
        children: Vec::new(),
    }
}

fn render(forest: &[MenuNode], ctx: &RenderContext) -> String {
    let (mut interaction, _) = MenuInteraction::new(ctx.mode, Duration::from_millis(250));
    render_forest(forest, ctx, &mut interaction).to_html()
}

#[test]
fn golden_theme_style_block() {
    assert_snapshot!(style_block("green"), @":root{--color-light:#E8F5E9;--color-base:#006400;--color-header-start:#006400;--color-header-end:#004D00;}");
}

#[test]
fn golden_leaf_menu_item() {
    let ctx = RenderContext {
        max_depth: 3,
        theme: "blue".to_string(),
        embedded: false,
        disable_parent_links: false,
        mode: InteractionMode::Click,
    };
    let html = render(&[leaf(1, "Home")], &ctx);

    assert_snapshot!(html, @r#"<ul class="nav__list"><li class="nav__item mb-1 relative" data-menu-id="menu-1" data-menu-level="1"><a class="nav__link flex items-center px-4 py-3 rounded-md hover:bg-white shadow-sm transition-all hover:shadow border border-brand-blue" href="/pages/1"><span class="material-icons mr-3 text-brand-blue text-base">home</span>Home</a></li></ul>"#);
}

#[test]
fn golden_linkless_item_escapes_markup_in_titles() {
    let mut node = leaf(7, "R&D <lab>");
    node.url = None;
    node.icon = None;
    let ctx = RenderContext {
        max_depth: 3,
        theme: "red".to_string(),
        embedded: false,
        disable_parent_links: false,
        mode: InteractionMode::Click,
    };
    let html = render(&[node], &ctx);

    assert_snapshot!(html, @r##"<ul class="nav__list"><li class="nav__item mb-1 relative" data-menu-id="menu-7" data-menu-level="1"><a class="nav__link flex items-center px-4 py-3 rounded-md hover:bg-white shadow-sm transition-all hover:shadow border border-brand-red" href="#" style="cursor:pointer;"><span class="material-icons mr-3 text-brand-red text-base">link</span>R&amp;D &lt;lab&gt;</a></li></ul>"##);
}

#[test]
fn golden_empty_calendar_placeholder() {
    let config = CalendarConfig::default();
    let view = CalendarView::new(&config, 1);
    let html = view.render_events(&[]).to_html();

    assert_snapshot!(html, @r#"<ul class="space-y-2" id="calendar-events"><li class="p-3 bg-gray-50 text-gray-500 rounded-md border border-gray-200 text-center">Geen aankomende gebeurtenissen gevonden</li></ul>"#);
}
