//! Navigation markup
//!
//! Renders the assembled forest as nested `ul`/`li` markup. Presentation
//! varies per tier (classing, icon sizing, indentation) but the structure is
//! the same at every tier. Submenus start collapsed and hidden; the host
//! toggles them through the `data-menu-id` hooks.

use crate::dom::Element;

use super::interact::{InteractionMode, MenuInteraction};
use super::tree::MenuNode;

const DEFAULT_ICON: &str = "link";

/// Per-tier presentation. Tier 3 is the last row because expansion stops at
/// the configured depth, never past tier 3 styling.
struct TierPresentation {
    item_class: &'static str,
    link_class: &'static str,
    icon_margin: &'static str,
    icon_size: &'static str,
    indicator_glyph: &'static str,
    indicator_size: &'static str,
    submenu_class: &'static str,
    submenu_border: Option<(&'static str, &'static str)>,
    submenu_margin_left: Option<&'static str>,
}

const TIERS: [TierPresentation; 3] = [
    TierPresentation {
        item_class: "nav__item mb-1 relative",
        link_class: "nav__link flex items-center px-4 py-3 rounded-md hover:bg-white shadow-sm transition-all hover:shadow border",
        icon_margin: "mr-3",
        icon_size: "text-base",
        indicator_glyph: "expand_more",
        indicator_size: "16px",
        submenu_class: "nav__sub-list overflow-hidden transition-all duration-10 max-h-0 py-0 bg-white opacity-0",
        submenu_border: Some(("3px solid var(--color-base)", "12px")),
        submenu_margin_left: None,
    },
    TierPresentation {
        item_class: "nav__sub-item relative",
        link_class: "nav__sub-link flex items-center pl-6 pr-4 py-2 hover:bg-gray-100 transition-all border mt-1 rounded",
        icon_margin: "mr-2",
        icon_size: "text-sm",
        indicator_glyph: "keyboard_arrow_right",
        indicator_size: "14px",
        submenu_class: "nav__sub-sub-list overflow-hidden transition-all duration-10 max-h-0 py-0 bg-white opacity-0",
        submenu_border: Some(("2px solid var(--color-base)", "8px")),
        submenu_margin_left: Some("8px"),
    },
    TierPresentation {
        item_class: "nav__sub-sub-item relative",
        link_class: "nav__sub-sub-link flex items-center pl-8 pr-4 py-1 hover:bg-gray-50 transition-all border mt-1 rounded text-sm",
        icon_margin: "mr-2",
        icon_size: "text-xs",
        indicator_glyph: "fiber_manual_record",
        indicator_size: "8px",
        submenu_class: "nav__sub-sub-list overflow-hidden transition-all duration-10 max-h-0 py-0 bg-white opacity-0",
        submenu_border: None,
        submenu_margin_left: None,
    },
];

fn presentation(level: usize) -> &'static TierPresentation {
    &TIERS[level.clamp(1, 3) - 1]
}

/// Inputs the renderer needs beyond the forest itself.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub max_depth: usize,
    pub theme: String,
    /// Running inside a host frame; links escape it with `target="_parent"`
    pub embedded: bool,
    /// When set, parent items with children never escape the host frame
    pub disable_parent_links: bool,
    pub mode: InteractionMode,
}

/// Render the forest into the mount list, registering every expandable node
/// with the interaction controller.
pub fn render_forest(
    forest: &[MenuNode],
    ctx: &RenderContext,
    interaction: &mut MenuInteraction,
) -> Element {
    let mut list = Element::new("ul").class("nav__list");
    for node in forest {
        list.push(render_item(node, ctx, interaction));
    }
    list
}

fn render_item(node: &MenuNode, ctx: &RenderContext, interaction: &mut MenuInteraction) -> Element {
    let tier = presentation(node.level);
    // Children below the depth limit were pruned by the builder; the extra
    // check keeps a hand-built forest from expanding past the last tier.
    let has_children = !node.children.is_empty() && node.level < ctx.max_depth;

    let mut item = Element::new("li")
        .class(tier.item_class)
        .attr("data-menu-id", format!("menu-{}", node.id))
        .attr("data-menu-level", node.level.to_string());

    item.push(render_link(node, ctx, tier, has_children));

    if has_children {
        interaction.register(node.id, node.level);

        let mut submenu = Element::new("ul")
            .class(tier.submenu_class)
            .style("max-height", "0")
            .style("opacity", "0")
            .style("visibility", "hidden");
        if let Some((border, padding)) = tier.submenu_border {
            submenu = submenu
                .style("border-left", border)
                .style("padding-left", padding);
        }
        if let Some(margin) = tier.submenu_margin_left {
            submenu = submenu.style("margin-left", margin);
        }
        submenu = submenu.style("margin-top", "4px").style("margin-bottom", "4px");

        for child in &node.children {
            submenu.push(render_item(child, ctx, interaction));
        }
        item.push(submenu);
    }

    item
}

fn render_link(
    node: &MenuNode,
    ctx: &RenderContext,
    tier: &TierPresentation,
    has_children: bool,
) -> Element {
    let brand_border = format!("{} border-brand-{}", tier.link_class, ctx.theme);
    let mut link = Element::new("a").class(brand_border).text(&node.title);

    match node.url.as_deref() {
        Some(url) => {
            link = link.attr("href", url);
            // suppression withholds only the frame escape, never the href
            if ctx.embedded && !(has_children && ctx.disable_parent_links) {
                link = link.attr("target", "_parent");
            }
        }
        None => {
            link = link.attr("href", "#").style("cursor", "pointer");
        }
    }

    let icon = Element::new("span")
        .class(format!(
            "material-icons {} text-brand-{} {}",
            tier.icon_margin, ctx.theme, tier.icon_size
        ))
        .text(node.icon.as_deref().unwrap_or(DEFAULT_ICON));
    link.prepend(icon);

    if has_children {
        link.push(
            Element::new("span")
                .class(format!(
                    "nav__dropdown-icon nav__dropdown-icon--level-{} material-icons ml-auto transition-transform duration-10 text-brand-{}",
                    node.level, ctx.theme
                ))
                .style("font-size", tier.indicator_size)
                .text(tier.indicator_glyph),
        );
    }

    link
}
