//! Host-page markup overrides
//!
//! The host page carries per-deployment settings as attributes on its body
//! tag (`data-listguid`, `data-max-menu-depth`, a `theme-*` class, ...).
//! These override whatever the config file said. Coercion is best-effort:
//! unparsable values are diagnosed and skipped, never fatal.

use crate::diag::DiagnosticSink;

use super::types::Config;

/// Apply body-tag attribute overrides to an already loaded config.
///
/// `markup` is any HTML fragment containing a `<body ...>` tag; without one
/// the config is returned untouched.
pub fn apply_body_attributes(config: &mut Config, markup: &str, sink: &mut dyn DiagnosticSink) {
    let Some(attrs) = body_attributes(markup) else {
        return;
    };

    for (name, value) in &attrs {
        match name.as_str() {
            "class" => {
                if let Some(theme) = value
                    .split_whitespace()
                    .find_map(|cls| cls.strip_prefix("theme-"))
                {
                    config.branding.theme = theme.to_string();
                }
            }
            "data-listguid" => {
                config.navigation.list_guid = Some(value.clone());
                // Same list backs the calendar unless it has its own
                if config.calendar.list_guid.is_none() {
                    config.calendar.list_guid = Some(value.clone());
                }
            }
            "data-page-size" => match value.parse::<usize>() {
                Ok(count) if count > 0 => config.calendar.item_count = count,
                _ => sink.warn(
                    "config",
                    format!("Could not parse data-page-size value '{value}'"),
                ),
            },
            "data-max-menu-depth" => match value.parse::<usize>() {
                Ok(depth) if depth > 0 => {
                    config.navigation.max_depth = depth;
                    sink.info("config", format!("Maximum menu depth set to {depth}"));
                }
                _ => sink.warn(
                    "config",
                    format!("Could not parse data-max-menu-depth value '{value}'"),
                ),
            },
            "data-calendar-url" => {
                let base = value.split("/_api/").next().unwrap_or(value);
                config.calendar.base_url = Some(base.to_string());
            }
            "data-button-url" => {
                config.navigation.edit_button.url = Some(value.clone());
            }
            "data-all-events-base-url" => {
                config.calendar.edit_event_url = Some(value.clone());
            }
            "data-allowed-groups" => match serde_json::from_str::<Vec<String>>(value) {
                Ok(groups) => config.navigation.edit_button.allowed_roles = groups,
                Err(e) => sink.warn("config", format!("Could not parse allowed groups: {e}")),
            },
            _ => {}
        }
    }
}

/// Extract the attribute list of the first body tag in the markup.
fn body_attributes(markup: &str) -> Option<Vec<(String, String)>> {
    let start = find_body_tag(markup)?;
    let rest = &markup[start..];
    let end = rest.find('>')?;
    Some(parse_attributes(&rest[..end]))
}

/// Byte-wise case-insensitive scan, so the returned offset always indexes
/// the original string even when the markup carries multibyte characters.
fn find_body_tag(markup: &str) -> Option<usize> {
    let bytes = markup.as_bytes();
    let mut at = 0;
    while at + 5 <= bytes.len() {
        if bytes[at..at + 5].eq_ignore_ascii_case(b"<body") {
            // require a boundary so "<bodyguard" does not match
            match bytes.get(at + 5) {
                Some(b'>' | b' ' | b'\t' | b'\n' | b'\r') => return Some(at + 5),
                None => return None,
                _ => {}
            }
        }
        at += 1;
    }
    None
}

/// Parse `name="value"` pairs. Values may be single- or double-quoted;
/// bare values run to the next whitespace. Names lowercase.
fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = raw.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        // attribute name
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() || c == '=' {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        let name = raw[start..end].to_lowercase();

        // skip whitespace before a possible '='
        while matches!(chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
            chars.next();
        }

        if !matches!(chars.peek(), Some(&(_, '='))) {
            if !name.is_empty() {
                attrs.push((name, String::new()));
            }
            continue;
        }
        chars.next(); // consume '='
        while matches!(chars.peek(), Some(&(_, c)) if c.is_whitespace()) {
            chars.next();
        }

        let value = match chars.peek() {
            Some(&(vstart, quote @ ('"' | '\''))) => {
                chars.next();
                let mut vend = vstart + 1;
                for (i, c) in chars.by_ref() {
                    if c == quote {
                        break;
                    }
                    vend = i + c.len_utf8();
                }
                raw[vstart + 1..vend.max(vstart + 1)].to_string()
            }
            Some(&(vstart, _)) => {
                let mut vend = vstart;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    vend = i + c.len_utf8();
                    chars.next();
                }
                raw[vstart..vend].to_string()
            }
            None => String::new(),
        };

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }

    attrs
}
