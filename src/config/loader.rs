//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AtriumResult;

use super::types::Config;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AtriumResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| crate::error::AtriumError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit path if given, otherwise defaults; environment
/// overrides apply last either way.
pub fn load_or_default(path: Option<&Path>) -> Config {
    if let Some(path) = path {
        if path.exists() {
            if let Ok(config) = Config::load(path) {
                return with_env_overrides(config);
            }
        }
    }

    with_env_overrides(Config::default())
}

/// Apply environment variable overrides (ATRIUM_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // ATRIUM_THEME
    if let Ok(theme) = std::env::var("ATRIUM_THEME") {
        if !theme.trim().is_empty() {
            config.branding.theme = theme.trim().to_lowercase();
        }
    }

    // ATRIUM_MAX_DEPTH
    if let Ok(depth) = std::env::var("ATRIUM_MAX_DEPTH") {
        if let Ok(parsed) = depth.trim().parse::<usize>() {
            config.navigation.max_depth = parsed;
        }
    }

    // ATRIUM_FORCE_CLICK
    if let Ok(val) = std::env::var("ATRIUM_FORCE_CLICK") {
        config.navigation.force_click_behavior = val.to_lowercase() != "false" && val != "0";
    }

    // ATRIUM_HOVER_DELAY_MS
    if let Ok(delay) = std::env::var("ATRIUM_HOVER_DELAY_MS") {
        if let Ok(parsed) = delay.trim().parse::<u64>() {
            config.navigation.hover_delay_ms = parsed;
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "navigation",
        "container",
        "list_guid",
        "force_click_behavior",
        "hover_delay_ms",
        "max_depth",
        "disable_parent_item_links",
        "edit_button",
        "enabled",
        "url",
        "allowed_roles",
        "show_for_current_user",
        "calendar",
        "title",
        "item_count",
        "show_pagination",
        "add_event_url",
        "edit_event_url",
        "base_url",
        "documents",
        "view_mode",
        "view_style",
        "default_sort",
        "field",
        "ascending",
        "add_document_url",
        "branding",
        "theme",
        "custom_header",
        "apply_to_header",
        "site",
        "root",
        "detect_subsites",
        "debug",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
