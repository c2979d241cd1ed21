//! Brand themes
//!
//! Design tokens for the portal chrome. A theme key selects a palette; the
//! palette is emitted as CSS custom properties so level styling and the
//! header gradient pick it up.

/// One brand palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub key: &'static str,
    /// Light tint used for submenu backgrounds
    pub light: &'static str,
    /// Base brand color (`--color-base`)
    pub base: &'static str,
    /// Darker shade, end of the header gradient
    pub dark: &'static str,
}

pub const PALETTES: [Palette; 6] = [
    Palette {
        key: "blue",
        light: "#E6F0F8",
        base: "#004882",
        dark: "#003B6B",
    },
    Palette {
        key: "orange",
        light: "#FFF2E9",
        base: "#CA5010",
        dark: "#A94210",
    },
    Palette {
        key: "purple",
        light: "#F3E5F5",
        base: "#4B0082",
        dark: "#3A0065",
    },
    Palette {
        key: "green",
        light: "#E8F5E9",
        base: "#006400",
        dark: "#004D00",
    },
    Palette {
        key: "red",
        light: "#FBECEC",
        base: "#800000",
        dark: "#660000",
    },
    Palette {
        key: "turquoise",
        light: "#EAF7F7",
        base: "#006D77",
        dark: "#00575F",
    },
];

/// Look up a palette by theme key. Unknown keys fall back to blue.
pub fn palette(theme: &str) -> &'static Palette {
    PALETTES
        .iter()
        .find(|p| p.key == theme)
        .unwrap_or(&PALETTES[0])
}

/// CSS custom properties for the selected theme.
pub fn style_block(theme: &str) -> String {
    let p = palette(theme);
    format!(
        ":root{{--color-light:{};--color-base:{};--color-header-start:{};--color-header-end:{};}}",
        p.light, p.base, p.base, p.dark
    )
}
