use plotters::style::{FontDesc, FontFamily, FontStyle, RGBColor};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Per-trace colors used when a panel does not override them. The palette
/// pairs a dark tone with a bright one so two traces sharing a panel stay
/// distinguishable.
const DEFAULT_PALETTE: [&str; 8] = [
    "#1e3a8a", "#dc2626", "#15803d", "#f97316", "#7c3aed", "#06b6d4", "#92400e", "#ec4899",
];

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid color '{value}' for '{field}'")]
    InvalidColor { field: &'static str, value: String },
    #[error("Color palette must not be empty")]
    EmptyPalette,
}

/// Visual styling shared by every figure: colors, fonts and font sizes.
///
/// Colors are hex strings so themes stay editable as plain TOML; the
/// accessor methods resolve them to drawing colors, falling back to the
/// defaults for anything unparseable.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Theme {
    pub background: String,
    pub foreground: String,
    pub grid: String,
    pub placeholder: String,
    pub palette: Vec<String>,
    pub font_family: String,
    pub title_size: u32,
    pub caption_size: u32,
    pub label_size: u32,
    pub tick_size: u32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            grid: "#b0b0b0".to_string(),
            placeholder: "#808080".to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            font_family: "sans-serif".to_string(),
            title_size: 32,
            caption_size: 22,
            label_size: 18,
            tick_size: 14,
        }
    }
}

impl Theme {
    /// Loads and validates a theme from a TOML file. Fields absent from the
    /// file keep their default values.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let theme: Theme = toml::from_str(&content).map_err(|e| ThemeError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        theme.validate()?;
        Ok(theme)
    }

    pub fn validate(&self) -> Result<(), ThemeError> {
        let named: [(&'static str, &str); 4] = [
            ("background", &self.background),
            ("foreground", &self.foreground),
            ("grid", &self.grid),
            ("placeholder", &self.placeholder),
        ];
        for (field, value) in named {
            if parse_hex_color(value).is_none() {
                return Err(ThemeError::InvalidColor {
                    field,
                    value: value.to_string(),
                });
            }
        }
        if self.palette.is_empty() {
            return Err(ThemeError::EmptyPalette);
        }
        for value in &self.palette {
            if parse_hex_color(value).is_none() {
                return Err(ThemeError::InvalidColor {
                    field: "palette",
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn background_color(&self) -> RGBColor {
        parse_hex_color(&self.background).unwrap_or(RGBColor(255, 255, 255))
    }

    pub fn foreground_color(&self) -> RGBColor {
        parse_hex_color(&self.foreground).unwrap_or(RGBColor(0, 0, 0))
    }

    pub fn grid_color(&self) -> RGBColor {
        parse_hex_color(&self.grid).unwrap_or(RGBColor(176, 176, 176))
    }

    pub fn placeholder_color(&self) -> RGBColor {
        parse_hex_color(&self.placeholder).unwrap_or(RGBColor(128, 128, 128))
    }

    /// Palette color for the `index`-th trace, cycling past the end.
    pub fn palette_color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return self.foreground_color();
        }
        let entry = &self.palette[index % self.palette.len()];
        parse_hex_color(entry).unwrap_or_else(|| self.foreground_color())
    }

    pub(crate) fn font(&self, size: u32) -> FontDesc<'_> {
        self.styled_font(size, FontStyle::Normal)
    }

    pub(crate) fn italic_font(&self, size: u32) -> FontDesc<'_> {
        self.styled_font(size, FontStyle::Italic)
    }

    fn styled_font(&self, size: u32, style: FontStyle) -> FontDesc<'_> {
        let family = match self.font_family.as_str() {
            "serif" => FontFamily::Serif,
            "monospace" => FontFamily::Monospace,
            "sans-serif" => FontFamily::SansSerif,
            other => FontFamily::Name(other),
        };
        FontDesc::new(family, size as f64, style)
    }
}

/// Parses a `#RRGGBB` hex string.
pub(crate) fn parse_hex_color(value: &str) -> Option<RGBColor> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parse_hex_color_accepts_rrggbb() {
        assert_eq!(parse_hex_color("#1e3a8a"), Some(RGBColor(30, 58, 138)));
        assert_eq!(parse_hex_color("#FFFFFF"), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_hex_color("#000000"), Some(RGBColor(0, 0, 0)));
    }

    #[test]
    fn parse_hex_color_rejects_malformed_input() {
        assert_eq!(parse_hex_color("1e3a8a"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#1e3a8a00"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn default_theme_is_valid() {
        let theme = Theme::default();
        assert!(theme.validate().is_ok());
        assert_eq!(theme.background_color(), RGBColor(255, 255, 255));
        assert_eq!(theme.palette_color(0), RGBColor(30, 58, 138));
    }

    #[test]
    fn palette_cycles_past_the_end() {
        let theme = Theme::default();
        assert_eq!(theme.palette_color(8), theme.palette_color(0));
        assert_eq!(theme.palette_color(9), theme.palette_color(1));
    }

    #[test]
    fn load_succeeds_with_partial_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(
            &path,
            r##"
            background = "#fafafa"
            palette = ["#112233", "#445566"]
            title-size = 40
            "##,
        )
        .unwrap();

        let theme = Theme::load(&path).unwrap();
        assert_eq!(theme.background_color(), RGBColor(250, 250, 250));
        assert_eq!(theme.palette.len(), 2);
        assert_eq!(theme.title_size, 40);
        assert_eq!(theme.foreground, Theme::default().foreground);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = Theme::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ThemeError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = Theme::load(&path);
        assert!(matches!(result, Err(ThemeError::Toml { .. })));
    }

    #[test]
    fn load_fails_for_unparseable_color() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "foreground = \"not-a-color\"").unwrap();
        let result = Theme::load(&path);
        assert!(matches!(
            result,
            Err(ThemeError::InvalidColor {
                field: "foreground",
                ..
            })
        ));
    }

    #[test]
    fn load_fails_for_empty_palette() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "palette = []").unwrap();
        let result = Theme::load(&path);
        assert!(matches!(result, Err(ThemeError::EmptyPalette)));
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "backgroud = \"#ffffff\"").unwrap();
        let result = Theme::load(&path);
        assert!(matches!(result, Err(ThemeError::Toml { .. })));
    }
}
