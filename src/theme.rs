use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Straight RGBA, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Parses `#rrggbb` or `#rrggbbaa`. Anything else is `None`.
pub fn hex_to_rgba(hex: &str) -> Option<Rgba> {
    let h = hex.trim_start_matches('#');
    if !matches!(h.len(), 6 | 8) || !h.is_ascii() { return None; }
    let byte = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
    Some(Rgba {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
        a: if h.len() == 8 { byte(6)? } else { 0xff },
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size:   f32,
    #[serde(default)]
    pub weight: FontWeight,
}

impl FontSpec {
    pub const fn new(size: f32, weight: FontWeight) -> Self { Self { size, weight } }
}

/// Style record handed to whatever draws the calendar. Nothing in this crate
/// renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarTheme {
    pub name: String,
    // Text
    pub day_text: String, pub today_text: String, pub other_month_text: String,
    pub weekday_text: String, pub header_text: String, pub selected_day_text: String,
    // Backgrounds
    pub selected_day_bg: String, pub range_bg: String, pub border: String,
    // Shape
    pub corner_radius: f32,
    pub border_width:  f32,
    pub shadow_radius: f32,
    // Fonts (last: they serialize as sub-tables)
    pub day_font: FontSpec, pub selected_day_font: FontSpec,
    pub weekday_font: FontSpec, pub header_font: FontSpec,
}

impl CalendarTheme {
    // ── Color accessors ───────────────────────────────────────────────────────
    pub fn day(&self)         -> Option<Rgba> { hex_to_rgba(&self.day_text) }
    pub fn today(&self)       -> Option<Rgba> { hex_to_rgba(&self.today_text) }
    pub fn other_month(&self) -> Option<Rgba> { hex_to_rgba(&self.other_month_text) }
    pub fn weekday(&self)     -> Option<Rgba> { hex_to_rgba(&self.weekday_text) }
    pub fn header(&self)      -> Option<Rgba> { hex_to_rgba(&self.header_text) }
    pub fn range(&self)       -> Option<Rgba> { hex_to_rgba(&self.range_bg) }
    pub fn border_color(&self) -> Option<Rgba> { hex_to_rgba(&self.border) }

    pub fn selected_highlight(&self) -> (Option<Rgba>, Option<Rgba>) {
        (hex_to_rgba(&self.selected_day_bg), hex_to_rgba(&self.selected_day_text))
    }

    /// Names of color fields that don't parse as hex.
    pub fn invalid_colors(&self) -> Vec<&'static str> {
        [
            ("day_text", &self.day_text), ("today_text", &self.today_text),
            ("other_month_text", &self.other_month_text), ("weekday_text", &self.weekday_text),
            ("header_text", &self.header_text), ("selected_day_text", &self.selected_day_text),
            ("selected_day_bg", &self.selected_day_bg), ("range_bg", &self.range_bg),
            ("border", &self.border),
        ]
        .into_iter()
        .filter(|(_, v)| hex_to_rgba(v).is_none())
        .map(|(k, _)| k)
        .collect()
    }

    // ── Persistence ───────────────────────────────────────────────────────────
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let text = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    // ── Theme catalogue ───────────────────────────────────────────────────────
    pub fn all_themes() -> Vec<CalendarTheme> {
        vec![CalendarTheme::default(), CalendarTheme::dark(), CalendarTheme::high_contrast()]
    }

    pub fn by_name(name: &str) -> Option<CalendarTheme> {
        Self::all_themes().into_iter().find(|t| t.name == name)
    }

    pub fn dark() -> Self { Self {
        name: "dark".into(),
        day_text: "#e5e5ea".into(), today_text: "#0a84ff".into(), other_month_text: "#636366".into(),
        weekday_text: "#aeaeb2".into(), header_text: "#ffffff".into(), selected_day_text: "#000000".into(),
        selected_day_bg: "#0a84ff".into(), range_bg: "#0a84ff4d".into(), border: "#3a3a3c".into(),
        ..Self::default()
    }}

    pub fn high_contrast() -> Self { Self {
        name: "high-contrast".into(),
        day_text: "#000000".into(), today_text: "#b00020".into(), other_month_text: "#595959".into(),
        weekday_text: "#000000".into(), header_text: "#000000".into(), selected_day_text: "#ffffff".into(),
        selected_day_bg: "#000000".into(), range_bg: "#00000040".into(), border: "#000000".into(),
        day_font:          FontSpec::new(17.0, FontWeight::Medium),
        selected_day_font: FontSpec::new(19.0, FontWeight::Bold),
        border_width: 3.0,
        shadow_radius: 0.0,
        ..Self::default()
    }}
}

impl Default for CalendarTheme {
    fn default() -> Self { Self {
        name: "default".into(),
        day_text: "#000000".into(), today_text: "#007aff".into(), other_month_text: "#8e8e93".into(),
        weekday_text: "#000000".into(), header_text: "#000000".into(), selected_day_text: "#ffffff".into(),
        selected_day_bg: "#007aff".into(), range_bg: "#007aff4d".into(), border: "#8e8e934d".into(),
        day_font:          FontSpec::new(16.0, FontWeight::Regular),
        selected_day_font: FontSpec::new(18.0, FontWeight::Semibold),
        weekday_font:      FontSpec::new(14.0, FontWeight::Medium),
        header_font:       FontSpec::new(14.0, FontWeight::Medium),
        corner_radius: 5.0,
        border_width:  2.0,
        shadow_radius: 8.0,
    }}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_alpha() {
        assert_eq!(hex_to_rgba("#007aff"), Some(Rgba { r: 0, g: 0x7a, b: 0xff, a: 0xff }));
        assert_eq!(hex_to_rgba("007aff4d").map(|c| c.a), Some(0x4d));
        assert_eq!(hex_to_rgba("#07f"), None);
        assert_eq!(hex_to_rgba("#zz7aff"), None);
    }

    #[test]
    fn built_in_themes_are_valid() {
        for t in CalendarTheme::all_themes() {
            assert!(t.invalid_colors().is_empty(), "{}: {:?}", t.name, t.invalid_colors());
        }
        assert_eq!(CalendarTheme::by_name("dark").map(|t| t.corner_radius), Some(5.0));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let t: CalendarTheme = toml::from_str("range_bg = \"#ff000080\"\ncorner_radius = 10.0").unwrap();
        assert_eq!(t.range().map(|c| c.r), Some(0xff));
        assert_eq!(t.corner_radius, 10.0);
        assert_eq!(t.day_font, CalendarTheme::default().day_font);
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("monthgrid-theme-{}.toml", std::process::id()));
        let theme = CalendarTheme::high_contrast();
        theme.save(&path).unwrap();
        assert_eq!(CalendarTheme::from_path(&path).unwrap(), theme);
        let _ = std::fs::remove_file(path);
    }
}
