use crate::color::Color;
use crate::geom::Offset;
use crate::item::{Item, ItemConfig, Palette, resolve_items};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DeserializeFromStr, serde_as};
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumString};

pub const DEFAULT_RESISTANCE: f64 = 35.0;
pub const DEFAULT_MAX_SPEED: f64 = 250.0;
pub const DEFAULT_POINTER_ANGLE: f64 = 0.0;
pub const DEFAULT_RADIUS: f64 = 0.95;
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
pub const DEFAULT_LINE_COLOR: Color = Color::BLACK;
pub const DEFAULT_LABEL_FONT: &str = "sans-serif";
pub const DEFAULT_LABEL_FONT_SIZE_MAX: f64 = 100.0;
pub const DEFAULT_LABEL_RADIUS: f64 = 0.85;
pub const DEFAULT_LABEL_RADIUS_MAX: f64 = 0.2;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LabelAlign {
    Left,
    Center,
    #[default]
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct FontFamily(String);

crate::impl_string_newtype!(FontFamily);

impl Default for FontFamily {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_FONT)
    }
}

/// The wheel as described by a config file. Every field is optional and a value of the
/// wrong type is dropped instead of failing the whole file; [`Settings`] fills the gaps.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub items: Vec<ItemConfig>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_background_colors: Vec<Color>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_label_colors: Vec<Color>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_label_align: Option<LabelAlign>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_label_font: Option<FontFamily>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_label_font_size_max: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_label_radius: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_label_radius_max: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_label_rotation: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub item_label_baseline_offset: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub line_color: Option<Color>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub line_width: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub radius: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub offset: Option<Offset>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub rotation: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub resistance: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub max_speed: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub pointer_angle: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub is_interactive: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub debug: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub image: Option<PathBuf>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub overlay_image: Option<PathBuf>,
}

impl WheelConfig {
    pub fn with_items(items: Vec<ItemConfig>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn resolve_items(&self) -> Vec<Item> {
        resolve_items(
            &self.items,
            &Palette {
                backgrounds: &self.item_background_colors,
                labels: &self.item_label_colors,
            },
        )
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub fn valid_resistance(value: Option<f64>) -> f64 {
    finite(value).map(f64::abs).unwrap_or(DEFAULT_RESISTANCE)
}

pub fn valid_max_speed(value: Option<f64>) -> f64 {
    finite(value)
        .filter(|v| *v > 0.0)
        .unwrap_or(DEFAULT_MAX_SPEED)
}

pub fn valid_angle(value: Option<f64>) -> f64 {
    finite(value).unwrap_or(DEFAULT_POINTER_ANGLE)
}

pub fn valid_radius(value: Option<f64>) -> f64 {
    finite(value).filter(|v| *v > 0.0).unwrap_or(DEFAULT_RADIUS)
}

pub fn valid_line_width(value: Option<f64>) -> f64 {
    finite(value).filter(|v| *v >= 0.0).unwrap_or(DEFAULT_LINE_WIDTH)
}

pub fn valid_offset(value: Option<Offset>) -> Offset {
    value
        .filter(|o| o.w.is_finite() && o.h.is_finite())
        .unwrap_or_default()
}

/// How labels are placed and sized; only the renderer reads these.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub align: LabelAlign,
    pub font: FontFamily,
    pub font_size_max: f64,
    pub radius: f64,
    pub radius_max: f64,
    pub rotation: f64,
    pub baseline_offset: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            align: LabelAlign::default(),
            font: FontFamily::default(),
            font_size_max: DEFAULT_LABEL_FONT_SIZE_MAX,
            radius: DEFAULT_LABEL_RADIUS,
            radius_max: DEFAULT_LABEL_RADIUS_MAX,
            rotation: 0.0,
            baseline_offset: 0.0,
        }
    }
}

/// Validated configuration, every field holding a usable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub resistance: f64,
    pub max_speed: f64,
    pub pointer_angle: f64,
    pub is_interactive: bool,
    pub debug: bool,
    pub radius: f64,
    pub offset: Offset,
    pub line_color: Color,
    pub line_width: f64,
    pub label: LabelStyle,
    pub image: Option<PathBuf>,
    pub overlay_image: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&WheelConfig::default())
    }
}

impl Settings {
    pub fn from_config(cfg: &WheelConfig) -> Self {
        let defaults = LabelStyle::default();
        Self {
            resistance: valid_resistance(cfg.resistance),
            max_speed: valid_max_speed(cfg.max_speed),
            pointer_angle: valid_angle(cfg.pointer_angle),
            is_interactive: cfg.is_interactive.unwrap_or(true),
            debug: cfg.debug.unwrap_or(false),
            radius: valid_radius(cfg.radius),
            offset: valid_offset(cfg.offset),
            line_color: cfg.line_color.unwrap_or(DEFAULT_LINE_COLOR),
            line_width: valid_line_width(cfg.line_width),
            label: LabelStyle {
                align: cfg.item_label_align.unwrap_or_default(),
                font: cfg.item_label_font.clone().unwrap_or_default(),
                font_size_max: finite(cfg.item_label_font_size_max)
                    .unwrap_or(defaults.font_size_max),
                radius: finite(cfg.item_label_radius).unwrap_or(defaults.radius),
                radius_max: finite(cfg.item_label_radius_max).unwrap_or(defaults.radius_max),
                rotation: finite(cfg.item_label_rotation).unwrap_or(defaults.rotation),
                baseline_offset: finite(cfg.item_label_baseline_offset)
                    .unwrap_or(defaults.baseline_offset),
            },
            image: cfg.image.clone(),
            overlay_image: cfg.overlay_image.clone(),
        }
    }
}
