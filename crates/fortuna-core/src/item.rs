use crate::color::Color;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};

pub const DEFAULT_WEIGHT: f64 = 1.0;
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::WHITE;
pub const DEFAULT_LABEL_COLOR: Color = Color::BLACK;

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One entry as written in the configuration. Anything missing or malformed is filled
/// in by [`resolve_items`].
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub label: Option<Label>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub weight: Option<f64>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub background_color: Option<Color>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub label_color: Option<Color>,
}

impl ItemConfig {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(Label::new(label)),
            ..Self::default()
        }
    }

    pub fn weighted(weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Self::default()
        }
    }
}

/// A wheel item with every attribute resolved. The engine only looks at `weight`; the
/// rest is carried for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub label: Label,
    pub weight: f64,
    pub background_color: Color,
    pub label_color: Color,
}

/// Repeating color patterns used for items that don't set their own colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette<'a> {
    pub backgrounds: &'a [Color],
    pub labels: &'a [Color],
}

fn cycle(colors: &[Color], index: usize) -> Option<Color> {
    (!colors.is_empty()).then(|| colors[index % colors.len()])
}

pub fn valid_weight(weight: Option<f64>) -> f64 {
    weight.filter(|w| w.is_finite()).unwrap_or(DEFAULT_WEIGHT)
}

pub fn resolve_items(configs: &[ItemConfig], palette: &Palette) -> Vec<Item> {
    configs
        .iter()
        .enumerate()
        .map(|(i, cfg)| Item {
            label: cfg.label.clone().unwrap_or_default(),
            weight: valid_weight(cfg.weight),
            background_color: cfg
                .background_color
                .or_else(|| cycle(palette.backgrounds, i))
                .unwrap_or(DEFAULT_BACKGROUND_COLOR),
            label_color: cfg
                .label_color
                .or_else(|| cycle(palette.labels, i))
                .unwrap_or(DEFAULT_LABEL_COLOR),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_use_defaults() {
        let items = resolve_items(&[ItemConfig::default()], &Palette::default());
        assert_eq!(items[0].label, Label::default());
        assert_eq!(items[0].weight, 1.0);
        assert_eq!(items[0].background_color, Color::WHITE);
        assert_eq!(items[0].label_color, Color::BLACK);
    }

    #[test]
    fn test_palette_repeats_and_item_color_wins() {
        let bg = [Color::rgb(1, 0, 0), Color::rgb(0, 1, 0)];
        let palette = Palette {
            backgrounds: &bg,
            labels: &[],
        };
        let mut configs = vec![ItemConfig::default(); 3];
        configs[1].background_color = Some(Color::rgb(9, 9, 9));

        let items = resolve_items(&configs, &palette);
        assert_eq!(items[0].background_color, bg[0]);
        assert_eq!(items[1].background_color, Color::rgb(9, 9, 9));
        assert_eq!(items[2].background_color, bg[0]);
    }

    #[test]
    fn test_bad_weight_falls_back() {
        assert_eq!(valid_weight(Some(f64::NAN)), 1.0);
        assert_eq!(valid_weight(Some(f64::INFINITY)), 1.0);
        assert_eq!(valid_weight(None), 1.0);
        assert_eq!(valid_weight(Some(0.0)), 0.0);
        assert_eq!(valid_weight(Some(-2.0)), -2.0);
    }

    #[test]
    fn test_malformed_fields_deserialize_to_none() {
        let cfg: ItemConfig =
            serde_json::from_str(r#"{"label":"Prize","weight":"heavy","backgroundColor":1}"#)
                .unwrap();
        assert_eq!(cfg.label, Some(Label::from("Prize")));
        assert_eq!(cfg.weight, None);

        let cfg: ItemConfig =
            serde_json::from_str(r#"{"weight":2.5,"label_color":"nope"}"#).unwrap();
        assert_eq!(cfg.weight, Some(2.5));
        assert_eq!(cfg.label_color, None);
    }
}
