use std::str::FromStr;

use color_eyre::eyre::{self, eyre};

use crate::types::landmark::{Category, Landmark, Source};

/// Fill used when a landmark's category isn't one we have a colour for
pub const FALLBACK_COLOR: &str = "#00ffff";
const STROKE_COLOR: &str = "#fff";
const RADIUS: f64 = 8.0;

/// Every style a landmark can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKey {
    Historical,
    Cultural,
    Natural,
    Religious,
    Entertainment,
    Wikipedia,
    Unrecognized,
}

impl StyleKey {
    /// Legend order
    pub const LEGEND: [StyleKey; 6] = [
        StyleKey::Historical,
        StyleKey::Cultural,
        StyleKey::Natural,
        StyleKey::Religious,
        StyleKey::Entertainment,
        StyleKey::Wikipedia,
    ];

    /// Wikipedia landmarks are styled by source, everything else by category.
    /// Uncategorised landmarks count as historical.
    pub fn for_landmark(landmark: &Landmark) -> Self {
        if landmark.source == Source::Wikipedia {
            return StyleKey::Wikipedia;
        }
        match &landmark.category {
            None | Some(Category::Historical) => StyleKey::Historical,
            Some(Category::Cultural) => StyleKey::Cultural,
            Some(Category::Natural) => StyleKey::Natural,
            Some(Category::Religious) => StyleKey::Religious,
            Some(Category::Entertainment) => StyleKey::Entertainment,
            Some(Category::Other(_)) => StyleKey::Unrecognized,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StyleKey::Historical => "#00ffff",
            StyleKey::Cultural => "#ff00ff",
            StyleKey::Natural => "#00ff00",
            StyleKey::Religious => "#ff00ff",
            StyleKey::Entertainment => "#ffff00",
            StyleKey::Wikipedia => "#ff0000",
            StyleKey::Unrecognized => FALLBACK_COLOR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleKey::Historical => "historical",
            StyleKey::Cultural => "cultural",
            StyleKey::Natural => "natural",
            StyleKey::Religious => "religious",
            StyleKey::Entertainment => "entertainment",
            StyleKey::Wikipedia => "wikipedia",
            StyleKey::Unrecognized => "default",
        }
    }
}

/// How markers are drawn on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerKind {
    /// Plain pin tagged with a `marker-{source}` class
    Pin,
    /// Circle filled with the category colour
    #[default]
    Circle,
    /// Image icon served from the static icon directory
    Icon,
}

impl FromStr for MarkerKind {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pin" => Ok(MarkerKind::Pin),
            "circle" => Ok(MarkerKind::Circle),
            "icon" => Ok(MarkerKind::Icon),
            other => Err(eyre!("unknown marker kind {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub radius: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl CircleStyle {
    pub fn filled(fill_color: &'static str) -> Self {
        CircleStyle {
            radius: RADIUS,
            fill_color,
            color: STROKE_COLOR,
            weight: 2,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }

    /// Style while the pointer is over the marker
    pub fn highlighted(&self) -> Self {
        CircleStyle {
            weight: 3,
            fill_opacity: 1.0,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerStyle {
    Pin { class_name: String },
    Circle(CircleStyle),
    Icon { url: String },
}

/// Resolves landmarks to marker styles for one marker kind
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub kind: MarkerKind,
    pub icon_base: String,
}

impl StyleSheet {
    pub fn style_for(&self, landmark: &Landmark) -> MarkerStyle {
        match self.kind {
            MarkerKind::Pin => {
                let source = match &landmark.source {
                    Source::Other(_) => "default",
                    known => known.as_str(),
                };
                MarkerStyle::Pin {
                    class_name: format!("marker-{source}"),
                }
            }
            MarkerKind::Circle => {
                MarkerStyle::Circle(CircleStyle::filled(StyleKey::for_landmark(landmark).color()))
            }
            MarkerKind::Icon => MarkerStyle::Icon {
                url: format!(
                    "{}/{}.png",
                    self.icon_base.trim_end_matches('/'),
                    StyleKey::for_landmark(landmark).name()
                ),
            },
        }
    }
}
