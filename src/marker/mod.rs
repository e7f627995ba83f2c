pub mod popup;
pub mod style;

use std::fmt;

use crate::types::{geom::LatLng, landmark::Landmark};
use style::{MarkerStyle, StyleSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// One landmark as drawn on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: String,
    pub landmark: Landmark,
}

impl Marker {
    pub fn for_landmark(
        id: MarkerId,
        landmark: Landmark,
        styles: &StyleSheet,
        uploads_base: &str,
    ) -> Self {
        Marker {
            id,
            position: landmark.position(),
            style: styles.style_for(&landmark),
            popup: popup::popup_html(&landmark, uploads_base).into_string(),
            landmark,
        }
    }

    /// Style to swap in on hover, only circle markers have one
    pub fn hover_style(&self) -> Option<MarkerStyle> {
        match &self.style {
            MarkerStyle::Circle(circle) => Some(MarkerStyle::Circle(circle.highlighted())),
            _ => None,
        }
    }
}
