use maud::{html, Markup};

use crate::marker::style::StyleKey;

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        TileLayer {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

/// Colour key shown in the bottom right corner of the map
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn categories() -> Self {
        Legend {
            title: "Categories".to_string(),
            entries: StyleKey::LEGEND
                .iter()
                .map(|key| LegendEntry {
                    label: capitalize(key.name()),
                    color: key.color(),
                })
                .collect(),
        }
    }

    pub fn to_html(&self) -> Markup {
        html! {
            div class="card" {
                div class="card-body p-2" {
                    h6 class="card-title mb-2" { (self.title) }
                    @for entry in &self.entries {
                        div class="d-flex align-items-center mb-1" {
                            div style=(swatch_style(entry.color)) {}
                            span class="ms-2" { (entry.label) }
                        }
                    }
                }
            }
        }
    }
}

fn swatch_style(color: &str) -> String {
    format!(
        "width: 20px; height: 20px; background-color: {color}; \
         border-radius: 50%; box-shadow: 0 0 10px {color};"
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
