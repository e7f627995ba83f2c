use std::fmt;

use serde::{Deserialize, Serialize};

use super::geom::LatLng;

/// A landmark as returned by `GET /api/landmarks`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Landmark {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Landmark {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Locally built record for a landmark the server accepted but hasn't sent back yet
impl From<NewLandmark> for Landmark {
    fn from(value: NewLandmark) -> Self {
        Landmark {
            name: value.name,
            description: Some(value.description),
            latitude: value.latitude,
            longitude: value.longitude,
            source: Source::User,
            category: value.category,
            added_by: None,
            photo: None,
        }
    }
}

/// Where a landmark came from. Unknown values are kept verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Source {
    User,
    Wikipedia,
    Other(String),
}

impl Source {
    pub fn as_str(&self) -> &str {
        match self {
            Source::User => "user",
            Source::Wikipedia => "wikipedia",
            Source::Other(other) => other,
        }
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Source::User,
            "wikipedia" => Source::Wikipedia,
            _ => Source::Other(value),
        }
    }
}

impl From<Source> for String {
    fn from(value: Source) -> Self {
        match value {
            Source::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Historical,
    Cultural,
    Natural,
    Religious,
    Entertainment,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Historical => "historical",
            Category::Cultural => "cultural",
            Category::Natural => "natural",
            Category::Religious => "religious",
            Category::Entertainment => "entertainment",
            Category::Other(other) => other,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "historical" => Category::Historical,
            "cultural" => Category::Cultural,
            "natural" => Category::Natural,
            "religious" => Category::Religious,
            "entertainment" => Category::Entertainment,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image attached to a new landmark, sent as the multipart `photo` field
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Body of `POST /api/landmarks`. The photo never goes into the JSON form.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewLandmark {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip)]
    pub photo: Option<Photo>,
}

impl NewLandmark {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// The add-landmark form as the user filled it in
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkForm {
    pub name: String,
    pub description: String,
    pub category: Option<Category>,
    pub photo: Option<Photo>,
}

impl LandmarkForm {
    pub fn at(self, location: LatLng) -> NewLandmark {
        NewLandmark {
            name: self.name,
            description: self.description,
            category: self.category,
            latitude: location.lat,
            longitude: location.lng,
            photo: self.photo,
        }
    }
}
