use color_eyre::eyre;
use color_eyre::eyre::eyre;
use geojson::JsonObject;
use serde::{Deserialize, Serialize};

/// Properties attached to each marker when the overlay is exported as geojson
#[derive(Serialize, Deserialize)]
pub struct MarkerProperties {
    pub name: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    //Metres from the view centre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// For converting MarkerProperties to geojson properties
impl TryInto<JsonObject> for MarkerProperties {
    type Error = eyre::Error;

    fn try_into(self) -> Result<JsonObject, Self::Error> {
        let value = serde_json::to_value(self)?;
        let properties = value
            .as_object()
            .ok_or(eyre!("Couldn't create object for properties"))?;
        Ok(properties.to_owned())
    }
}
