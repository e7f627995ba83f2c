use color_eyre::eyre;
use reqwest::{
    header::{HeaderMap, HeaderValue, COOKIE},
    multipart::{Form, Part},
};
use tracing::{debug, instrument};

use crate::{
    net::response::{check_status, Result},
    types::{
        geom::LatLng,
        landmark::{Landmark, NewLandmark},
    },
};

const LANDMARKS_PATH: &str = "/api/landmarks";

/// Talks to the landmarks endpoint. Cheap to clone, clones share one connection pool.
#[derive(Clone, Debug)]
pub struct LandmarkClient {
    http: reqwest::Client,
    base_url: String,
}

impl LandmarkClient {
    /// `session` is sent as the `session` cookie so creates pass the login check
    pub fn new(base_url: &str, session: Option<&str>) -> eyre::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(session) = session {
            headers.insert(COOKIE, HeaderValue::from_str(&format!("session={session}"))?);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(LandmarkClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, LANDMARKS_PATH)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, at: LatLng) -> Result<Vec<Landmark>> {
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("lat", at.lat), ("lng", at.lng)])
            .send()
            .await?;
        let landmarks: Vec<Landmark> = check_status(response)?.json().await?;
        debug!("received {} landmarks", landmarks.len());
        Ok(landmarks)
    }

    /// Posts as multipart when a photo is attached, json otherwise
    #[instrument(skip(self, landmark), fields(name = %landmark.name))]
    pub async fn create(&self, landmark: &NewLandmark) -> Result<()> {
        let request = self.http.post(self.endpoint());
        let request = match landmark.photo {
            Some(_) => request.multipart(multipart_form(landmark)?),
            None => request.json(landmark),
        };
        check_status(request.send().await?)?;
        Ok(())
    }
}

fn multipart_form(landmark: &NewLandmark) -> Result<Form> {
    let mut form = Form::new()
        .text("name", landmark.name.clone())
        .text("description", landmark.description.clone());
    if let Some(category) = &landmark.category {
        form = form.text("category", category.to_string());
    }
    form = form
        .text("latitude", landmark.latitude.to_string())
        .text("longitude", landmark.longitude.to_string());
    if let Some(photo) = &landmark.photo {
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.content_type)?;
        form = form.part("photo", part);
    }
    Ok(form)
}
