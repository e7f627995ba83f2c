use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Query, State},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    routing::get,
    Json, Router,
};
use landmark_map::types::{
    geom::LatLng,
    landmark::{Category, Landmark, Source},
};

/// A create request as the mock endpoint saw it
#[derive(Debug, Clone, Default)]
pub struct RecordedPost {
    pub multipart: bool,
    pub fields: HashMap<String, String>,
    pub photo: Option<(String, Vec<u8>)>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub landmarks: Vec<Landmark>,
    pub lists: Vec<LatLng>,
    pub posts: Vec<RecordedPost>,
    pub require_login: bool,
    pub fail_lists: bool,
}

pub type Shared = Arc<Mutex<MockState>>;

/// Serves `/api/landmarks` on an ephemeral port, returning its base url
pub fn spawn_mock(state: Shared) -> String {
    let app = Router::new()
        .route("/api/landmarks", get(list_landmarks).post(create_landmark))
        .with_state(state);
    let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    format!("http://{addr}")
}

async fn list_landmarks(
    State(state): State<Shared>,
    Query(at): Query<LatLng>,
) -> Result<Json<Vec<Landmark>>, StatusCode> {
    let mut state = state.lock().unwrap();
    state.lists.push(at);
    if state.fail_lists {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(state.landmarks.clone()))
}

async fn create_landmark(State(state): State<Shared>, request: Request<Body>) -> StatusCode {
    if state.lock().unwrap().require_login {
        return StatusCode::UNAUTHORIZED;
    }
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));
    let post = if is_multipart {
        let Ok(mut multipart) = Multipart::from_request(request, &()).await else {
            return StatusCode::BAD_REQUEST;
        };
        let mut post = RecordedPost {
            multipart: true,
            ..RecordedPost::default()
        };
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            if name == "photo" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let Ok(bytes) = field.bytes().await else {
                    return StatusCode::BAD_REQUEST;
                };
                post.photo = Some((file_name, bytes.to_vec()));
            } else {
                let Ok(text) = field.text().await else {
                    return StatusCode::BAD_REQUEST;
                };
                post.fields.insert(name, text);
            }
        }
        post
    } else {
        let Ok(Json(body)) =
            Json::<serde_json::Map<String, serde_json::Value>>::from_request(request, &()).await
        else {
            return StatusCode::BAD_REQUEST;
        };
        RecordedPost {
            multipart: false,
            fields: body
                .into_iter()
                .map(|(key, value)| match value {
                    serde_json::Value::String(text) => (key, text),
                    other => (key, other.to_string()),
                })
                .collect(),
            photo: None,
        }
    };

    let mut state = state.lock().unwrap();
    let field = |key: &str| post.fields.get(key).cloned().unwrap_or_default();
    let landmark = Landmark {
        name: field("name"),
        description: Some(field("description")),
        latitude: field("latitude").parse().unwrap_or_default(),
        longitude: field("longitude").parse().unwrap_or_default(),
        source: Source::User,
        category: post.fields.get("category").cloned().map(Category::from),
        added_by: Some("Anonymous".to_string()),
        photo: post.photo.as_ref().map(|(file_name, _)| file_name.clone()),
    };
    state.landmarks.push(landmark);
    state.posts.push(post);
    StatusCode::OK
}

pub fn wikipedia(name: &str, lat: f64, lng: f64) -> Landmark {
    Landmark {
        name: name.to_string(),
        description: Some(format!("{name} from wikipedia")),
        latitude: lat,
        longitude: lng,
        source: Source::Wikipedia,
        category: None,
        added_by: None,
        photo: None,
    }
}
