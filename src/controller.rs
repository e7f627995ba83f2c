use std::{str::FromStr, time::Duration};

use color_eyre::eyre::{self, eyre};
use tracing::{debug, error, info, warn};

use crate::{
    geolocation::{GeolocationError, PositionOptions},
    marker::{
        style::{MarkerKind, StyleSheet},
        Marker, MarkerId,
    },
    net::response::ApiError,
    notification::{self, Notification, NotificationId, NotificationKind},
    overlay::{Legend, TileLayer},
    types::{
        geom::LatLng,
        landmark::{Landmark, LandmarkForm, NewLandmark},
    },
};

pub const DEFAULT_ZOOM: u8 = 13;
pub const PLACEHOLDER_CENTER: LatLng = LatLng::new(0.0, 0.0);
pub const FALLBACK_CENTER: LatLng = LatLng::new(48.8566, 2.3522);
pub const LOGIN_ROUTE: &str = "/google_login";

/// What the page does once the server accepted a new landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AfterSubmit {
    /// Reload every landmark around the new one from the server
    #[default]
    Refetch,
    /// Draw the new landmark locally without asking the server again
    Optimistic,
}

impl FromStr for AfterSubmit {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refetch" => Ok(AfterSubmit::Refetch),
            "optimistic" => Ok(AfterSubmit::Optimistic),
            other => Err(eyre!("unknown after-submit mode {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub placeholder_center: LatLng,
    pub fallback_center: LatLng,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub show_legend: bool,
    pub position_options: PositionOptions,
    pub marker_kind: MarkerKind,
    pub icon_base: String,
    pub uploads_base: String,
    pub after_submit: AfterSubmit,
    pub notification_ttl: Duration,
    pub login_route: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            placeholder_center: PLACEHOLDER_CENTER,
            fallback_center: FALLBACK_CENTER,
            zoom: DEFAULT_ZOOM,
            tile_layer: TileLayer::default(),
            show_legend: true,
            position_options: PositionOptions::default(),
            marker_kind: MarkerKind::default(),
            icon_base: "/static/images/markers".to_string(),
            uploads_base: "/static/uploads".to_string(),
            after_submit: AfterSubmit::default(),
            notification_ttl: Duration::from_secs(5),
            login_route: LOGIN_ROUTE.to_string(),
        }
    }
}

/// Something that happened on the page
#[derive(Debug)]
pub enum Event {
    PageLoaded { geolocation_supported: bool },
    PositionResolved(LatLng),
    PositionUnavailable(GeolocationError),
    MapClicked(LatLng),
    LandmarksLoaded {
        at: LatLng,
        result: Result<Vec<Landmark>, ApiError>,
    },
    SubmitRequested(LandmarkForm),
    SubmitFinished {
        landmark: NewLandmark,
        result: Result<(), ApiError>,
    },
    NotificationExpired(NotificationId),
}

impl Event {
    /// Events that answer a geolocation, fetch or post command
    pub fn is_io_completion(&self) -> bool {
        matches!(
            self,
            Event::PositionResolved(_)
                | Event::PositionUnavailable(_)
                | Event::LandmarksLoaded { .. }
                | Event::SubmitFinished { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitControl {
    Disabled,
    Enabled,
    Busy,
}

impl SubmitControl {
    pub fn label(self) -> &'static str {
        match self {
            SubmitControl::Busy => "Adding...",
            _ => "Add Landmark",
        }
    }
}

/// Something the page must do in response to an event
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetView { center: LatLng, zoom: u8 },
    AddTileLayer(TileLayer),
    AddLegend(Legend),
    RequestPosition(PositionOptions),
    FetchLandmarks(LatLng),
    RemoveMarker(MarkerId),
    AddMarker(Marker),
    SetSubmitControl(SubmitControl),
    PostLandmark(NewLandmark),
    Redirect(String),
    ShowNotification(Notification),
    RemoveNotification(NotificationId),
    ResetForm,
}

/// The map page's state and its reaction to events. Does no I/O itself.
#[derive(Debug)]
pub struct MapPageController {
    settings: PageSettings,
    styles: StyleSheet,
    selected: Option<LatLng>,
    markers: Vec<MarkerId>,
    submitting: bool,
    notifications: Vec<NotificationId>,
    next_marker: u64,
    next_notification: u64,
}

impl MapPageController {
    pub fn new(settings: PageSettings) -> Self {
        let styles = StyleSheet {
            kind: settings.marker_kind,
            icon_base: settings.icon_base.clone(),
        };
        MapPageController {
            settings,
            styles,
            selected: None,
            markers: Vec::new(),
            submitting: false,
            notifications: Vec::new(),
            next_marker: 0,
            next_notification: 0,
        }
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn selected_location(&self) -> Option<LatLng> {
        self.selected
    }

    /// Ids of the markers currently on the map, in drawing order
    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn handle(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::PageLoaded {
                geolocation_supported,
            } => self.initialize(geolocation_supported),
            Event::PositionResolved(at) => {
                info!("located at {at}");
                self.center_and_load(at)
            }
            Event::PositionUnavailable(err) => {
                warn!("could not get location: {err}");
                self.center_and_load(self.settings.fallback_center)
            }
            Event::MapClicked(at) => self.select(at),
            Event::LandmarksLoaded { at, result } => self.landmarks_loaded(at, result),
            Event::SubmitRequested(form) => self.submit(form),
            Event::SubmitFinished { landmark, result } => self.submit_finished(landmark, result),
            Event::NotificationExpired(id) => self.expire(id),
        }
    }

    fn initialize(&mut self, geolocation_supported: bool) -> Vec<Command> {
        let mut commands = vec![
            Command::SetView {
                center: self.settings.placeholder_center,
                zoom: self.settings.zoom,
            },
            Command::AddTileLayer(self.settings.tile_layer.clone()),
        ];
        if self.settings.show_legend {
            commands.push(Command::AddLegend(Legend::categories()));
        }
        commands.push(Command::SetSubmitControl(SubmitControl::Disabled));
        if geolocation_supported {
            commands.push(Command::RequestPosition(self.settings.position_options));
        } else {
            warn!("geolocation not supported");
            commands.extend(self.center_and_load(self.settings.fallback_center));
        }
        commands
    }

    fn center_and_load(&self, at: LatLng) -> Vec<Command> {
        vec![
            Command::SetView {
                center: at,
                zoom: self.settings.zoom,
            },
            Command::FetchLandmarks(at),
        ]
    }

    fn select(&mut self, at: LatLng) -> Vec<Command> {
        debug!("selected {at}");
        self.selected = Some(at);
        if self.submitting {
            Vec::new()
        } else {
            vec![Command::SetSubmitControl(SubmitControl::Enabled)]
        }
    }

    fn landmarks_loaded(
        &mut self,
        at: LatLng,
        result: Result<Vec<Landmark>, ApiError>,
    ) -> Vec<Command> {
        match result {
            Ok(landmarks) => {
                info!("loaded {} landmarks around {at}", landmarks.len());
                let mut commands: Vec<Command> =
                    self.markers.drain(..).map(Command::RemoveMarker).collect();
                for landmark in landmarks {
                    commands.push(Command::AddMarker(self.place(landmark)));
                }
                commands
            }
            Err(err) => {
                error!("error loading landmarks around {at}: {err}");
                vec![self.notify(NotificationKind::Danger, notification::LOAD_FAILED)]
            }
        }
    }

    fn place(&mut self, landmark: Landmark) -> Marker {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.push(id);
        Marker::for_landmark(id, landmark, &self.styles, &self.settings.uploads_base)
    }

    fn submit(&mut self, form: LandmarkForm) -> Vec<Command> {
        let Some(at) = self.selected else {
            debug!("submit ignored, no location selected");
            return Vec::new();
        };
        if self.submitting {
            debug!("submit ignored, already submitting");
            return Vec::new();
        }
        self.submitting = true;
        vec![
            Command::SetSubmitControl(SubmitControl::Busy),
            Command::PostLandmark(form.at(at)),
        ]
    }

    fn submit_finished(
        &mut self,
        landmark: NewLandmark,
        result: Result<(), ApiError>,
    ) -> Vec<Command> {
        self.submitting = false;
        self.selected = None;
        let mut commands = match result {
            Err(ApiError::Unauthorized) => {
                info!("not signed in, redirecting to {}", self.settings.login_route);
                vec![Command::Redirect(self.settings.login_route.clone())]
            }
            Err(err) => {
                error!("error adding landmark: {err}");
                vec![self.notify(NotificationKind::Danger, notification::ADD_FAILED)]
            }
            Ok(()) => {
                info!("added landmark {}", landmark.name);
                let mut commands = match self.settings.after_submit {
                    AfterSubmit::Refetch => vec![Command::FetchLandmarks(landmark.position())],
                    AfterSubmit::Optimistic => {
                        vec![Command::AddMarker(self.place(landmark.into()))]
                    }
                };
                commands.push(self.notify(NotificationKind::Success, notification::ADDED));
                commands.push(Command::ResetForm);
                commands
            }
        };
        commands.push(Command::SetSubmitControl(SubmitControl::Disabled));
        commands
    }

    fn notify(&mut self, kind: NotificationKind, message: &str) -> Command {
        let id = NotificationId(self.next_notification);
        self.next_notification += 1;
        self.notifications.push(id);
        Command::ShowNotification(Notification {
            id,
            kind,
            message: message.to_string(),
            expires_after: self.settings.notification_ttl,
        })
    }

    fn expire(&mut self, id: NotificationId) -> Vec<Command> {
        match self.notifications.iter().position(|active| *active == id) {
            Some(index) => {
                self.notifications.remove(index);
                vec![Command::RemoveNotification(id)]
            }
            None => Vec::new(),
        }
    }
}
