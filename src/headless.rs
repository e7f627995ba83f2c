use color_eyre::eyre::Result;
use geo::VincentyDistance;
use geo_types::Point;
use geojson::{Feature, FeatureCollection, Geometry};
use tracing::{debug, info, warn};

use crate::{
    controller::SubmitControl,
    marker::{style::MarkerStyle, Marker, MarkerId},
    notification::{Notification, NotificationId, NotificationKind},
    overlay::{Legend, TileLayer},
    page::MapSurface,
    types::{feature::MarkerProperties, geom::LatLng},
};

/// An in-memory map page: keeps what a browser would show and logs every change
#[derive(Debug, Clone, Default)]
pub struct HeadlessMap {
    pub center: Option<LatLng>,
    pub zoom: u8,
    pub tile_layers: Vec<TileLayer>,
    /// Rendered legend control
    pub legend: Option<String>,
    pub markers: Vec<Marker>,
    pub hovered: Option<(MarkerId, MarkerStyle)>,
    pub submit: Option<SubmitControl>,
    pub notifications: Vec<Notification>,
    pub form_resets: usize,
    pub redirected_to: Option<String>,
}

impl HeadlessMap {
    pub fn marker_at(&self, at: LatLng) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.position == at)
    }

    /// Puts the pointer over a marker, or takes it off with `None`.
    /// Returns the marker the pointer is now over.
    pub fn hover(&mut self, id: Option<MarkerId>) -> Option<&Marker> {
        let marker = id.and_then(|id| self.markers.iter().find(|marker| marker.id == id));
        self.hovered = marker.and_then(|marker| Some((marker.id, marker.hover_style()?)));
        marker
    }

    /// The marker overlay as geojson points, with distances from the view centre
    pub fn to_feature_collection(&self) -> Result<FeatureCollection> {
        let center = self.center.map(Point::<f64>::from);
        let features = self
            .markers
            .iter()
            .map(|marker| {
                let point = Point::<f64>::from(marker.position);
                let properties = MarkerProperties {
                    name: marker.landmark.name.clone(),
                    source: marker.landmark.source.to_string(),
                    category: marker.landmark.category.as_ref().map(|c| c.to_string()),
                    distance: center.and_then(|center| center.vincenty_distance(&point).ok()),
                };
                Ok(Feature {
                    id: Some(geojson::feature::Id::Number(marker.id.0.into())),
                    geometry: Some(Geometry::new((&point).into())),
                    properties: Some(properties.try_into()?),
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<Feature>>>()?;
        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}

impl MapSurface for HeadlessMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        info!("view centred on {center} at zoom {zoom}");
        self.center = Some(center);
        self.zoom = zoom;
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        debug!("tile layer {}", layer.url_template);
        self.tile_layers.push(layer.clone());
    }

    fn add_legend(&mut self, legend: &Legend) {
        debug!("legend with {} entries", legend.entries.len());
        self.legend = Some(legend.to_html().into_string());
    }

    fn add_marker(&mut self, marker: Marker) {
        debug!(
            "{} {:?} at {}",
            marker.id, marker.landmark.name, marker.position
        );
        self.markers.push(marker);
    }

    fn remove_marker(&mut self, id: MarkerId) {
        let before = self.markers.len();
        self.markers.retain(|marker| marker.id != id);
        if self.markers.len() == before {
            warn!("{id} was not on the map");
        }
        if matches!(self.hovered, Some((hovered, _)) if hovered == id) {
            self.hovered = None;
        }
    }

    fn set_submit_control(&mut self, state: SubmitControl) {
        debug!("submit button {state:?} ({})", state.label());
        self.submit = Some(state);
    }

    fn show_notification(&mut self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => info!(
                class = notification.kind.alert_class(),
                "{}",
                notification.message
            ),
            NotificationKind::Danger => warn!(
                class = notification.kind.alert_class(),
                "{}",
                notification.message
            ),
        }
        self.notifications.push(notification.clone());
    }

    fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.retain(|notification| notification.id != id);
    }

    fn reset_form(&mut self) {
        self.form_resets += 1;
    }

    fn redirect(&mut self, route: &str) {
        info!("redirecting to {route}");
        self.redirected_to = Some(route.to_string());
    }
}
