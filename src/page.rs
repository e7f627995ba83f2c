use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::{
    clients::LandmarkClient,
    controller::{Command, Event, MapPageController, SubmitControl},
    geolocation::{self, Geolocator},
    marker::{Marker, MarkerId},
    notification::{Notification, NotificationId},
    overlay::{Legend, TileLayer},
    types::geom::LatLng,
};

/// The map widget and the DOM around it
pub trait MapSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    fn add_legend(&mut self, legend: &Legend);
    fn add_marker(&mut self, marker: Marker);
    fn remove_marker(&mut self, id: MarkerId);
    fn set_submit_control(&mut self, state: SubmitControl);
    fn show_notification(&mut self, notification: &Notification);
    fn remove_notification(&mut self, id: NotificationId);
    fn reset_form(&mut self);
    fn redirect(&mut self, route: &str);
}

/// Runs a controller against a surface, the landmarks endpoint and a geolocation source.
/// Work that waits (requests, position, notification timers) runs on spawned tasks
/// whose results come back as events; events are handled one at a time.
pub struct MapPage<S> {
    controller: MapPageController,
    surface: S,
    client: LandmarkClient,
    geolocator: Arc<dyn Geolocator>,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,
    in_flight: usize,
}

impl<S: MapSurface> MapPage<S> {
    pub fn new(
        controller: MapPageController,
        surface: S,
        client: LandmarkClient,
        geolocator: Arc<dyn Geolocator>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        MapPage {
            controller,
            surface,
            client,
            geolocator,
            events_tx,
            events_rx,
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &MapPageController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Builds the map and starts locating the user
    pub fn open(&mut self) {
        let geolocation_supported = self.geolocator.is_supported();
        self.dispatch(Event::PageLoaded {
            geolocation_supported,
        });
    }

    /// Hands an event from outside the page (clicks, form submits) to the controller
    pub fn dispatch(&mut self, event: Event) {
        for command in self.controller.handle(event) {
            self.execute(command);
        }
    }

    /// Results of the page's own spawned work. Only these settle outstanding requests.
    fn complete(&mut self, event: Event) {
        if event.is_io_completion() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        self.dispatch(event);
    }

    /// Handles whatever has already arrived, then waits until no request is outstanding.
    /// Notification timers don't count as outstanding.
    pub async fn settle(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.complete(event);
        }
        while self.in_flight > 0 {
            match self.events_rx.recv().await {
                Some(event) => self.complete(event),
                None => break,
            }
        }
    }

    /// Waits for the next result of spawned work, timers included, and handles it
    pub async fn next(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.complete(event);
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::SetView { center, zoom } => self.surface.set_view(center, zoom),
            Command::AddTileLayer(layer) => self.surface.add_tile_layer(&layer),
            Command::AddLegend(legend) => self.surface.add_legend(&legend),
            Command::RemoveMarker(id) => self.surface.remove_marker(id),
            Command::AddMarker(marker) => self.surface.add_marker(marker),
            Command::SetSubmitControl(state) => self.surface.set_submit_control(state),
            Command::ResetForm => self.surface.reset_form(),
            Command::Redirect(route) => self.surface.redirect(&route),
            Command::RemoveNotification(id) => self.surface.remove_notification(id),
            Command::ShowNotification(notification) => {
                self.surface.show_notification(&notification);
                let (id, after) = (notification.id, notification.expires_after);
                self.spawn_timer(after, Event::NotificationExpired(id));
            }
            Command::RequestPosition(options) => {
                let geolocator = self.geolocator.clone();
                self.spawn_io(async move {
                    match geolocation::locate(geolocator.as_ref(), options).await {
                        Ok(at) => Event::PositionResolved(at),
                        Err(err) => Event::PositionUnavailable(err),
                    }
                });
            }
            Command::FetchLandmarks(at) => {
                let client = self.client.clone();
                self.spawn_io(async move {
                    let result = client.list(at).await;
                    Event::LandmarksLoaded { at, result }
                });
            }
            Command::PostLandmark(landmark) => {
                let client = self.client.clone();
                self.spawn_io(async move {
                    let result = client.create(&landmark).await;
                    Event::SubmitFinished { landmark, result }
                });
            }
        }
    }

    fn spawn_io<F>(&mut self, work: F)
    where
        F: std::future::Future<Output = Event> + Send + 'static,
    {
        self.in_flight += 1;
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let event = work.await;
            if events.send(event).is_err() {
                debug!("page closed before request finished");
            }
        });
    }

    fn spawn_timer(&self, after: std::time::Duration, event: Event) {
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if events.send(event).is_err() {
                debug!("page closed before notification expired");
            }
        });
    }
}
