use std::sync::Arc;

use color_eyre::eyre::Result;
use geojson::GeoJson;
use landmark_map::{
    clients::LandmarkClient,
    config::Config,
    controller::{Event, MapPageController},
    headless::HeadlessMap,
    input::{self, Input},
    marker::MarkerId,
    page::MapPage,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!("Using landmarks api at {}", config.api_url);
    let client = LandmarkClient::new(&config.api_url, config.session.as_deref())?;
    let mut page = MapPage::new(
        MapPageController::new(config.page),
        HeadlessMap::default(),
        client,
        Arc::new(config.geolocation),
    );

    page.open();
    page.settle().await;
    info!("{} landmarks on the map; {}", page.surface().markers.len(), input::USAGE);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = match line.parse::<Input>() {
                    Ok(input) => input,
                    Err(err) => {
                        warn!("{err}");
                        continue;
                    }
                };
                match input {
                    Input::Click(at) => page.dispatch(Event::MapClicked(at)),
                    Input::Open(id) => match page.surface_mut().hover(Some(MarkerId(id))) {
                        Some(marker) => println!("{}", marker.popup),
                        None => warn!("no marker {}", MarkerId(id)),
                    },
                    Input::Add { mut form, photo } => {
                        if let Some(path) = photo {
                            match input::read_photo(&path).await {
                                Ok(photo) => form.photo = Some(photo),
                                Err(err) => {
                                    warn!("{err:#}");
                                    continue;
                                }
                            }
                        }
                        page.dispatch(Event::SubmitRequested(form));
                    }
                    Input::Markers => {
                        let overlay = GeoJson::from(page.surface().to_feature_collection()?);
                        println!("{overlay}");
                    }
                    Input::Quit => break,
                }
            }
            // loads, submits and notification timers land here between lines
            _ = page.next() => {}
        }
        if let Some(route) = &page.surface().redirected_to {
            info!("Sign in at {route} and set LANDMARKS_SESSION");
            break;
        }
    }

    Ok(())
}
