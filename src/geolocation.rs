use std::{str::FromStr, time::Duration};

use color_eyre::eyre;
use futures::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

use crate::types::geom::LatLng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub timeout: Duration,
    pub high_accuracy: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        PositionOptions {
            timeout: Duration::from_secs(5),
            high_accuracy: true,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("permission to read the position was denied")]
    PermissionDenied,
    #[error("position unavailable")]
    Unavailable,
    #[error("no position within {0:?}")]
    Timeout(Duration),
}

/// Source of the device position
pub trait Geolocator: Send + Sync {
    fn is_supported(&self) -> bool;

    fn current_position(
        &self,
        options: PositionOptions,
    ) -> BoxFuture<'static, Result<LatLng, GeolocationError>>;
}

/// Ask for the position, giving up after `options.timeout`
pub async fn locate(
    geolocator: &dyn Geolocator,
    options: PositionOptions,
) -> Result<LatLng, GeolocationError> {
    tokio::time::timeout(options.timeout, geolocator.current_position(options))
        .await
        .map_err(|_| GeolocationError::Timeout(options.timeout))?
}

/// A device whose answer is known up front
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DeviceLocation {
    Fixed(LatLng),
    Denied,
    #[default]
    Unsupported,
}

impl Geolocator for DeviceLocation {
    fn is_supported(&self) -> bool {
        !matches!(self, DeviceLocation::Unsupported)
    }

    fn current_position(
        &self,
        _options: PositionOptions,
    ) -> BoxFuture<'static, Result<LatLng, GeolocationError>> {
        let result = match *self {
            DeviceLocation::Fixed(at) => Ok(at),
            DeviceLocation::Denied => Err(GeolocationError::PermissionDenied),
            DeviceLocation::Unsupported => Err(GeolocationError::Unavailable),
        };
        future::ready(result).boxed()
    }
}

/// `denied`, `unsupported`, or a `lat,lng` pair
impl FromStr for DeviceLocation {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "denied" => Ok(DeviceLocation::Denied),
            "unsupported" | "" => Ok(DeviceLocation::Unsupported),
            _ => Ok(DeviceLocation::Fixed(s.parse()?)),
        }
    }
}
