use std::str::FromStr;

use color_eyre::eyre::{Result, WrapErr};

use crate::{controller::PageSettings, geolocation::DeviceLocation};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Everything the headless page needs, read from `LANDMARKS_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub session: Option<String>,
    pub geolocation: DeviceLocation,
    pub page: PageSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut page = PageSettings::default();
        if let Some(fallback) = parsed(&lookup, "LANDMARKS_FALLBACK")? {
            page.fallback_center = fallback;
        }
        if let Some(kind) = parsed(&lookup, "LANDMARKS_MARKERS")? {
            page.marker_kind = kind;
        }
        if let Some(after_submit) = parsed(&lookup, "LANDMARKS_AFTER_SUBMIT")? {
            page.after_submit = after_submit;
        }
        if let Some(show_legend) = parsed(&lookup, "LANDMARKS_LEGEND")? {
            page.show_legend = show_legend;
        }
        if let Some(icon_base) = lookup("LANDMARKS_ICON_BASE") {
            page.icon_base = icon_base;
        }
        if let Some(uploads_base) = lookup("LANDMARKS_UPLOADS_BASE") {
            page.uploads_base = uploads_base;
        }
        Ok(Config {
            api_url: lookup("LANDMARKS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            session: lookup("LANDMARKS_SESSION"),
            geolocation: parsed(&lookup, "LANDMARKS_GEOLOCATION")?.unwrap_or_default(),
            page,
        })
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Into<color_eyre::eyre::Error>,
{
    lookup(key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|err| -> color_eyre::eyre::Error { err.into() })
                .wrap_err_with(|| format!("invalid {key}={value:?}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        controller::AfterSubmit, marker::style::MarkerKind, types::geom::LatLng,
    };

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.session, None);
        assert_eq!(config.geolocation, DeviceLocation::Unsupported);
        assert_eq!(config.page, PageSettings::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("LANDMARKS_API_URL", "http://landmarks.test"),
            ("LANDMARKS_GEOLOCATION", "denied"),
            ("LANDMARKS_FALLBACK", "40.7128,-74.0060"),
            ("LANDMARKS_MARKERS", "icon"),
            ("LANDMARKS_AFTER_SUBMIT", "optimistic"),
            ("LANDMARKS_LEGEND", "false"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://landmarks.test");
        assert_eq!(config.geolocation, DeviceLocation::Denied);
        assert_eq!(config.page.fallback_center, LatLng::new(40.7128, -74.0060));
        assert_eq!(config.page.marker_kind, MarkerKind::Icon);
        assert_eq!(config.page.after_submit, AfterSubmit::Optimistic);
        assert!(!config.page.show_legend);
    }

    #[test]
    fn names_the_bad_variable() {
        let err = config(&[("LANDMARKS_LEGEND", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("LANDMARKS_LEGEND"));
    }
}
