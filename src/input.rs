use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use color_eyre::eyre::{self, bail, eyre, Result, WrapErr};

use crate::types::{
    geom::LatLng,
    landmark::{Category, LandmarkForm, Photo},
};

pub const USAGE: &str = "commands: click <lat>,<lng> | open <marker> | add <name> | <description> [| <category> [| <photo>]] | markers | quit";

/// One line typed into the headless page
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Click(LatLng),
    /// Hover a marker and print its popup
    Open(u64),
    Add {
        form: LandmarkForm,
        photo: Option<PathBuf>,
    },
    Markers,
    Quit,
}

impl FromStr for Input {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "click" => Ok(Input::Click(rest.parse()?)),
            "open" => {
                let id = rest.trim().trim_start_matches("marker#");
                let id = id
                    .parse()
                    .wrap_err_with(|| format!("invalid marker id {rest:?}"))?;
                Ok(Input::Open(id))
            }
            "add" => parse_add(rest),
            "markers" => Ok(Input::Markers),
            "quit" | "exit" => Ok(Input::Quit),
            "" => bail!(USAGE),
            other => Err(eyre!("unknown command {other:?}; {USAGE}")),
        }
    }
}

fn parse_add(rest: &str) -> Result<Input> {
    let mut fields = rest.split('|').map(str::trim);
    let name = fields.next().filter(|name| !name.is_empty());
    let Some(name) = name else {
        bail!("add needs a name; {USAGE}");
    };
    let description = fields.next().unwrap_or_default();
    let category = fields
        .next()
        .filter(|category| !category.is_empty())
        .map(|category| Category::from(category.to_ascii_lowercase()));
    let photo = fields
        .next()
        .filter(|photo| !photo.is_empty())
        .map(PathBuf::from);
    Ok(Input::Add {
        form: LandmarkForm {
            name: name.to_string(),
            description: description.to_string(),
            category,
            photo: None,
        },
        photo,
    })
}

pub async fn read_photo(path: &Path) -> Result<Photo> {
    let bytes = tokio::fs::read(path)
        .await
        .wrap_err_with(|| format!("reading photo {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(eyre!("photo path {} has no file name", path.display()))?
        .to_string();
    Ok(Photo {
        file_name,
        content_type: content_type(path).to_string(),
        bytes,
    })
}

fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
