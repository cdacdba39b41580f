use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Deserializer};
use crate::texture_loader::load_sorted_image_paths;

/// One picture of the reel with its caption.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slide {
    #[serde(alias = "_id", deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(default, alias = "quote")]
    pub caption: String,
}

impl Slide {
    pub fn new(id: impl Into<String>, image_url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self { id: id.into(), image_url: image_url.into(), caption: caption.into() }
    }

    /// Filesystem path of the image, or `None` for remote and inline URLs,
    /// which are never fetched here.
    pub fn local_path(&self) -> Option<PathBuf> {
        let url = self.image_url.trim();
        if url.is_empty() {
            return None;
        }
        if let Some(path) = url.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }
        if url.contains("://") || url.starts_with("data:") {
            return None;
        }
        Some(PathBuf::from(url))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    List(Vec<Slide>),
    Wrapped { slides: Vec<Slide> },
}

/// Loads the reel from a JSON manifest or from a directory of images.
pub fn load_slides(source: &Path) -> Result<Vec<Slide>> {
    let slides = if source.is_dir() {
        load_directory(source)?
    } else {
        load_manifest(source)?
    };
    info!("Loaded {} slides from {}", slides.len(), source.display());
    Ok(slides)
}

pub fn load_manifest(path: &Path) -> Result<Vec<Slide>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid manifest {}", path.display()))?;
    let mut slides = match manifest {
        Manifest::List(slides) | Manifest::Wrapped { slides } => slides,
    };

    // Relative image paths are relative to the manifest
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for slide in slides.iter_mut() {
        if let Some(local) = slide.local_path() {
            if local.is_relative() {
                slide.image_url = base.join(local).to_string_lossy().into_owned();
            }
        }
    }
    Ok(slides)
}

/// Every image in `dir`, sorted by file name. A `<stem>.txt` next to an
/// image holds its caption.
pub fn load_directory(dir: &Path) -> Result<Vec<Slide>> {
    let paths = load_sorted_image_paths(dir)?;
    let slides = paths
        .into_iter()
        .map(|path| {
            let id = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let caption = fs::read_to_string(path.with_extension("txt"))
                .map(|text| text.trim().to_string())
                .unwrap_or_default();
            debug!("Slide {} caption {:?}", id, caption);
            Slide::new(id, path.to_string_lossy(), caption)
        })
        .collect();
    Ok(slides)
}
