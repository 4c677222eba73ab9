pub mod validation;

use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;

pub use validation::{validate_pool, PoolValidation, MIN_POOL_SIZE};

static CATALOG_DIR: Dir = include_dir!("src/catalog");

/// A single guessable picture. Read-only to the game engine.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRecord {
    pub id: u32,
    pub url: String,
    pub answer: String,
    /// Informational tier in 1..=5
    pub difficulty: u8,
}

impl ImageRecord {
    /// Trimmed, lower-cased answer used for guess comparison
    pub fn normalized_answer(&self) -> String {
        normalize(&self.answer)
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Deserialize)]
struct CatalogFile {
    name: String,
    #[serde(default)]
    size: Option<usize>,
    images: Vec<ImageRecord>,
}

/// Immutable set of candidate images a session is drawn from
#[derive(Clone, Debug)]
pub struct Catalog {
    name: String,
    images: Vec<ImageRecord>,
}

impl Catalog {
    /// Load one of the catalogs embedded in the binary, e.g. `pexels` or `classic`
    pub fn builtin(name: &str) -> Result<Self, CatalogError> {
        let file = CATALOG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
        let contents = file.contents_utf8().ok_or(CatalogError::Encoding)?;
        Self::from_json(contents)
    }

    /// Load a catalog from a JSON file on disk
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = from_str(json)?;
        if let Some(size) = file.size.filter(|&size| size != file.images.len()) {
            tracing::warn!(
                catalog = %file.name,
                declared = size,
                actual = file.images.len(),
                "catalog size does not match its image list"
            );
        }
        Self::from_images(file.name, file.images)
    }

    pub fn from_images(
        name: impl Into<String>,
        images: Vec<ImageRecord>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if images.is_empty() {
            return Err(CatalogError::Empty(name));
        }
        Ok(Self { name, images })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn validate(&self) -> PoolValidation {
        validate_pool(&self.images)
    }
}

#[cfg(test)]
pub(crate) fn test_image(id: u32, answer: &str, difficulty: u8) -> ImageRecord {
    ImageRecord {
        id,
        url: format!("https://example.test/{id}.jpeg"),
        answer: answer.to_string(),
        difficulty,
    }
}
