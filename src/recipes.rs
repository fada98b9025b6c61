//! Loading recipe documents from JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use larder_shopping::RecipeContext;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid recipe JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no recipes given")]
    Empty,
}

/// A file holds either one recipe document or an array of them
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeDocument {
    Many(Vec<RecipeContext>),
    One(RecipeContext),
}

pub fn parse_recipes(json: &str) -> Result<Vec<RecipeContext>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        RecipeDocument::Many(recipes) => recipes,
        RecipeDocument::One(recipe) => vec![recipe],
    })
}

pub fn load_file(path: &Path) -> Result<Vec<RecipeContext>, LoadError> {
    let json = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let recipes = parse_recipes(&json).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), recipes = recipes.len(), "loaded recipe file");

    Ok(recipes)
}

/// Load every file in order; a shopping list needs at least one recipe
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RecipeContext>, LoadError> {
    let mut recipes = Vec::new();

    for path in paths {
        recipes.extend(load_file(path.as_ref())?);
    }

    if recipes.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(recipes)
}
