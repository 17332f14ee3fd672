//! Seed files - an ordered list of mutations replayed into a store.
//!
//! Stands in for the chain sync service when running offline: the viewer
//! loads one on start-up and again on reload. `.json` files are parsed as
//! JSON, everything else as YAML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::Store;
use crate::messages::Mutation;

/// Parse mutations from text in the given format
pub fn parse_seed(content: &str, json: bool) -> Result<Vec<Mutation>> {
    let mutations = if json {
        serde_json::from_str(content)?
    } else {
        serde_yaml::from_str(content)?
    };
    Ok(mutations)
}

/// Read the mutations in a seed file
pub fn load_seed(path: &Path) -> Result<Vec<Mutation>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let mutations = parse_seed(&content, json)
        .with_context(|| format!("parsing seed file {}", path.display()))?;

    tracing::info!(path = %path.display(), count = mutations.len(), "Seed loaded");
    Ok(mutations)
}

/// Write mutations to a YAML seed file
pub fn save_seed(path: &Path, mutations: &[Mutation]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_yaml::to_string(mutations)?;
    fs::write(path, content)?;
    Ok(())
}

/// Load a seed file and replay it into `store`, returning how many
/// mutations were applied
pub fn replay_seed(store: &mut Store, path: &Path) -> Result<usize> {
    let mutations = load_seed(path)?;
    let count = mutations.len();
    store.replay(mutations);
    Ok(count)
}
