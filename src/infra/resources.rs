//! Loading the archive's resource list.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::resources::{Resources, SearchResource};
use crate::presentation::template::ItemTemplate;

use super::error::InfraError;

/// Decode a JSON array of post records.
///
/// The whole list is rejected when any record is malformed; the error names
/// the offending field and its position in the input.
pub fn parse_resources(json: &str) -> Result<Resources, InfraError> {
    let records: Vec<SearchResource> =
        serde_json::from_str(json).map_err(|err| InfraError::resources(err.to_string()))?;
    Ok(Resources::new(records))
}

pub fn load_resources(path: &Path) -> Result<Resources, InfraError> {
    let json = fs::read_to_string(path).map_err(|source| InfraError::read_file(path, source))?;
    let resources = parse_resources(&json)?;
    debug!(path = %path.display(), count = resources.len(), "loaded resource list");
    Ok(resources)
}

pub fn load_item_template(path: &Path) -> Result<ItemTemplate, InfraError> {
    let source = fs::read_to_string(path).map_err(|source| InfraError::read_file(path, source))?;
    Ok(ItemTemplate::new(source))
}
