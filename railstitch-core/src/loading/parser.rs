use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::warn;

use super::raw_types::{OverpassResponse, RawElement};
use crate::Error;

/// Reads the elements of an Overpass JSON response.
///
/// Elements that do not match their declared type (a node without
/// coordinates, a way with non-integer node ids) are skipped with a warning.
///
/// # Errors
///
/// Fails if the input is not an Overpass JSON document
pub fn parse_elements<R: Read>(reader: R) -> Result<Vec<RawElement>, Error> {
    let response: OverpassResponse = serde_json::from_reader(reader)?;

    let mut elements = Vec::with_capacity(response.elements.len());
    for (index, value) in response.elements.into_iter().enumerate() {
        let id = value.get("id").cloned();
        match serde_json::from_value::<RawElement>(value) {
            Ok(element) => elements.push(element),
            Err(e) => warn!(
                "skipping malformed element #{index} (id {}): {e}",
                id.map_or_else(|| "unknown".to_string(), |id| id.to_string())
            ),
        }
    }
    Ok(elements)
}

/// Reads the elements of an Overpass JSON file
pub fn read_elements(path: &Path) -> Result<Vec<RawElement>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    parse_elements(BufReader::new(file))
}
