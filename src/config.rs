//! Table storage and plunger configuration.
//!
//! A table document is a YAML file holding named items; the plunger's
//! immutable per-table parameters are looked up by item name, so one
//! document can describe several plunger lanes:
//!
//! ```text
//! items:
//!   plunger1:
//!     kind: plunger
//!     x: 889.0
//!     x2: 914.0
//!     ...
//!   plunger_left:
//!     kind: plunger
//!     ...
//! ```
//!
//! Configuration is loaded once at entity construction and never
//! mutated afterwards. Missing or malformed fields fail the load —
//! they are never silently defaulted.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error type for table storage operations.
#[derive(Debug)]
pub enum StorageError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
    Invalid(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
            StorageError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            StorageError::NotFound(name) => write!(f, "Item not found: {}", name),
            StorageError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::IoError(err)
    }
}

impl From<serde_yaml::Error> for StorageError {
    fn from(err: serde_yaml::Error) -> Self {
        StorageError::ParseError(err)
    }
}

/// Immutable per-table plunger parameters.
///
/// Geometry fields are in table units; see `types` for the coordinate
/// conventions. `frame_top` is the forward travel bound (end of
/// stroke), `frame_bottom` the retracted bound (beginning of stroke),
/// with `frame_top < frame_bottom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlungerConfig {
    /// Left extent of the rod tip face.
    pub x: f64,
    /// Right extent of the rod tip face.
    pub x2: f64,
    /// Rest height of the rod above the playfield surface.
    pub height: f64,
    /// Forward travel bound (rod fully forward).
    pub frame_top: f64,
    /// Retracted travel bound (rod fully pulled back).
    pub frame_bottom: f64,
    /// Number of animation frames sampled across the stroke.
    pub frame_count: u32,
    /// Material reference for the rendering collaborator.
    pub material: String,
    /// Texture reference for the rendering collaborator.
    pub texture: String,
    /// Whether the rendering collaborator should draw this plunger.
    pub visible: bool,
    /// Spring stiffness: forward acceleration per unit of displacement
    /// from rest (1/s²).
    pub spring_strength: f64,
    /// Retraction rate for `pull_back` (units/s).
    pub pull_speed: f64,
    /// Solenoid-kicker mode: `fire` always releases from full travel
    /// under constant force.
    pub auto_launch: bool,
    /// Named surface used for spawn-height lookups.
    pub surface: String,
}

/// Fraction of the stroke the rod parks behind the forward stop.
///
/// A mechanical plunger rests with a light preload rather than flat
/// against its stop; the gap is what lets a fired rod sweep through a
/// ball resting at the tip before the stop arrests it.
pub const PARK_FRACTION: f64 = 0.01;

impl PlungerConfig {
    /// Rest position of the rod, where the spring is relaxed.
    pub fn rest_pos(&self) -> f64 {
        self.frame_top + PARK_FRACTION * self.stroke()
    }

    /// Total stroke length.
    pub fn stroke(&self) -> f64 {
        self.frame_bottom - self.frame_top
    }

    /// Midpoint of the tip face's lateral extent.
    pub fn tip_center_x(&self) -> f64 {
        0.5 * (self.x + self.x2)
    }

    /// Structural validation, applied after deserialization.
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.x >= self.x2 {
            return Err(StorageError::Invalid(format!(
                "tip extents reversed: x={} x2={}",
                self.x, self.x2
            )));
        }
        if self.frame_top >= self.frame_bottom {
            return Err(StorageError::Invalid(format!(
                "travel bounds reversed: frame_top={} frame_bottom={}",
                self.frame_top, self.frame_bottom
            )));
        }
        if self.frame_count < 2 {
            return Err(StorageError::Invalid(format!(
                "frame_count must be at least 2, got {}",
                self.frame_count
            )));
        }
        if self.spring_strength <= 0.0 || self.pull_speed <= 0.0 {
            return Err(StorageError::Invalid(format!(
                "speeds must be positive: spring_strength={} pull_speed={}",
                self.spring_strength, self.pull_speed
            )));
        }
        Ok(())
    }
}

/// One named item inside a table document.
///
/// The `kind` tag keeps room for the other element types a full table
/// stores; this crate only consumes `plunger` items.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableItem {
    kind: String,
    #[serde(flatten)]
    fields: serde_yaml::Value,
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    items: BTreeMap<String, TableItem>,
}

/// File-backed table storage with by-name item lookup.
pub struct TableStorage {
    path: PathBuf,
}

impl TableStorage {
    /// Create storage over the given table document path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load and validate the plunger item with the given name.
    pub fn load_plunger(&self, name: &str) -> Result<PlungerConfig, StorageError> {
        let contents = fs::read_to_string(&self.path)?;
        load_plunger_from_str(&contents, name)
    }

    /// List the names of all plunger items in the document.
    pub fn list_plungers(&self) -> Result<Vec<String>, StorageError> {
        let contents = fs::read_to_string(&self.path)?;
        let doc: TableDocument = serde_yaml::from_str(&contents)?;
        let mut names: Vec<String> = doc
            .items
            .iter()
            .filter(|(_, item)| item.kind == "plunger")
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Load a plunger configuration from an in-memory table document.
pub fn load_plunger_from_str(document: &str, name: &str) -> Result<PlungerConfig, StorageError> {
    let doc: TableDocument = serde_yaml::from_str(document)?;
    let item = doc
        .items
        .get(name)
        .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
    if item.kind != "plunger" {
        return Err(StorageError::Invalid(format!(
            "item '{}' has kind '{}', expected 'plunger'",
            name, item.kind
        )));
    }
    let config: PlungerConfig = serde_yaml::from_value(item.fields.clone())?;
    config.validate()?;
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DOC: &str = r#"
items:
  plunger1:
    kind: plunger
    x: 889.0
    x2: 914.0
    height: 20.0
    frame_top: 2003.0
    frame_bottom: 2113.0
    frame_count: 26
    material: "PlungerMat"
    texture: "PlungerTex"
    visible: true
    spring_strength: 4000.0
    pull_speed: 300.0
    auto_launch: false
    surface: "playfield"
  bumper1:
    kind: bumper
    x: 100.0
"#;

    #[test]
    fn test_load_plunger_by_name() {
        let config = load_plunger_from_str(TEST_DOC, "plunger1").unwrap();
        assert_eq!(config.frame_count, 26);
        assert!((config.x2 - 914.0).abs() < 1e-12);
        assert!(!config.auto_launch);
        assert_eq!(config.surface, "playfield");
    }

    #[test]
    fn test_load_missing_item() {
        let result = load_plunger_from_str(TEST_DOC, "no_such_plunger");
        match result {
            Err(StorageError::NotFound(name)) => assert_eq!(name, "no_such_plunger"),
            other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_load_wrong_kind() {
        let result = load_plunger_from_str(TEST_DOC, "bumper1");
        assert!(matches!(result, Err(StorageError::Invalid(_))));
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let doc = r#"
items:
  plunger1:
    kind: plunger
    x: 0.0
    x2: 10.0
"#;
        let result = load_plunger_from_str(doc, "plunger1");
        assert!(
            matches!(result, Err(StorageError::ParseError(_))),
            "missing fields must fail the load, not default silently"
        );
    }

    #[test]
    fn test_reversed_bounds_rejected() {
        let doc = TEST_DOC.replace("frame_bottom: 2113.0", "frame_bottom: 1900.0");
        let result = load_plunger_from_str(&doc, "plunger1");
        assert!(matches!(result, Err(StorageError::Invalid(_))));
    }

    #[test]
    fn test_derived_geometry() {
        let config = load_plunger_from_str(TEST_DOC, "plunger1").unwrap();
        assert!((config.rest_pos() - 2004.1).abs() < 1e-9);
        assert!((config.stroke() - 110.0).abs() < 1e-12);
        assert!((config.tip_center_x() - 901.5).abs() < 1e-12);
    }

    #[test]
    fn test_file_backed_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.yaml");
        std::fs::write(&path, TEST_DOC).unwrap();

        let storage = TableStorage::new(&path);
        let config = storage.load_plunger("plunger1").unwrap();
        assert_eq!(config.frame_count, 26);

        assert_eq!(storage.list_plungers().unwrap(), vec!["plunger1".to_string()]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let storage = TableStorage::new("/nonexistent/table.yaml");
        assert!(matches!(
            storage.load_plunger("plunger1"),
            Err(StorageError::IoError(_))
        ));
    }
}
