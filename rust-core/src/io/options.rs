//! Options document of a stacking run.
//!
//! The document is YAML (or JSON, selected by a `.json` extension):
//!
//! ```yaml
//! base_layers:
//!   - name: graphene
//!     path: graphene.xyz
//!   - name: hBN
//!     path: hBN.xyz
//! heterostructure:
//!   - graphene: 1
//!   - hBN: 2
//! gap: 3.0
//! max_misfit: 0.005
//! max_area: 400.0
//! vacuum_size: 10.0
//! ```
//!
//! The four numeric fields are optional and default to the generator defaults.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GAP, DEFAULT_MAX_AREA, DEFAULT_MAX_MISFIT, DEFAULT_VACUUM_SIZE};
use crate::error::{Result, StackError};
use crate::generator::{GeneratorSettings, LayerSpec};
use crate::io::xyz::read_xyz;
use crate::structure::Structure;

/// A named base layer and the structure file it is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseLayerEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackOptions {
    pub base_layers: Vec<BaseLayerEntry>,

    /// Stacking sequence bottom to top, each entry a single `{name: count}` mapping
    pub heterostructure: Vec<BTreeMap<String, i64>>,

    #[serde(default = "default_gap")]
    pub gap: f64,

    #[serde(default = "default_max_misfit")]
    pub max_misfit: f64,

    #[serde(default = "default_max_area")]
    pub max_area: f64,

    #[serde(default = "default_vacuum_size")]
    pub vacuum_size: f64,
}

fn default_gap() -> f64 {
    DEFAULT_GAP
}

fn default_max_misfit() -> f64 {
    DEFAULT_MAX_MISFIT
}

fn default_max_area() -> f64 {
    DEFAULT_MAX_AREA
}

fn default_vacuum_size() -> f64 {
    DEFAULT_VACUUM_SIZE
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> StackError {
    StackError::InvalidOptions {
        field: field.into(),
        message: message.into(),
    }
}

impl StackOptions {
    /// Load and validate an options file. `.json` files are read as JSON, anything else as
    /// YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse and validate a YAML options document.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let options: StackOptions = serde_yaml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Parse and validate a JSON options document.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let options: StackOptions = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Check shapes and numeric ranges. Layer names and counts are checked by the generator.
    pub fn validate(&self) -> Result<()> {
        if self.base_layers.is_empty() {
            return Err(invalid("base_layers", "at least one base layer is required"));
        }
        let mut seen = HashSet::new();
        for (i, layer) in self.base_layers.iter().enumerate() {
            if layer.name.is_empty() {
                return Err(invalid(format!("base_layers[{}].name", i), "must not be empty"));
            }
            if !seen.insert(layer.name.as_str()) {
                return Err(invalid(
                    format!("base_layers[{}].name", i),
                    format!("duplicate layer name '{}'", layer.name),
                ));
            }
        }

        for (i, entry) in self.heterostructure.iter().enumerate() {
            if entry.len() != 1 {
                return Err(invalid(
                    format!("heterostructure[{}]", i),
                    format!("expected exactly one {{name: count}} pair, found {}", entry.len()),
                ));
            }
        }

        self.settings().validate()
    }

    /// Stacking sequence in document order.
    pub fn layer_specs(&self) -> Vec<LayerSpec> {
        self.heterostructure
            .iter()
            .flat_map(|entry| entry.iter().map(|(name, &count)| LayerSpec::new(name.as_str(), count)))
            .collect()
    }

    pub fn settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            gap: self.gap,
            max_misfit: self.max_misfit,
            max_area: self.max_area,
            vacuum_size: self.vacuum_size,
        }
    }

    /// Read every base layer; relative paths are taken from `root`.
    pub fn load_base_layers(&self, root: &Path) -> Result<HashMap<String, Structure>> {
        let mut layers = HashMap::with_capacity(self.base_layers.len());
        for entry in &self.base_layers {
            let path = if entry.path.is_relative() {
                root.join(&entry.path)
            } else {
                entry.path.clone()
            };
            let structure = read_xyz(&path)?;
            debug!(
                "loaded base layer '{}' from {} ({} atoms)",
                entry.name,
                path.display(),
                structure.len()
            );
            layers.insert(entry.name.clone(), structure);
        }
        Ok(layers)
    }
}
