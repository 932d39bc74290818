use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use fs_err as fs;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::CatalogError;
use crate::model::{Label, PlantRecord};

/// The bundled plant dataset. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<PlantRecord>,
}

/// Distinct observed values per facet, each sorted ascending by label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub states: Vec<String>,
    pub sizes: Vec<String>,
    pub flower_colors: Vec<String>,
    pub heights: Vec<String>,
    pub types: Vec<String>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;
        info!(path = %path.display(), records = catalog.len(), "loaded plant catalog");
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let records: Vec<PlantRecord> = serde_json::from_str(raw)?;
        Self::from_records(records)
    }

    /// Validates id uniqueness and width before accepting the records.
    pub fn from_records(records: Vec<PlantRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for r in &records {
            if !seen.insert(r.id.as_str()) {
                return Err(CatalogError::DuplicateId(r.id.clone()));
            }
            if !r.plant_width.is_finite() || r.plant_width < 0.0 {
                return Err(CatalogError::InvalidWidth { id: r.id.clone(), width: r.plant_width });
            }
        }
        debug!(records = records.len(), "catalog records validated");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PlantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn facets(&self) -> Facets {
        Facets {
            states: distinct(self.records.iter().map(|r| r.state.label())),
            sizes: distinct(self.records.iter().map(|r| r.plant_size.label())),
            flower_colors: distinct(self.records.iter().flat_map(|r| r.flower_color.iter())),
            heights: distinct(self.records.iter().map(|r| r.plant_height.label())),
            types: distinct(self.records.iter().map(|r| r.plant_type.label())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
