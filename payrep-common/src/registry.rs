//! Component registry: authoritative field-name → bucket mapping
//!
//! The master component list is owned by configuration and read-only to the
//! pipeline. Each ingestion or report run loads one immutable snapshot and
//! passes it explicitly; nothing reads ambient global state.

use crate::error::{Error, Result};
use crate::types::Bucket;
use serde::Deserialize;
use std::collections::HashMap;

/// One master-data component.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentEntry {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub bucket: Bucket,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    component: Vec<ComponentEntry>,
}

/// Immutable snapshot of the active component registry.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    by_name: HashMap<String, Bucket>,
    entries: Vec<ComponentEntry>,
}

impl ComponentRegistry {
    /// Build a snapshot from entries.
    ///
    /// Inactive entries are kept for listing but excluded from lookup.
    /// Duplicate names among active entries violate the registry invariant
    /// and are rejected.
    pub fn from_entries(entries: Vec<ComponentEntry>) -> Result<Self> {
        let mut by_name = HashMap::new();
        for entry in entries.iter().filter(|e| e.active) {
            if by_name.insert(entry.name.clone(), entry.bucket).is_some() {
                return Err(Error::Config(format!(
                    "duplicate active component name: {}",
                    entry.name
                )));
            }
        }
        Ok(Self { by_name, entries })
    }

    /// Load a registry snapshot from the TOML master file.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RegistryFile =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        Self::from_entries(file.component)
    }

    /// Load a registry snapshot from the master-data CSV export
    /// (`Code,Name,Type,Notes`; `Notes == "Inactive"` deactivates an entry).
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = reader.headers()?.clone();
        let idx = |name: &str| headers.iter().position(|h| h.trim() == name);
        let (code_i, name_i, type_i) = match (idx("Code"), idx("Name"), idx("Type")) {
            (Some(c), Some(n), Some(t)) => (c, n, t),
            _ => {
                return Err(Error::Config(
                    "master data CSV requires Code, Name and Type columns".into(),
                ))
            }
        };
        let notes_i = idx("Notes");

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record?;
            let get = |i: usize| record.get(i).unwrap_or("").trim().to_string();
            let (code, name) = (get(code_i), get(name_i));
            if code.is_empty() || name.is_empty() {
                continue;
            }
            let bucket = match get(type_i).to_uppercase().as_str() {
                "SALARY" => Bucket::Salary,
                "ALLOWANCE" => Bucket::Allowance,
                "DEDUCTION" => Bucket::Deduction,
                "NEUTRAL" => Bucket::Neutral,
                other => {
                    tracing::warn!(code = %code, component_type = %other,
                        "Skipping component with unknown type");
                    continue;
                }
            };
            let active = notes_i.map(|i| get(i) != "Inactive").unwrap_or(true);
            entries.push(ComponentEntry { code, name, bucket, active });
        }
        Self::from_entries(entries)
    }

    /// Declared bucket for a field name, active entries only.
    pub fn lookup(&self, field_name: &str) -> Option<Bucket> {
        self.by_name.get(field_name).copied()
    }

    /// Active entries as `(name, bucket)` pairs.
    pub fn list_active(&self) -> impl Iterator<Item = (&str, Bucket)> {
        self.entries
            .iter()
            .filter(|e| e.active)
            .map(|e| (e.name.as_str(), e.bucket))
    }

    /// Master entry (active or not) by exact name.
    pub fn entry_by_name(&self, name: &str) -> Option<&ComponentEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, bucket: Bucket, active: bool) -> ComponentEntry {
        ComponentEntry {
            code: format!("C-{name}"),
            name: name.into(),
            bucket,
            active,
        }
    }

    #[test]
    fn lookup_ignores_inactive_entries() {
        let registry = ComponentRegistry::from_entries(vec![
            entry("Basic Salary", Bucket::Salary, true),
            entry("Old Component", Bucket::Deduction, false),
        ])
        .unwrap();
        assert_eq!(registry.lookup("Basic Salary"), Some(Bucket::Salary));
        assert_eq!(registry.lookup("Old Component"), None);
    }

    #[test]
    fn duplicate_active_names_rejected() {
        let result = ComponentRegistry::from_entries(vec![
            entry("Bonus", Bucket::Allowance, true),
            entry("Bonus", Bucket::Deduction, true),
        ]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn duplicate_name_allowed_when_one_is_inactive() {
        let registry = ComponentRegistry::from_entries(vec![
            entry("Bonus", Bucket::Allowance, true),
            entry("Bonus", Bucket::Deduction, false),
        ])
        .unwrap();
        assert_eq!(registry.lookup("Bonus"), Some(Bucket::Allowance));
    }

    #[test]
    fn loads_toml_master_file() {
        let content = r#"
            [[component]]
            code = "BS01"
            name = "Basic Salary"
            type = "SALARY"

            [[component]]
            code = "PK01"
            name = "Pot. Kasbon"
            type = "DEDUCTION"
            active = false
        "#;
        let registry = ComponentRegistry::from_toml_str(content).unwrap();
        assert_eq!(registry.lookup("Basic Salary"), Some(Bucket::Salary));
        assert_eq!(registry.lookup("Pot. Kasbon"), None);
        assert_eq!(registry.entry_by_name("Pot. Kasbon").map(|e| e.active), Some(false));
    }

    #[test]
    fn loads_master_data_csv() {
        let content = "Code,Name,Type,Notes\n\
                       BS01,Basic Salary,Salary,\n\
                       UM01,Uang Makan,Allowance,\n\
                       XX01,Legacy Field,Deduction,Inactive\n";
        let registry = ComponentRegistry::from_csv_str(content).unwrap();
        assert_eq!(registry.lookup("Uang Makan"), Some(Bucket::Allowance));
        assert_eq!(registry.lookup("Legacy Field"), None);
        assert_eq!(registry.len(), 2);
    }
}
