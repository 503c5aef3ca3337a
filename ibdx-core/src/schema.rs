//! Model / condition schema
//!
//! Each model defines exactly two conditions: a baseline (control or wild
//! type) and a disease condition. Contexts are the cross product.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{IbdxError, Result};
use crate::types::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Mouse,
    Human,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Short identifier, e.g. `il10ko`
    pub id: String,
    /// Display name, e.g. `IL-10KO`
    pub name: String,
    pub species: Species,
    pub baseline: String,
    pub disease: String,
}

impl ModelSpec {
    pub fn new(id: &str, name: &str, species: Species, baseline: &str, disease: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            species,
            baseline: baseline.to_string(),
            disease: disease.to_string(),
        }
    }

    pub fn conditions(&self) -> [&str; 2] {
        [&self.baseline, &self.disease]
    }

    pub fn is_baseline(&self, condition: &str) -> bool {
        self.baseline == condition
    }

    pub fn baseline_context(&self) -> Context {
        Context::new(self.id.as_str(), self.baseline.as_str())
    }

    pub fn disease_context(&self) -> Context {
        Context::new(self.id.as_str(), self.disease.as_str())
    }

    fn matches(&self, query: &str) -> bool {
        self.id.eq_ignore_ascii_case(query) || self.name.eq_ignore_ascii_case(query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSchema {
    models: Vec<ModelSpec>,
}

impl ContextSchema {
    /// Build a schema, rejecting duplicate ids and degenerate condition pairs
    pub fn new(models: Vec<ModelSpec>) -> Result<Self> {
        if models.is_empty() {
            return Err(IbdxError::InvalidSchema("schema defines no models".into()));
        }
        let mut seen = HashSet::new();
        for model in &models {
            if !seen.insert(model.id.to_ascii_lowercase()) {
                return Err(IbdxError::InvalidSchema(format!("duplicate model id: {}", model.id)));
            }
            if model.baseline == model.disease {
                return Err(IbdxError::InvalidSchema(format!(
                    "model {} uses '{}' for both conditions",
                    model.id, model.baseline
                )));
            }
        }
        Ok(Self { models })
    }

    /// The four mouse models and two human disease types of the IBD dashboard
    pub fn ibd() -> Self {
        Self {
            models: vec![
                ModelSpec::new("cd45rb", "CD45RBHigh T cell", Species::Mouse, "Control", "Week6"),
                ModelSpec::new("acute_dss", "Acute DSS", Species::Mouse, "Control", "DSS"),
                ModelSpec::new("chronic_dss", "Chronic DSS", Species::Mouse, "Control", "Chronic_DSS"),
                ModelSpec::new("il10ko", "IL-10KO", Species::Mouse, "WT", "IL10KO"),
                ModelSpec::new("human_uc", "Human UC", Species::Human, "Control", "UC"),
                ModelSpec::new("human_cd", "Human CD", Species::Human, "Control", "CD"),
            ],
        }
    }

    pub fn models(&self) -> &[ModelSpec] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Resolve a model by id or display name, case-insensitively
    pub fn resolve(&self, query: &str) -> Result<&ModelSpec> {
        let query = query.trim();
        self.models
            .iter()
            .find(|m| m.matches(query))
            .ok_or_else(|| IbdxError::UnknownModel(query.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&ModelSpec> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn by_species(&self, species: Species) -> impl Iterator<Item = &ModelSpec> {
        self.models.iter().filter(move |m| m.species == species)
    }

    /// All (model, condition) contexts, baseline first within each model
    pub fn contexts(&self) -> Vec<Context> {
        self.models
            .iter()
            .flat_map(|m| [m.baseline_context(), m.disease_context()])
            .collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.id.as_str()).collect()
    }
}

impl Default for ContextSchema {
    fn default() -> Self {
        Self::ibd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ibd_schema_shape() {
        let schema = ContextSchema::ibd();
        assert_eq!(schema.len(), 6);
        assert_eq!(schema.contexts().len(), 12);
        assert_eq!(schema.by_species(Species::Mouse).count(), 4);
        assert_eq!(schema.by_species(Species::Human).count(), 2);
        assert!(ContextSchema::new(schema.models().to_vec()).is_ok());
    }

    #[test]
    fn test_resolve_by_id_or_name() {
        let schema = ContextSchema::ibd();
        assert_eq!(schema.resolve("il10ko").unwrap().name, "IL-10KO");
        assert_eq!(schema.resolve("  il-10ko ").unwrap().id, "il10ko");
        assert_eq!(schema.resolve("HUMAN CD").unwrap().disease, "CD");
        assert!(matches!(schema.resolve("rat_tnbs"), Err(IbdxError::UnknownModel(_))));
    }

    #[test]
    fn test_schema_rejects_duplicates_and_degenerate_models() {
        let dup = vec![
            ModelSpec::new("a", "A", Species::Mouse, "Control", "X"),
            ModelSpec::new("A", "A2", Species::Mouse, "Control", "Y"),
        ];
        assert!(ContextSchema::new(dup).is_err());

        let same = vec![ModelSpec::new("a", "A", Species::Mouse, "Control", "Control")];
        assert!(ContextSchema::new(same).is_err());

        assert!(ContextSchema::new(Vec::new()).is_err());
    }
}
