//! Formula catalog
//!
//! The catalog is loaded once from JSON and validated; it is never mutated
//! by the calculation core.

use crate::descriptor::FormulaDescriptor;
use crate::error::{Error, Result};
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Catalog shipped with the crate: the SSBVP cycle formulas
const BUILTIN_CATALOG: &str = include_str!("../data/default_catalog.json");

/// A named reference value (ambient conditions, component efficiencies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub unit: String,
}

/// An ordered, validated collection of formula descriptors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    formulas: Vec<FormulaDescriptor>,
    #[serde(default)]
    assumptions: Vec<Assumption>,
}

impl Catalog {
    /// Build a catalog from descriptors, validating them
    pub fn new(formulas: Vec<FormulaDescriptor>, assumptions: Vec<Assumption>) -> Result<Self> {
        let catalog = Self {
            formulas,
            assumptions,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in catalog
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        tracing::debug!(
            formulas = catalog.formulas.len(),
            assumptions = catalog.assumptions.len(),
            "Loaded formula catalog"
        );
        Ok(catalog)
    }

    /// Read a catalog from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize the catalog back to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for formula in &self.formulas {
            if !ids.insert(formula.id.as_str()) {
                return Err(Error::DuplicateFormulaId(formula.id.clone()));
            }
            if formula.formula.trim().is_empty() {
                return Err(Error::EmptyExpression(formula.id.clone()));
            }

            let mut keys = HashSet::new();
            for variable in &formula.variables {
                if !is_identifier(&variable.key) {
                    return Err(Error::InvalidVariableKey {
                        formula: formula.id.clone(),
                        key: variable.key.clone(),
                    });
                }
                if !keys.insert(variable.key.as_str()) {
                    return Err(Error::DuplicateVariableKey {
                        formula: formula.id.clone(),
                        key: variable.key.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a formula by id
    pub fn get(&self, id: &str) -> Option<&FormulaDescriptor> {
        self.formulas.iter().find(|f| f.id == id)
    }

    /// Look up a formula by id, failing if absent
    pub fn require(&self, id: &str) -> Result<&FormulaDescriptor> {
        self.get(id)
            .ok_or_else(|| Error::FormulaNotFound(id.to_string()))
    }

    /// All formulas in catalog order
    pub fn formulas(&self) -> &[FormulaDescriptor] {
        &self.formulas
    }

    /// Reference assumptions in catalog order
    pub fn assumptions(&self) -> &[Assumption] {
        &self.assumptions
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// Formulas grouped by category, categories in first-seen order
    pub fn by_category(&self) -> Vec<(&str, Vec<&FormulaDescriptor>)> {
        let mut groups: Vec<(&str, Vec<&FormulaDescriptor>)> = Vec::new();
        for formula in &self.formulas {
            match groups
                .iter_mut()
                .find(|(category, _)| *category == formula.category)
            {
                Some((_, members)) => members.push(formula),
                None => groups.push((formula.category.as_str(), vec![formula])),
            }
        }
        groups
    }

    /// Case-insensitive search over id, title and category
    pub fn search(&self, query: &str) -> Vec<&FormulaDescriptor> {
        let needle = query.to_lowercase();
        self.formulas
            .iter()
            .filter(|f| {
                f.id.to_lowercase().contains(&needle)
                    || f.title.to_lowercase().contains(&needle)
                    || f.category.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Whether `key` is usable as a variable token in an expression
pub fn is_identifier(key: &str) -> bool {
    regex_is_match!(r"^[A-Za-z_][A-Za-z0-9_]*$", key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.assumptions().len(), 8);

        let hs = catalog.get("HS_3.1").unwrap();
        assert_eq!(hs.formula, "m * cp * (Tout - Tin)");
        assert_eq!(
            hs.variable_keys().collect::<Vec<_>>(),
            vec!["m", "cp", "Tin", "Tout"]
        );
        assert_eq!(hs.output.unit, "kW");
    }

    #[test]
    fn test_by_category_keeps_first_seen_order() {
        let catalog = Catalog::builtin().unwrap();
        let categories: Vec<&str> = catalog.by_category().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![
                "Heat Source",
                "Turbine",
                "Pump",
                "Condenser",
                "Efficiency",
                "Absorber",
                "Solar"
            ]
        );
        let (_, heat_source) = &catalog.by_category()[0];
        assert_eq!(heat_source.len(), 2);
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::builtin().unwrap();
        let hits: Vec<&str> = catalog
            .search("efficiency")
            .iter()
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(hits, vec!["EFF_3.7", "EFF_3.8"]);
        assert_eq!(catalog.search("solar_3").len(), 1);
    }

    #[test]
    fn test_require_unknown_formula() {
        let catalog = Catalog::builtin().unwrap();
        assert!(matches!(
            catalog.require("NOPE"),
            Err(Error::FormulaNotFound(id)) if id == "NOPE"
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{"formulas": [
            {"id": "A", "category": "c", "title": "t", "description": "d", "formula": "x",
             "variables": [], "output": {"key": "y", "label": "Y", "unit": ""}},
            {"id": "A", "category": "c", "title": "t", "description": "d", "formula": "x",
             "variables": [], "output": {"key": "y", "label": "Y", "unit": ""}}
        ]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(Error::DuplicateFormulaId(id)) if id == "A"
        ));
    }

    #[test]
    fn test_rejects_bad_variable_keys() {
        let json = r#"{"formulas": [
            {"id": "A", "category": "c", "title": "t", "description": "d", "formula": "x",
             "variables": [{"key": "2x", "label": "x", "unit": "", "default": 1}],
             "output": {"key": "y", "label": "Y", "unit": ""}}
        ]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(Error::InvalidVariableKey { key, .. }) if key == "2x"
        ));

        let json = r#"{"formulas": [
            {"id": "A", "category": "c", "title": "t", "description": "d", "formula": "x",
             "variables": [
                {"key": "x", "label": "x", "unit": "", "default": 1},
                {"key": "x", "label": "x", "unit": "", "default": 2}
             ],
             "output": {"key": "y", "label": "Y", "unit": ""}}
        ]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(Error::DuplicateVariableKey { key, .. }) if key == "x"
        ));
    }

    #[test]
    fn test_rejects_empty_expression() {
        let json = r#"{"formulas": [
            {"id": "A", "category": "c", "title": "t", "description": "d", "formula": "  ",
             "variables": [], "output": {"key": "y", "label": "Y", "unit": ""}}
        ]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(Error::EmptyExpression(_))
        ));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("m_rich"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = Catalog::builtin().unwrap();
        let json = catalog.to_json_pretty().unwrap();
        assert_eq!(Catalog::from_json_str(&json).unwrap(), catalog);
    }
}
