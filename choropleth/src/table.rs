//! Construction de la table clé de région → valeur

use std::collections::HashMap;

use tracing::debug;

use crate::parser::tabular;
use crate::types::{Delimiter, Value};

/// Table des valeurs par clé de région
///
/// Les clés sont uniques (la dernière ligne l'emporte). Les valeurs illisibles
/// restent présentes sous la forme `Value::Invalid`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    entries: HashMap<String, Value>,
}

impl FeatureTable {
    /// Construit la table depuis des lignes parsées
    ///
    /// Champ 0 = clé (verbatim), champ 1 = valeur ; les champs suivants sont ignorés.
    pub fn from_rows<R: AsRef<[String]>>(rows: &[R]) -> Self {
        let mut table = Self::default();
        for row in rows {
            let row = row.as_ref();
            let Some(key) = row.first() else {
                continue;
            };
            let value = Value::parse_field(row.get(1).map(String::as_str));
            table.insert(key.clone(), value);
        }

        debug!(
            entries = table.len(),
            invalid = table.invalid_count(),
            "Feature table built"
        );
        table
    }

    /// Parse puis construit la table depuis le texte brut
    pub fn from_text(text: &str, delimiter: Delimiter) -> Self {
        Self::from_rows(&tabular::parse(text, delimiter))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.entries.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Nombre d'entrées numériques
    pub fn numeric_count(&self) -> usize {
        self.values().filter(|v| v.is_valid()).count()
    }

    /// Nombre d'entrées invalides
    pub fn invalid_count(&self) -> usize {
        self.len() - self.numeric_count()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FeatureTable {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_entry_per_unique_row() {
        let table = FeatureTable::from_text("A\t1\nB\t2.5\nC\tfoo", Delimiter::Tab);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("A"), Some(Value::Numeric(1.0)));
        assert_eq!(table.get("B"), Some(Value::Numeric(2.5)));
        assert_eq!(table.get("C"), Some(Value::Invalid));
        assert_eq!(table.get("D"), None);
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let table = FeatureTable::from_text("k\t1\nk\t2", Delimiter::Tab);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("k"), Some(Value::Numeric(2.0)));
    }

    #[test]
    fn test_missing_value_field_is_invalid() {
        let table = FeatureTable::from_text("lonely", Delimiter::Tab);
        assert_eq!(table.get("lonely"), Some(Value::Invalid));
        assert_eq!(table.invalid_count(), 1);
        assert_eq!(table.numeric_count(), 0);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let table = FeatureTable::from_text("A,3,extra,more", Delimiter::Comma);
        assert_eq!(table.get("A"), Some(Value::Numeric(3.0)));
    }

    #[test]
    fn test_key_used_verbatim() {
        let table = FeatureTable::from_text(" a\t1", Delimiter::Tab);
        assert_eq!(table.get(" a"), Some(Value::Numeric(1.0)));
        assert_eq!(table.get("a"), None);
        assert_eq!(table.get("A"), None);
    }

    #[test]
    fn test_from_iter() {
        let table: FeatureTable = [("A", Value::Numeric(5.0))].into_iter().collect();
        assert_eq!(table.len(), 1);
    }
}
