//! Clé de jointure d'une feature

use std::borrow::Cow;

use geojson::JsonObject;
use serde_json::{Number, Value as JsonValue};

/// Propriétés consultées, par ordre de priorité
const KEY_PROPERTIES: [&str; 2] = ["name", "code"];

/// 2^53, au-delà un flottant ne représente plus tous les entiers
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Première valeur non vide parmi `name` puis `code`
///
/// Les chaînes sont utilisées telles quelles, les nombres sous leur forme
/// textuelle JSON. Les autres types ne permettent pas de jointure.
pub fn lookup_key(properties: Option<&JsonObject>) -> Option<Cow<'_, str>> {
    let properties = properties?;
    KEY_PROPERTIES
        .iter()
        .filter_map(|name| properties.get(*name))
        .find_map(key_text)
}

fn key_text(value: &JsonValue) -> Option<Cow<'_, str>> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
        JsonValue::Number(n) => Some(Cow::Owned(number_text(n))),
        _ => None,
    }
}

/// Texte d'un nombre, sans partie décimale nulle (`1.0` → `1`)
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGER => {
            format!("{}", v as i64)
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: JsonValue) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_name_first() {
        let p = props(json!({"name": "Isère", "code": "38"}));
        assert_eq!(lookup_key(Some(&p)).as_deref(), Some("Isère"));
    }

    #[test]
    fn test_code_when_name_missing_or_empty() {
        let p = props(json!({"code": "38"}));
        assert_eq!(lookup_key(Some(&p)).as_deref(), Some("38"));

        let p = props(json!({"name": "", "code": "38"}));
        assert_eq!(lookup_key(Some(&p)).as_deref(), Some("38"));
    }

    #[test]
    fn test_numeric_code() {
        let p = props(json!({"code": 75}));
        assert_eq!(lookup_key(Some(&p)).as_deref(), Some("75"));
    }

    #[test]
    fn test_whole_float_code_matches_integer_key() {
        let p = props(json!({"code": 1.0}));
        assert_eq!(lookup_key(Some(&p)).as_deref(), Some("1"));

        let p = props(json!({"code": -38.0}));
        assert_eq!(lookup_key(Some(&p)).as_deref(), Some("-38"));

        let p = props(json!({"code": 2.5}));
        assert_eq!(lookup_key(Some(&p)).as_deref(), Some("2.5"));
    }

    #[test]
    fn test_no_key() {
        let p = props(json!({"label": "x", "name": null}));
        assert_eq!(lookup_key(Some(&p)), None);
        assert_eq!(lookup_key(None), None);
    }
}
