//! Parser pour le document de limites (GeoJSON)
//!
//! Le texte est lu comme un arbre JSON générique et reste sous cette forme : la
//! géométrie est opaque pour le pipeline. Seul un objet dont le discriminant
//! `type` vaut `FeatureCollection` et qui porte un tableau `features` est traité
//! comme une collection ; toute autre forme est conservée telle quelle.

use geojson::JsonObject;
use serde_json::Value as JsonValue;

use crate::ChoroplethError;

const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Membre de l'objet racine portant les features
pub const FEATURES_MEMBER: &str = "features";

/// Document de limites parsé
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryDocument {
    /// Collection de features, seule forme enrichie
    Collection(BoundaryCollection),

    /// Toute autre forme structurelle, transmise sans modification
    Other(JsonValue),
}

/// FeatureCollection en arbre JSON générique
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCollection {
    /// Objet racine, membre `features` laissé à `null` à sa place d'origine
    pub root: JsonObject,

    /// Features dans l'ordre du document, sans validation de structure
    pub features: Vec<JsonValue>,
}

impl BoundaryCollection {
    /// Reconstruit l'objet racine avec les features fournies
    pub fn rebuild(&self, features: Vec<JsonValue>) -> JsonObject {
        let mut root = self.root.clone();
        root.insert(FEATURES_MEMBER.to_string(), JsonValue::Array(features));
        root
    }
}

impl BoundaryDocument {
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }
}

/// Parse le texte des limites
///
/// # Errors
///
/// `BoundaryParse` si le texte n'est pas du JSON valide. Aucun document partiel
/// n'est jamais retourné.
pub fn parse(text: &str) -> Result<BoundaryDocument, ChoroplethError> {
    let json: JsonValue = serde_json::from_str(text)?;

    let JsonValue::Object(mut root) = json else {
        return Ok(BoundaryDocument::Other(json));
    };
    if !is_feature_collection(&root) {
        return Ok(BoundaryDocument::Other(JsonValue::Object(root)));
    }

    match root.get_mut(FEATURES_MEMBER).map(JsonValue::take) {
        Some(JsonValue::Array(features)) => {
            Ok(BoundaryDocument::Collection(BoundaryCollection { root, features }))
        }
        other => {
            // Pas de tableau de features: rien à enrichir, document restitué intact
            if let Some(value) = other {
                root.insert(FEATURES_MEMBER.to_string(), value);
            }
            Ok(BoundaryDocument::Other(JsonValue::Object(root)))
        }
    }
}

fn is_feature_collection(root: &JsonObject) -> bool {
    root.get("type").and_then(JsonValue::as_str) == Some(FEATURE_COLLECTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_feature_collection() {
        let text = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"name":"X"},"geometry":null}]}"#;
        let result = parse(text).unwrap();
        match result {
            BoundaryDocument::Collection(fc) => {
                assert_eq!(fc.features.len(), 1);
                assert_eq!(fc.features[0]["properties"]["name"], json!("X"));
                assert_eq!(fc.root.get("features"), Some(&JsonValue::Null));
            }
            other => panic!("Expected collection, got {:?}", other),
        }
    }

    #[test]
    fn test_geometry_is_not_validated() {
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"X"}},
            {"type":"Feature","properties":{"name":"Y"},"geometry":{"type":"Polygon","coordinates":"oops"}}
        ]}"#;
        match parse(text).unwrap() {
            BoundaryDocument::Collection(fc) => assert_eq!(fc.features.len(), 2),
            other => panic!("Expected collection, got {:?}", other),
        }
    }

    #[test]
    fn test_rebuild_keeps_member_order() {
        let text = r#"{"type":"FeatureCollection","name":"r","features":[],"crs":{"type":"name"}}"#;
        let BoundaryDocument::Collection(fc) = parse(text).unwrap() else {
            panic!("Expected collection");
        };
        let rebuilt = JsonValue::Object(fc.rebuild(Vec::new()));
        assert_eq!(serde_json::to_string(&rebuilt).unwrap(), text);
    }

    #[test]
    fn test_other_shapes_pass_through() {
        let text = r#"{"type":"Feature","properties":{"name":"X"},"geometry":null}"#;
        let result = parse(text).unwrap();
        assert!(!result.is_collection());

        let result = parse("[1, 2, 3]").unwrap();
        assert_eq!(result, BoundaryDocument::Other(json!([1, 2, 3])));
    }

    #[test]
    fn test_collection_without_feature_array_passes_through() {
        let result = parse(r#"{"type":"FeatureCollection","features":42}"#).unwrap();
        assert_eq!(
            result,
            BoundaryDocument::Other(json!({"type": "FeatureCollection", "features": 42}))
        );

        let result = parse(r#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(!result.is_collection());
    }

    #[test]
    fn test_truncated_json_returns_error() {
        let result = parse(r#"{"type":"FeatureCollection","features":[{"type":"#);
        assert!(matches!(result, Err(ChoroplethError::BoundaryParse(_))));
    }
}
