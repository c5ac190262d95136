//! Style de rendu des features et emprise du document
//!
//! Le style d'une feature est dérivé de sa propriété `color` : une couleur
//! présente remplit la région et colore son contour, une couleur absente ou
//! nulle laisse la région sans remplissage avec le contour par défaut.

use geo::{coord, BoundingRect, Geometry, Rect};
use geojson::JsonObject;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use choropleth::enrich::COLOR_PROPERTY;
use choropleth::{EnrichedDocument, EnrichedFeature};

use crate::config::StyleConfig;

/// Style d'une feature pour la couche de rendu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStyle {
    /// Couleur de remplissage, absente = pas de remplissage
    pub fill: Option<String>,
    pub fill_opacity: f64,
    pub stroke: String,
    pub weight: f64,
}

impl FeatureStyle {
    /// Style à partir d'une couleur calculée
    pub fn from_color(color: Option<&str>, config: &StyleConfig) -> Self {
        match color {
            Some(color) => Self {
                fill: Some(color.to_string()),
                fill_opacity: config.fill_opacity,
                stroke: color.to_string(),
                weight: config.stroke_weight,
            },
            None => Self {
                fill: None,
                fill_opacity: 0.0,
                stroke: config.default_stroke.clone(),
                weight: config.stroke_weight,
            },
        }
    }

    /// Style lu depuis les propriétés GeoJSON (`color` chaîne, sinon défaut)
    pub fn from_properties(properties: Option<&JsonObject>, config: &StyleConfig) -> Self {
        let color = properties
            .and_then(|p| p.get(COLOR_PROPERTY))
            .and_then(JsonValue::as_str);
        Self::from_color(color, config)
    }

    /// Propriétés simplestyle (`fill`, `fill-opacity`, `stroke`, `stroke-width`)
    pub fn to_simplestyle(&self) -> JsonObject {
        let mut props = JsonObject::new();
        if let Some(fill) = &self.fill {
            props.insert("fill".to_string(), JsonValue::from(fill.as_str()));
        }
        props.insert("fill-opacity".to_string(), JsonValue::from(self.fill_opacity));
        props.insert("stroke".to_string(), JsonValue::from(self.stroke.as_str()));
        props.insert("stroke-width".to_string(), JsonValue::from(self.weight));
        props
    }
}

/// Style de chaque feature, dans l'ordre du document
pub fn styles(document: &EnrichedDocument, config: &StyleConfig) -> Vec<FeatureStyle> {
    document
        .features()
        .iter()
        .map(|f| feature_style(f, config))
        .collect()
}

pub fn feature_style(feature: &EnrichedFeature, config: &StyleConfig) -> FeatureStyle {
    FeatureStyle::from_color(feature.color(), config)
}

/// Document GeoJSON avec les propriétés simplestyle ajoutées à chaque feature
///
/// Un document qui n'est pas une collection est rendu tel quel.
pub fn to_styled_json(document: &EnrichedDocument, config: &StyleConfig) -> JsonValue {
    let mut json = document.to_json();
    if !document.is_collection() {
        return json;
    }
    let Some(features) = json.get_mut("features").and_then(JsonValue::as_array_mut) else {
        return json;
    };

    for (feature, style) in features.iter_mut().zip(styles(document, config)) {
        let Some(obj) = feature.as_object_mut() else {
            continue;
        };
        let properties = obj
            .entry("properties")
            .or_insert_with(|| JsonValue::Object(JsonObject::new()));
        if properties.is_null() {
            *properties = JsonValue::Object(JsonObject::new());
        }
        if let Some(props) = properties.as_object_mut() {
            props.extend(style.to_simplestyle());
        }
    }
    json
}

/// Emprise de toutes les géométries du document, pour cadrer la carte
///
/// Les géométries absentes ou non convertibles sont ignorées.
pub fn bounds(document: &EnrichedDocument) -> Option<Rect<f64>> {
    let mut skipped = 0usize;
    let rect = document
        .features()
        .iter()
        .filter_map(|f| {
            let geometry = f
                .geometry()
                .ok()
                .flatten()
                .and_then(|g| Geometry::<f64>::try_from(g.value).ok());
            if geometry.is_none() && f.base.get("geometry").is_some_and(|g| !g.is_null()) {
                skipped += 1;
            }
            geometry.and_then(|g| g.bounding_rect())
        })
        .reduce(union);

    if skipped > 0 {
        debug!(skipped, "Geometries ignored for bounds");
    }
    rect
}

fn union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use choropleth::{recompute, Inputs};
    use serde_json::json;

    fn document(table: &str) -> EnrichedDocument {
        let boundary = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "A"},
                    "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 0.0]]]}
                },
                {
                    "type": "Feature",
                    "properties": {"name": "B"},
                    "geometry": {"type": "Point", "coordinates": [-3.0, 5.0]}
                },
                {"type": "Feature", "properties": null, "geometry": null}
            ]
        });
        let inputs = Inputs {
            boundary: boundary.to_string(),
            table: table.to_string(),
            ..Default::default()
        };
        recompute(&inputs).unwrap().unwrap()
    }

    #[test]
    fn test_style_with_color() {
        let config = StyleConfig::default();
        let style = FeatureStyle::from_color(Some("#440154"), &config);
        assert_eq!(style.fill.as_deref(), Some("#440154"));
        assert_eq!(style.stroke, "#440154");
        assert_eq!(style.fill_opacity, config.fill_opacity);
    }

    #[test]
    fn test_style_without_color_uses_default_stroke() {
        let config = StyleConfig::default();
        let style = FeatureStyle::from_color(None, &config);
        assert_eq!(style.fill, None);
        assert_eq!(style.stroke, "#3388ff");
        assert_eq!(style.fill_opacity, 0.0);
    }

    #[test]
    fn test_style_from_null_color_property() {
        let config = StyleConfig::default();
        let props = json!({"color": null}).as_object().cloned();
        let style = FeatureStyle::from_properties(props.as_ref(), &config);
        assert_eq!(style.fill, None);
    }

    #[test]
    fn test_styles_follow_document_order() {
        let config = StyleConfig::default();
        let styles = styles(&document("A,1\nB,2"), &config);
        assert_eq!(styles.len(), 3);
        assert!(styles[0].fill.is_some());
        assert!(styles[1].fill.is_some());
        assert_eq!(styles[2].fill, None);
    }

    #[test]
    fn test_styled_json_adds_simplestyle() {
        let config = StyleConfig::default();
        let json = to_styled_json(&document("A,1"), &config);
        let props = &json["features"][0]["properties"];
        assert_eq!(props["fill"], props["color"]);
        assert_eq!(props["stroke-width"], json!(1.0));
        assert_eq!(json["features"][2]["properties"]["stroke"], json!("#3388ff"));
    }

    #[test]
    fn test_bounds() {
        let rect = bounds(&document("")).unwrap();
        assert_eq!(rect.min(), coord! { x: -3.0, y: 0.0 });
        assert_eq!(rect.max(), coord! { x: 2.0, y: 5.0 });
    }

    #[test]
    fn test_bounds_skip_unreadable_geometry() {
        let inputs = Inputs {
            boundary: r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"name":"A"},"geometry":{"type":"Polygon","coordinates":"oops"}},
                {"type":"Feature","properties":{"name":"B"}},
                {"type":"Feature","properties":{"name":"C"},"geometry":{"type":"Point","coordinates":[4.0,6.0]}}
            ]}"#
            .to_string(),
            ..Default::default()
        };
        let document = recompute(&inputs).unwrap().unwrap();
        let rect = bounds(&document).unwrap();
        assert_eq!(rect.min(), coord! { x: 4.0, y: 6.0 });
    }

    #[test]
    fn test_bounds_without_geometry() {
        let inputs = Inputs {
            boundary: r#"{"type":"FeatureCollection","features":[]}"#.to_string(),
            ..Default::default()
        };
        let document = recompute(&inputs).unwrap().unwrap();
        assert_eq!(bounds(&document), None);
    }
}
