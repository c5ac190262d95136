//! Enrichissement des features : jointure par clé, valeur et couleur calculées
//!
//! Les features restent des arbres JSON génériques : seules les propriétés sont
//! lues, la géométrie n'est jamais interprétée. Les champs calculés sont portés
//! à part (`computed`) et fusionnés uniquement à la sérialisation, sous les clés
//! `value` et `color`, pour les seules features jointes. Tout le reste du
//! document est restitué à l'identique.

pub mod key;

use std::io::Write;

use geojson::JsonObject;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::domain::Domain;
use crate::parser::boundary::{BoundaryCollection, BoundaryDocument};
use crate::scale::ColorScale;
use crate::table::FeatureTable;
use crate::types::Value;
use crate::ChoroplethError;

pub use key::lookup_key;

/// Propriété ajoutée portant la valeur jointe
pub const VALUE_PROPERTY: &str = "value";

/// Propriété ajoutée portant la couleur calculée
pub const COLOR_PROPERTY: &str = "color";

const PROPERTIES_MEMBER: &str = "properties";
const GEOMETRY_MEMBER: &str = "geometry";

/// Table et échelle utilisées pour la jointure
#[derive(Debug, Clone, Copy)]
pub struct Join<'a> {
    pub table: &'a FeatureTable,
    pub scale: &'a ColorScale,
}

/// Résumé de la table effectivement jointe
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct JoinSummary {
    /// Nombre de clés dans la table
    pub entries: usize,
    /// Clés à valeur invalide
    pub invalid: usize,
    /// Domaine des valeurs numériques
    pub domain: Option<Domain>,
}

impl From<Join<'_>> for JoinSummary {
    fn from(join: Join<'_>) -> Self {
        Self {
            entries: join.table.len(),
            invalid: join.table.invalid_count(),
            domain: join.scale.domain(),
        }
    }
}

/// Champs calculés d'une feature jointe
#[derive(Debug, Clone, PartialEq)]
pub struct Computed {
    pub value: Value,

    /// Absente pour une valeur invalide
    pub color: Option<String>,
}

/// Feature d'origine + champs calculés éventuels
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFeature {
    /// Feature telle que lue dans le document
    pub base: JsonValue,
    pub computed: Option<Computed>,
}

impl EnrichedFeature {
    /// Propriétés d'origine, si la feature en porte un objet
    pub fn properties(&self) -> Option<&JsonObject> {
        self.base.get(PROPERTIES_MEMBER).and_then(JsonValue::as_object)
    }

    /// Feature avec `value` et `color` fusionnés dans les propriétés
    ///
    /// Une feature non jointe est rendue telle quelle.
    pub fn to_feature(&self) -> JsonValue {
        let mut feature = self.base.clone();
        let Some(computed) = &self.computed else {
            return feature;
        };
        if let Some(obj) = feature.as_object_mut() {
            let properties = obj
                .entry(PROPERTIES_MEMBER)
                .or_insert_with(|| JsonValue::Object(JsonObject::new()));
            if !properties.is_object() {
                *properties = JsonValue::Object(JsonObject::new());
            }
            if let Some(props) = properties.as_object_mut() {
                props.insert(VALUE_PROPERTY.to_string(), JsonValue::from(computed.value));
                props.insert(
                    COLOR_PROPERTY.to_string(),
                    computed
                        .color
                        .clone()
                        .map(JsonValue::String)
                        .unwrap_or(JsonValue::Null),
                );
            }
        }
        feature
    }

    /// Géométrie typée, lue à la demande (cadrage, rendu)
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` si le membre `geometry` n'est pas du GeoJSON conforme.
    pub fn geometry(&self) -> Result<Option<geojson::Geometry>, ChoroplethError> {
        match self.base.get(GEOMETRY_MEMBER) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => Ok(Some(geojson::Geometry::from_json_value(value.clone())?)),
        }
    }

    pub fn value(&self) -> Option<Value> {
        self.computed.as_ref().map(|c| c.value)
    }

    pub fn color(&self) -> Option<&str> {
        self.computed.as_ref().and_then(|c| c.color.as_deref())
    }

    pub fn is_matched(&self) -> bool {
        self.computed.is_some()
    }
}

/// Collection enrichie, dans l'ordre des features d'origine
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCollection {
    pub source: BoundaryCollection,
    pub features: Vec<EnrichedFeature>,

    /// Table jointe, absente sans texte tabulaire
    pub join: Option<JoinSummary>,
}

impl EnrichedCollection {
    pub fn to_json_object(&self) -> JsonObject {
        self.source
            .rebuild(self.features.iter().map(EnrichedFeature::to_feature).collect())
    }
}

/// Document transmis à la couche de présentation
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichedDocument {
    Collection(EnrichedCollection),

    /// Document qui n'est pas une collection, inchangé
    Other(JsonValue),
}

/// Compteurs de jointure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentStats {
    /// Nombre total de features
    pub features: usize,
    /// Features jointes à une valeur numérique
    pub matched: usize,
    /// Features jointes à une valeur invalide
    pub invalid: usize,
    /// Features sans entrée dans la table
    pub unmatched: usize,
}

impl EnrichedDocument {
    pub fn features(&self) -> &[EnrichedFeature] {
        match self {
            Self::Collection(c) => &c.features,
            Self::Other(_) => &[],
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// Résumé de la table jointe
    pub fn join_summary(&self) -> Option<JoinSummary> {
        match self {
            Self::Collection(c) => c.join,
            Self::Other(_) => None,
        }
    }

    /// Document GeoJSON final
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Collection(c) => JsonValue::Object(c.to_json_object()),
            Self::Other(json) => json.clone(),
        }
    }

    /// Écrit le document GeoJSON final
    pub fn write_to<W: Write>(&self, writer: W, pretty: bool) -> Result<(), ChoroplethError> {
        let json = self.to_json();
        let result = if pretty {
            serde_json::to_writer_pretty(writer, &json)
        } else {
            serde_json::to_writer(writer, &json)
        };
        result.map_err(ChoroplethError::Serialize)
    }

    pub fn stats(&self) -> EnrichmentStats {
        let mut stats = EnrichmentStats::default();
        for feature in self.features() {
            stats.features += 1;
            match feature.value() {
                Some(Value::Numeric(_)) => stats.matched += 1,
                Some(Value::Invalid) => stats.invalid += 1,
                None => stats.unmatched += 1,
            }
        }
        stats
    }
}

impl Serialize for EnrichedDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Enrichit un document de limites
///
/// Un document autre qu'une collection est rendu tel quel. Sans jointure (table
/// absente), les features sont rendues sans champs calculés. Une feature dont la
/// clé n'est pas dans la table reste intacte ; une clé présente, même avec une
/// valeur invalide, reçoit `value` et `color`.
pub fn enrich(document: BoundaryDocument, join: Option<Join<'_>>) -> EnrichedDocument {
    let mut source = match document {
        BoundaryDocument::Collection(collection) => collection,
        BoundaryDocument::Other(json) => {
            debug!("Document is not a FeatureCollection, passing through");
            return EnrichedDocument::Other(json);
        }
    };

    let features = std::mem::take(&mut source.features)
        .into_iter()
        .map(|base| {
            let computed = join.and_then(|j| compute(&base, j));
            EnrichedFeature { base, computed }
        })
        .collect();

    let document = EnrichedDocument::Collection(EnrichedCollection {
        source,
        features,
        join: join.map(JoinSummary::from),
    });

    let stats = document.stats();
    debug!(
        features = stats.features,
        matched = stats.matched,
        invalid = stats.invalid,
        unmatched = stats.unmatched,
        "Features enriched"
    );
    document
}

fn compute(feature: &JsonValue, join: Join<'_>) -> Option<Computed> {
    let properties = feature.get(PROPERTIES_MEMBER).and_then(JsonValue::as_object);
    let key = lookup_key(properties)?;
    let value = join.table.get(&key)?;
    Some(Computed {
        value,
        color: join.scale.color(value),
    })
}
