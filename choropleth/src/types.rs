//! Types de données pour le crate choropleth

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::scale::ScaleSelection;
use crate::ChoroplethError;

/// Valeur associée à une clé de région dans la table
///
/// Une valeur non numérique (champ absent, texte, NaN, infini) est conservée
/// comme `Invalid` : elle reste jointe à sa feature mais n'entre pas dans le domaine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Numeric(f64),
    Invalid,
}

impl Value {
    /// Parse un champ de table (espaces de bord ignorés)
    pub fn parse_field(field: Option<&str>) -> Self {
        let Some(raw) = field else {
            return Self::Invalid;
        };

        match fast_float::parse::<f64, _>(raw.trim()) {
            Ok(v) if v.is_finite() => Self::Numeric(v),
            _ => Self::Invalid,
        }
    }

    /// Valeur numérique si valide
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(v),
            Self::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Self::Numeric(_))
    }
}

impl From<Value> for JsonValue {
    /// Les entiers exacts sont écrits sans partie décimale (`7` et non `7.0`)
    fn from(value: Value) -> Self {
        match value {
            Value::Numeric(v) if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 => {
                JsonValue::from(v as i64)
            }
            Value::Numeric(v) => serde_json::Number::from_f64(v)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Invalid => JsonValue::Null,
        }
    }
}

/// Séparateur de champs du texte tabulaire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Tab,
    Comma,
    /// Tabulation si la première ligne non vide en contient une, virgule sinon
    #[default]
    Auto,
}

impl Delimiter {
    /// Octet séparateur effectif pour ce texte
    pub fn resolve(self, text: &str) -> u8 {
        match self {
            Self::Tab => b'\t',
            Self::Comma => b',',
            Self::Auto => {
                let first_line = text
                    .lines()
                    .find(|line| !line.trim().is_empty())
                    .unwrap_or("");
                if memchr::memchr(b'\t', first_line.as_bytes()).is_some() {
                    b'\t'
                } else {
                    b','
                }
            }
        }
    }
}

impl FromStr for Delimiter {
    type Err = ChoroplethError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tab" | "tsv" | "\\t" => Ok(Self::Tab),
            "comma" | "csv" | "," => Ok(Self::Comma),
            "auto" => Ok(Self::Auto),
            _ => Err(ChoroplethError::UnknownDelimiter(s.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tab => "tab",
            Self::Comma => "comma",
            Self::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Entrées complètes d'un recalcul
///
/// Le pipeline est une fonction pure de ce tuple : deux textes bruts et les
/// réglages de sélection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    /// Texte GeoJSON des limites
    pub boundary: String,

    /// Texte tabulaire clé → valeur
    pub table: String,

    /// Échelle de couleurs et inversion
    pub selection: ScaleSelection,

    /// Séparateur du texte tabulaire
    pub delimiter: Delimiter,
}
