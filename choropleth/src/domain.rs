//! Calcul du domaine numérique [min, max] de la table

use serde::Serialize;

use crate::types::Value;

/// Étendue des valeurs numériques
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Min et max littéraux des valeurs numériques, `None` si aucune
    ///
    /// Les valeurs invalides sont ignorées. Pas d'écrêtage ni de traitement
    /// des valeurs aberrantes.
    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Option<Self> {
        values
            .into_iter()
            .filter_map(Value::as_f64)
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(d) => Some(Self {
                    min: d.min.min(v),
                    max: d.max.max(v),
                }),
            })
    }

    /// Domaine réduit à une seule valeur
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Position de `v` dans le domaine (0 au min, 1 au max), sans écrêtage
    ///
    /// Un domaine dégénéré place toute valeur à 1.
    pub fn normalize(&self, v: f64) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }
        (v - self.min) / (self.max - self.min)
    }
}
