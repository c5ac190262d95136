//! Résolution de l'échelle de couleurs : valeur numérique → couleur
//!
//! Une échelle associe le domaine [min, max] de la table à une rampe publiée.
//! Sans inversion, `min` prend la couleur `ramp(0)` et `max` la couleur `ramp(1)` ;
//! l'inversion échange les deux extrémités.

pub mod ramp;
pub mod schemes;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::types::Value;
use crate::ChoroplethError;

pub use ramp::Ramp;

/// Rampes de couleurs supportées
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleName {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Blues,
    Turbo,
}

impl ScaleName {
    /// Toutes les échelles, dans l'ordre de présentation
    pub const ALL: [ScaleName; 7] = [
        Self::Viridis,
        Self::Plasma,
        Self::Inferno,
        Self::Magma,
        Self::Cividis,
        Self::Blues,
        Self::Turbo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Cividis => "cividis",
            Self::Blues => "blues",
            Self::Turbo => "turbo",
        }
    }

    /// Rampe publiée associée au nom
    pub fn ramp(self) -> Result<Ramp, ChoroplethError> {
        let ramp = match self {
            Self::Viridis => Ramp::Polynomial(schemes::VIRIDIS),
            Self::Plasma => Ramp::Polynomial(schemes::PLASMA),
            Self::Inferno => Ramp::Polynomial(schemes::INFERNO),
            Self::Magma => Ramp::Polynomial(schemes::MAGMA),
            Self::Cividis => Ramp::Polynomial(schemes::CIVIDIS),
            Self::Turbo => Ramp::Polynomial(schemes::TURBO),
            Self::Blues => Ramp::basis(schemes::BLUES)?,
        };
        Ok(ramp)
    }
}

impl FromStr for ScaleName {
    type Err = ChoroplethError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == lower)
            .ok_or_else(|| ChoroplethError::UnknownScale(s.to_string()))
    }
}

impl fmt::Display for ScaleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sélection de l'utilisateur : rampe + inversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleSelection {
    pub name: ScaleName,

    #[serde(default)]
    pub inverted: bool,
}

impl ScaleSelection {
    pub fn new(name: ScaleName, inverted: bool) -> Self {
        Self { name, inverted }
    }
}

/// Fonction valeur → couleur prête à l'emploi
#[derive(Debug, Clone)]
pub struct ColorScale {
    selection: ScaleSelection,
    domain: Option<Domain>,
    ramp: Ramp,
}

impl ColorScale {
    /// Construit l'échelle pour une sélection et un domaine
    ///
    /// Un domaine absent (aucune valeur numérique) donne une échelle qui ne
    /// colore rien.
    pub fn new(selection: ScaleSelection, domain: Option<Domain>) -> Result<Self, ChoroplethError> {
        Ok(Self {
            selection,
            domain,
            ramp: selection.name.ramp()?,
        })
    }

    pub fn selection(&self) -> ScaleSelection {
        self.selection
    }

    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    /// Paramètre de rampe pour `v`, inversion comprise, sans écrêtage
    pub fn parameter(&self, v: f64) -> Option<f64> {
        let t = self.domain?.normalize(v);
        if t.is_nan() {
            return None;
        }
        Some(if self.selection.inverted { 1.0 - t } else { t })
    }

    /// Couleur d'un nombre
    ///
    /// Hors du domaine, le même calcul s'applique ; la rampe ramène ensuite son
    /// paramètre dans [0, 1].
    pub fn color_at(&self, v: f64) -> Option<String> {
        self.parameter(v).map(|t| self.ramp.hex_at(t))
    }

    /// Couleur d'une valeur de table (`None` pour une valeur invalide)
    pub fn color(&self, value: Value) -> Option<String> {
        value.as_f64().and_then(|v| self.color_at(v))
    }

    /// Échantillons régulièrement répartis sur le domaine, pour une légende
    pub fn legend(&self, steps: usize) -> Vec<(f64, String)> {
        let Some(domain) = self.domain else {
            return Vec::new();
        };
        if steps < 2 || domain.is_degenerate() {
            return self
                .color_at(domain.max)
                .map(|c| vec![(domain.max, c)])
                .unwrap_or_default();
        }

        (0..steps)
            .filter_map(|i| {
                let v = domain.min + (domain.max - domain.min) * i as f64 / (steps - 1) as f64;
                self.color_at(v).map(|c| (v, c))
            })
            .collect()
    }
}
