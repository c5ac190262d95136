//! Types d'erreurs pour le crate choropleth

use thiserror::Error;

/// Erreurs pouvant survenir dans le pipeline valeur → couleur
#[derive(Debug, Error)]
pub enum ChoroplethError {
    /// Le texte des limites n'est pas un document JSON valide
    #[error("Boundary parse error: {0}")]
    BoundaryParse(#[from] serde_json::Error),

    /// Géométrie d'une feature non conforme à GeoJSON (lecture typée à la demande)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(#[from] geojson::Error),

    /// Nom d'échelle de couleurs inconnu
    #[error("Unknown color scale: {0}. Use: viridis, plasma, inferno, magma, cividis, blues, turbo")]
    UnknownScale(String),

    /// Délimiteur inconnu
    #[error("Unknown delimiter: {0}. Use: tab, comma, auto")]
    UnknownDelimiter(String),

    /// Échec d'écriture du document enrichi
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Couleur d'ancrage illisible
    #[error("Invalid color '{color}': {reason}")]
    InvalidColor { color: String, reason: String },
}

impl ChoroplethError {
    /// Crée une erreur de couleur avec contexte
    pub fn invalid_color(color: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            color: color.into(),
            reason: reason.into(),
        }
    }
}
