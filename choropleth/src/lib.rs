//! # choropleth
//!
//! Pipeline valeur → couleur pour cartes choroplèthes : un texte GeoJSON de
//! limites et une table de valeurs par région sont joints, puis chaque région
//! reçoit sa valeur et sa couleur sur une rampe perceptuelle.
//!
//! ## Features
//!
//! - Parsing du texte tabulaire (tabulation ou virgule) avec `csv`
//! - Parsing des nombres avec `fast-float`, valeurs illisibles explicites (`Value::Invalid`)
//! - Document de limites conservé en arbre JSON, géométrie opaque
//! - Rampes Viridis, Plasma, Inferno, Magma, Cividis, Blues, Turbo
//!
//! ## Usage
//!
//! ```rust,ignore
//! use choropleth::{recompute, Inputs};
//!
//! let inputs = Inputs {
//!     boundary: std::fs::read_to_string("regions.geojson")?,
//!     table: "Bretagne\t3.4\nNormandie\t2.1".to_string(),
//!     ..Default::default()
//! };
//!
//! if let Some(document) = recompute(&inputs)? {
//!     println!("{}", document.to_json());
//! }
//! ```

pub mod domain;
pub mod enrich;
pub mod error;
pub mod parser;
pub mod scale;
pub mod table;
pub mod types;

pub use domain::Domain;
pub use enrich::{enrich, EnrichedDocument, EnrichedFeature, EnrichmentStats, Join, JoinSummary};
pub use error::ChoroplethError;
pub use parser::boundary::{BoundaryCollection, BoundaryDocument};
pub use scale::{ColorScale, ScaleName, ScaleSelection};
pub use table::FeatureTable;
pub use types::{Delimiter, Inputs, Value};

use tracing::debug;

/// Recalcule le document enrichi à partir des entrées brutes.
///
/// Fonction pure : le même tuple d'entrées produit toujours le même document.
///
/// # Returns
///
/// - `Ok(None)` si le texte des limites est vide (rien à afficher)
/// - le document sans champs calculés si le texte tabulaire est vide
/// - le document enrichi sinon
///
/// # Errors
///
/// Retourne `ChoroplethError` si le document de limites est illisible ; aucune
/// géométrie partielle n'est produite. Les erreurs de la table ne sont jamais
/// fatales.
pub fn recompute(inputs: &Inputs) -> Result<Option<EnrichedDocument>, ChoroplethError> {
    // 1. Rien à afficher sans limites
    if inputs.boundary.trim().is_empty() {
        debug!("Empty boundary text, nothing to render");
        return Ok(None);
    }

    // 2. Document de limites (tout ou rien)
    let document = parser::boundary::parse(&inputs.boundary)?;

    // 3. Sans table, le document est rendu sans jointure
    if inputs.table.trim().is_empty() {
        debug!("Empty table text, skipping value mapping");
        return Ok(Some(enrich(document, None)));
    }

    // 4. Table, domaine, échelle
    let table = FeatureTable::from_text(&inputs.table, inputs.delimiter);
    let domain = Domain::from_values(table.values());
    let scale = ColorScale::new(inputs.selection, domain)?;
    debug!(
        scale = %inputs.selection.name,
        inverted = inputs.selection.inverted,
        domain = ?domain,
        "Color scale resolved"
    );

    // 5. Jointure
    let join = Join {
        table: &table,
        scale: &scale,
    };
    Ok(Some(enrich(document, Some(join))))
}
