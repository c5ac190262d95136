//! État réactif du viewer
//!
//! Le viewer possède les deux textes bruts et les réglages de sélection. Chaque
//! modification relance le pipeline de façon synchrone ; le résultat est publié
//! dans un `Frame` portant un numéro de génération strictement croissant, que la
//! couche de rendu utilise pour jeter son état visuel périmé.

use std::collections::VecDeque;
use std::rc::Rc;

use blake3::Hasher;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use choropleth::{recompute, Delimiter, EnrichedDocument, Inputs, ScaleName};

use crate::config::ViewerConfig;

/// Nombre de résultats conservés dans le cache de recalcul
const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Empreinte du tuple d'entrées
pub type InputKey = [u8; 32];

/// Comportement quand le document de limites est illisible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Ne plus rien afficher jusqu'à correction (défaut)
    #[default]
    Clear,
    /// Conserver le dernier document valide
    KeepLast,
}

/// Ce que la couche de rendu affiche
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Génération du rendu, incrémentée à chaque remplacement du contenu
    pub generation: u64,

    /// Document enrichi, absent si rien n'est à afficher
    pub document: Option<Rc<EnrichedDocument>>,
}

/// Conteneur réactif des entrées et du rendu courant
#[derive(Debug)]
pub struct Viewer {
    inputs: Inputs,
    fallback: FallbackPolicy,
    frame: Frame,
    last_error: Option<String>,
    current_key: InputKey,
    cache: VecDeque<(InputKey, Option<Rc<EnrichedDocument>>)>,
    cache_capacity: usize,
    recomputations: usize,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl Viewer {
    /// Crée un viewer vide avec la sélection et le séparateur de la configuration
    pub fn new(config: &ViewerConfig) -> Self {
        let inputs = Inputs {
            selection: config.selection(),
            delimiter: config.delimiter,
            ..Default::default()
        };
        let current_key = input_key(&inputs);

        Self {
            inputs,
            fallback: config.fallback,
            frame: Frame::default(),
            last_error: None,
            current_key,
            cache: VecDeque::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            recomputations: 0,
        }
    }

    /// Taille du cache de recalcul (0 désactive le cache)
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self.cache.truncate(capacity);
        self
    }

    pub fn set_boundary(&mut self, text: impl Into<String>) -> &Frame {
        self.inputs.boundary = text.into();
        self.refresh()
    }

    pub fn set_table(&mut self, text: impl Into<String>) -> &Frame {
        self.inputs.table = text.into();
        self.refresh()
    }

    pub fn set_scale(&mut self, name: ScaleName) -> &Frame {
        self.inputs.selection.name = name;
        self.refresh()
    }

    pub fn set_inverted(&mut self, inverted: bool) -> &Frame {
        self.inputs.selection.inverted = inverted;
        self.refresh()
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) -> &Frame {
        self.inputs.delimiter = delimiter;
        self.refresh()
    }

    /// Remplace toutes les entrées en un seul recalcul
    pub fn set_inputs(&mut self, inputs: Inputs) -> &Frame {
        self.inputs = inputs;
        self.refresh()
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Dernière erreur de parsing des limites, effacée au prochain succès
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Nombre d'exécutions effectives du pipeline (hors cache)
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Recalcule le rendu si le tuple d'entrées a changé
    fn refresh(&mut self) -> &Frame {
        let key = input_key(&self.inputs);
        if key == self.current_key {
            return &self.frame;
        }
        self.current_key = key;

        if let Some(document) = self.cached(&key) {
            debug!(key = %hex::encode(&key[..8]), "Recompute cache hit");
            self.last_error = None;
            self.publish(document);
            return &self.frame;
        }

        self.recomputations += 1;
        match recompute(&self.inputs) {
            Ok(document) => {
                let document = document.map(Rc::new);
                self.store(key, document.clone());
                self.last_error = None;
                self.publish(document);
            }
            Err(e) => {
                warn!(error = %e, fallback = ?self.fallback, "Boundary document rejected");
                self.last_error = Some(e.to_string());
                if self.fallback == FallbackPolicy::Clear {
                    self.publish(None);
                }
            }
        }

        &self.frame
    }

    /// Remplace le frame courant ; un frame vide n'est jamais republié
    fn publish(&mut self, document: Option<Rc<EnrichedDocument>>) {
        if document.is_none() && self.frame.document.is_none() {
            return;
        }
        self.frame = Frame {
            generation: self.frame.generation + 1,
            document,
        };
        debug!(generation = self.frame.generation, "Frame published");
    }

    fn cached(&self, key: &InputKey) -> Option<Option<Rc<EnrichedDocument>>> {
        self.cache
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, document)| document.clone())
    }

    fn store(&mut self, key: InputKey, document: Option<Rc<EnrichedDocument>>) {
        if self.cache_capacity == 0 {
            return;
        }
        if self.cache.len() >= self.cache_capacity {
            self.cache.pop_front();
        }
        self.cache.push_back((key, document));
    }
}

/// Empreinte blake3 du tuple (limites, table, échelle, inversion, séparateur)
pub fn input_key(inputs: &Inputs) -> InputKey {
    let mut hasher = Hasher::new();
    hash_field(&mut hasher, b"BOUNDARY", inputs.boundary.as_bytes());
    hash_field(&mut hasher, b"TABLE", inputs.table.as_bytes());
    hash_field(&mut hasher, b"SCALE", inputs.selection.name.as_str().as_bytes());
    hash_field(&mut hasher, b"INVERT", &[inputs.selection.inverted as u8]);
    hash_field(&mut hasher, b"DELIM", inputs.delimiter.to_string().as_bytes());
    *hasher.finalize().as_bytes()
}

/// Champ préfixé par sa longueur pour éviter les collisions de concaténation
fn hash_field(hasher: &mut Hasher, tag: &[u8], data: &[u8]) {
    hasher.update(tag);
    hasher.update(&(data.len() as u64).to_le_bytes());
    hasher.update(data);
}
