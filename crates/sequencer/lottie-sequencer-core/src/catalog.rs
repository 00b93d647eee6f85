//! Animation catalog: immutable name -> keyframe range mapping.
//!
//! Built once from a [`CatalogDefinition`]. Sources are merged in a fixed order
//! (initial, loading, in-animations, out-animations); a later source silently shadows an
//! earlier one that uses the same name.

use hashbrown::{HashMap, HashSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::range::KeyframeRange;

/// Name of the bootstrap clip.
pub const INITIAL: &str = "initial";
/// Name of the looping loader clip.
pub const LOADING: &str = "loading";

/// Caller-supplied clip definitions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogDefinition {
    pub initial: KeyframeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<KeyframeRange>,
    #[serde(default, rename = "inAnimations", alias = "in_animations")]
    pub in_animations: IndexMap<String, KeyframeRange>,
    #[serde(default, rename = "outAnimations", alias = "out_animations")]
    pub out_animations: IndexMap<String, KeyframeRange>,
}

impl CatalogDefinition {
    pub fn new(initial: KeyframeRange) -> Self {
        Self {
            initial,
            loading: None,
            in_animations: IndexMap::new(),
            out_animations: IndexMap::new(),
        }
    }

    pub fn with_loading(mut self, range: KeyframeRange) -> Self {
        self.loading = Some(range);
        self
    }

    pub fn with_in(mut self, name: impl Into<String>, range: KeyframeRange) -> Self {
        self.in_animations.insert(name.into(), range);
        self
    }

    pub fn with_out(mut self, name: impl Into<String>, range: KeyframeRange) -> Self {
        self.out_animations.insert(name.into(), range);
        self
    }
}

/// Resolved catalog. Never mutated after construction.
#[derive(Clone, Debug)]
pub struct AnimationCatalog {
    entries: HashMap<String, KeyframeRange>,
    /// Literal `initial` definition; bootstrap seeds from this even if a later source shadows the name.
    initial: KeyframeRange,
    in_names: Vec<String>,
    out_names: HashSet<String>,
}

impl AnimationCatalog {
    pub fn new(def: CatalogDefinition) -> Self {
        let mut entries = HashMap::with_capacity(
            2 + def.in_animations.len() + def.out_animations.len(),
        );
        entries.insert(INITIAL.to_string(), def.initial);
        if let Some(loading) = def.loading {
            entries.insert(LOADING.to_string(), loading);
        }

        let mut in_names = Vec::with_capacity(def.in_animations.len());
        for (name, range) in def.in_animations {
            if entries.insert(name.clone(), range).is_some() {
                log::debug!("in-animation '{name}' shadows an earlier catalog entry");
            }
            in_names.push(name);
        }

        let mut out_names = HashSet::with_capacity(def.out_animations.len());
        for (name, range) in def.out_animations {
            if entries.insert(name.clone(), range).is_some() {
                log::debug!("out-animation '{name}' shadows an earlier catalog entry");
            }
            out_names.insert(name);
        }

        Self {
            entries,
            initial: def.initial,
            in_names,
            out_names,
        }
    }

    /// Look up a clip by name. `None` means the name is unknown.
    pub fn resolve(&self, name: &str) -> Option<KeyframeRange> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn initial(&self) -> KeyframeRange {
        self.initial
    }

    pub fn is_out_animation(&self, name: &str) -> bool {
        self.out_names.contains(name)
    }

    /// In-animation names in declaration order.
    pub fn in_animation_names(&self) -> impl Iterator<Item = &str> {
        self.in_names.iter().map(String::as_str)
    }

    pub fn out_animation_names(&self) -> impl Iterator<Item = &str> {
        self.out_names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<CatalogDefinition> for AnimationCatalog {
    fn from(def: CatalogDefinition) -> Self {
        Self::new(def)
    }
}

/// Parse a JSON catalog definition and build the catalog.
pub fn parse_catalog_json(s: &str) -> Result<AnimationCatalog, CatalogError> {
    let def: CatalogDefinition = serde_json::from_str(s)?;
    Ok(AnimationCatalog::new(def))
}
