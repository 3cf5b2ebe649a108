//! Root selection: which declared types seed the dependency graph.

use automap_ir::{Registry, TypeId};
use indexmap::IndexMap;
use serde::Serialize;

/// How roots were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    /// At least one annotated type maps from a source; `primary` is the
    /// last such mapper in declaration order.
    Mapping { primary: TypeId },
    /// No annotated type maps from a source; every annotated type
    /// generates a copy of itself.
    Standalone,
}

/// A root source type and the annotated type that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RootEntry {
    pub source: TypeId,
    pub mapper: TypeId,
    /// The mapper when it asks the generated type to extend it.
    pub base: Option<TypeId>,
}

/// The roots of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct Roots {
    pub mode: Mode,
    entries: IndexMap<TypeId, RootEntry>,
    /// Mappers ignored because an earlier mapper already claimed their source.
    duplicates: Vec<RootEntry>,
}

impl Roots {
    pub fn select(registry: &Registry) -> Self {
        let mut entries: IndexMap<TypeId, RootEntry> = IndexMap::new();
        let mut duplicates = Vec::new();
        let mut primary = None;

        for (mapper, ty) in registry.iter() {
            let Some(spec) = &ty.mapper else { continue };
            let Some(source) = spec.map_from else { continue };
            primary = Some(mapper);

            let entry = RootEntry {
                source,
                mapper,
                base: spec.extend.then_some(mapper),
            };
            if entries.contains_key(&source) {
                duplicates.push(entry);
            } else {
                entries.insert(source, entry);
            }
        }

        if let Some(primary) = primary {
            return Self {
                mode: Mode::Mapping { primary },
                entries,
                duplicates,
            };
        }

        let entries = registry
            .iter()
            .filter(|(_, ty)| ty.is_annotated())
            .map(|(id, _)| {
                (
                    id,
                    RootEntry {
                        source: id,
                        mapper: id,
                        base: None,
                    },
                )
            })
            .collect();
        Self {
            mode: Mode::Standalone,
            entries,
            duplicates,
        }
    }

    /// Root source types in declaration order of their mappers.
    pub fn sources(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.entries.keys().copied()
    }

    pub fn entry(&self, source: TypeId) -> Option<&RootEntry> {
        self.entries.get(&source)
    }

    pub fn entries(&self) -> impl Iterator<Item = &RootEntry> {
        self.entries.values()
    }

    pub fn duplicates(&self) -> &[RootEntry] {
        &self.duplicates
    }

    pub fn is_root(&self, id: TypeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// The primary mapper, in mapping mode.
    pub fn primary(&self) -> Option<TypeId> {
        match self.mode {
            Mode::Mapping { primary } => Some(primary),
            Mode::Standalone => None,
        }
    }

    /// The extended base of the type generated for `source`, if any.
    pub fn base_of(&self, source: TypeId) -> Option<TypeId> {
        self.entries.get(&source).and_then(|e| e.base)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
