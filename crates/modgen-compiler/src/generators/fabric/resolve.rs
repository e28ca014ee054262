//! Cross-reference resolution.
//!
//! Recipes, tags and tab icons name other content by a short name or a full
//! `namespace:path` id. Short names resolve to this mod's own items first,
//! then its blocks, and finally to the `minecraft` namespace.

use std::collections::BTreeSet;

use crate::normalize::{is_literal_identifier, normalize_path, split_namespaced, PATH_FALLBACK};

/// Namespace used for short names that match no local element.
pub const EXTERNAL_NAMESPACE: &str = "minecraft";

/// Where a resolved reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOrigin {
    /// Already a strict `namespace:path` id, passed through untouched.
    Literal,
    LocalItem,
    LocalBlock,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub id: String,
    pub origin: ReferenceOrigin,
}

/// Names of the items and blocks a mod declares.
#[derive(Debug, Clone, Default)]
pub struct References {
    mod_id: String,
    items: BTreeSet<String>,
    blocks: BTreeSet<String>,
}

impl References {
    pub fn new<I, B>(mod_id: &str, items: I, blocks: B) -> Self
    where
        I: IntoIterator<Item = String>,
        B: IntoIterator<Item = String>,
    {
        Self {
            mod_id: mod_id.to_string(),
            items: items.into_iter().collect(),
            blocks: blocks.into_iter().collect(),
        }
    }

    pub fn items(&self) -> &BTreeSet<String> {
        &self.items
    }

    pub fn blocks(&self) -> &BTreeSet<String> {
        &self.blocks
    }

    /// Resolves an item-like reference. When a short name matches both an
    /// item and a block, the item wins.
    pub fn resolve(&self, value: &str) -> ResolvedReference {
        if is_literal_identifier(value) {
            return ResolvedReference {
                id: value.to_string(),
                origin: ReferenceOrigin::Literal,
            };
        }

        let path = normalize_path(value, PATH_FALLBACK);
        let (namespace, origin) = if self.items.contains(&path) {
            (self.mod_id.as_str(), ReferenceOrigin::LocalItem)
        } else if self.blocks.contains(&path) {
            (self.mod_id.as_str(), ReferenceOrigin::LocalBlock)
        } else {
            (EXTERNAL_NAMESPACE, ReferenceOrigin::External)
        };

        ResolvedReference {
            id: format!("{namespace}:{path}"),
            origin,
        }
    }

    /// Shorthand for `resolve(value).id`.
    pub fn resolve_id(&self, value: &str) -> String {
        self.resolve(value).id
    }
}

/// What a creative tab shows as its icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    Item(String),
    /// The block item of a local block.
    Block(String),
    /// The spawn egg of a local entity.
    SpawnEgg(String),
    /// Any registered item, looked up by id at runtime.
    Registry { namespace: String, path: String },
    /// Nothing declared at all.
    Stone,
}

/// Picks a tab icon.
///
/// A declared icon is matched against local items, blocks and spawn eggs (in
/// that order), then accepted as a literal id. Without a usable icon the tab
/// falls back to the first local item, block or spawn egg by sorted name.
pub fn resolve_icon<'a, E>(icon: Option<&str>, references: &References, spawn_eggs: E) -> IconSource
where
    E: IntoIterator<Item = &'a str>,
{
    let eggs: BTreeSet<&str> = spawn_eggs.into_iter().collect();

    if let Some(icon) = icon.filter(|icon| !icon.is_empty()) {
        let name = normalize_path(icon, "");
        if references.items.contains(&name) {
            return IconSource::Item(name);
        }
        if references.blocks.contains(&name) {
            return IconSource::Block(name);
        }
        if eggs.contains(name.as_str()) {
            return IconSource::SpawnEgg(name);
        }
        if is_literal_identifier(icon) {
            let (namespace, path) = split_namespaced(icon, &references.mod_id);
            return IconSource::Registry { namespace, path };
        }
    }

    if let Some(item) = references.items.iter().next() {
        return IconSource::Item(item.clone());
    }
    if let Some(block) = references.blocks.iter().next() {
        return IconSource::Block(block.clone());
    }
    if let Some(entity) = eggs.iter().next() {
        return IconSource::SpawnEgg(entity.to_string());
    }
    IconSource::Stone
}
