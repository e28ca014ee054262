//! Java symbol derivation.
//!
//! Every generated class and constant name is derived here so that all files
//! referring to the same element agree on its symbol.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::normalize::{to_code_constant, to_code_symbol, to_filesystem_fragment};

/// Root package shared by all generated mods.
pub const PACKAGE_ROOT: &str = "modgen.generated";

#[derive(Debug, Clone)]
pub struct SymbolTable {
    package: String,
    main_class: String,
    author_fragment: String,
    spawn_eggs: BTreeSet<String>,
}

impl SymbolTable {
    /// `spawn_eggs` names the entities that declare spawn egg colors.
    pub fn new<I>(mod_id: &str, author: &str, spawn_eggs: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            package: format!(
                "{PACKAGE_ROOT}.{}",
                to_filesystem_fragment(mod_id, "generated")
            ),
            main_class: format!("{}Mod", to_code_symbol(mod_id)),
            author_fragment: to_filesystem_fragment(author, "author"),
            spawn_eggs: spawn_eggs.into_iter().collect(),
        }
    }

    /// Package of every generated class, e.g. `modgen.generated.demo_mod`.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Source directory for [`package`](Self::package), relative to the
    /// project root.
    pub fn package_dir(&self) -> PathBuf {
        package_path(&self.package)
    }

    /// Main initializer class, e.g. `DemoModMod`.
    pub fn main_class(&self) -> &str {
        &self.main_class
    }

    pub fn client_class(&self) -> String {
        format!("{}Client", self.main_class)
    }

    pub fn server_class(&self) -> String {
        format!("{}Server", self.main_class)
    }

    /// Maven group suffix derived from the author.
    pub fn author_fragment(&self) -> &str {
        &self.author_fragment
    }

    /// Registry constant for any element name.
    pub fn constant(&self, name: &str) -> String {
        to_code_constant(name)
    }

    pub fn key_constant(&self, name: &str) -> String {
        format!("{}_KEY", self.constant(name))
    }

    /// Constant of the item registered alongside a block.
    pub fn block_item_constant(&self, name: &str) -> String {
        format!("{}_ITEM", self.constant(name))
    }

    pub fn block_item_key_constant(&self, name: &str) -> String {
        format!("{}_ITEM_KEY", self.constant(name))
    }

    /// Class generated for an entity, e.g. `RubyGuardianEntity`.
    pub fn entity_class(&self, name: &str) -> String {
        format!("{}Entity", to_code_symbol(name))
    }

    pub fn has_spawn_egg(&self, entity: &str) -> bool {
        self.spawn_eggs.contains(entity)
    }

    pub fn spawn_egg_constant(&self, entity: &str) -> String {
        format!("{}_SPAWN_EGG", self.constant(entity))
    }

    /// Entities with spawn eggs, sorted by name.
    pub fn spawn_egg_entities(&self) -> impl Iterator<Item = &str> {
        self.spawn_eggs.iter().map(String::as_str)
    }
}

/// `a.b.c` → `src/main/java/a/b/c`.
pub fn package_path(package: &str) -> PathBuf {
    let mut path = PathBuf::from("src/main/java");
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}
