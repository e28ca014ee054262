//! Generator registry.
//!
//! Generators are looked up by a string key. A [`GeneratorRegistry`] is a plain
//! value that can be built and passed around explicitly; the process-wide table
//! behind [`global`] starts empty and is filled by [`init`] (or [`initialize`]
//! with a custom set) before any [`Mod`](crate::Mod) resolves its generator.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::diagnostic::ModError;
use crate::element::Element;
use crate::module::Mod;

/// Constructs one element category from untyped fields.
pub type ElementFactory = fn(&Mod, serde_json::Value) -> Result<Element, ModError>;

/// Element categories a generator offers, keyed by factory name.
pub type ElementTypes = BTreeMap<&'static str, ElementFactory>;

/// A target platform backend.
pub trait Generator: Send + Sync {
    /// Registry key (e.g. "minecraft-fabric-1.21.11").
    fn key(&self) -> &str;

    /// Element categories this generator understands.
    fn element_types(&self) -> &ElementTypes;

    /// Renders the mod into `output_dir` and returns the project root.
    fn compile(&self, mod_: &Mod, output_dir: &Path) -> Result<PathBuf, ModError>;
}

/// Key → generator table.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, Arc<dyn Generator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in generator.
    pub fn with_builtins() -> Result<Self, ModError> {
        Self::from_generators(crate::generators::builtin_generators())
    }

    /// Registry holding `generators`. Keys must be non-empty and distinct.
    pub fn from_generators(generators: Vec<Arc<dyn Generator>>) -> Result<Self, ModError> {
        let mut registry = Self::new();
        for generator in generators {
            registry.register(generator, false)?;
        }
        Ok(registry)
    }

    /// Adds a generator. An existing key is only overwritten when `replace`
    /// is set.
    pub fn register(
        &mut self,
        generator: Arc<dyn Generator>,
        replace: bool,
    ) -> Result<(), ModError> {
        let key = generator.key().to_string();
        if key.is_empty() {
            return Err(ModError::EmptyGeneratorKey);
        }
        if !replace && self.generators.contains_key(&key) {
            return Err(ModError::DuplicateGenerator { key });
        }

        debug!(key = %key, replace, "registered generator");
        self.generators.insert(key, generator);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Arc<dyn Generator>, ModError> {
        self.generators
            .get(key)
            .cloned()
            .ok_or_else(|| ModError::GeneratorNotFound {
                key: key.to_string(),
            })
    }

    /// Registered keys in sorted order.
    pub fn list(&self) -> Vec<String> {
        self.generators.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.list())
            .finish()
    }
}

// =============================================================================
// Process-wide registry
// =============================================================================

static GLOBAL: OnceLock<RwLock<GeneratorRegistry>> = OnceLock::new();

/// The process-wide registry. Empty until [`init`] or [`initialize`] runs.
pub fn global() -> &'static RwLock<GeneratorRegistry> {
    GLOBAL.get_or_init(|| RwLock::new(GeneratorRegistry::new()))
}

pub fn register_generator(generator: Arc<dyn Generator>, replace: bool) -> Result<(), ModError> {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(generator, replace)
}

pub fn get_generator(key: &str) -> Result<Arc<dyn Generator>, ModError> {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
}

pub fn list_generators() -> Vec<String> {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .list()
}

/// Registers `generators` in the process-wide table, replacing existing keys.
pub fn initialize<I>(generators: I) -> Result<(), ModError>
where
    I: IntoIterator<Item = Arc<dyn Generator>>,
{
    let mut registry = global().write().unwrap_or_else(PoisonError::into_inner);
    for generator in generators {
        registry.register(generator, true)?;
    }
    Ok(())
}

/// Registers the built-in generators. Safe to call more than once.
pub fn init() -> Result<(), ModError> {
    initialize(crate::generators::builtin_generators())
}
