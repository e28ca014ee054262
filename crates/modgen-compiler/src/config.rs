//! Mod configuration.

/// Identity of a mod plus the generator it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModConfig {
    /// Author credited in generated metadata.
    pub author: String,

    /// Registry key of the generator (e.g. "minecraft-fabric-1.21.11").
    pub generator: String,

    /// Namespace for every resource the mod declares.
    pub mod_id: String,

    /// Human-readable mod name.
    pub name: String,

    /// Version string written to build metadata.
    pub version: String,
}

impl ModConfig {
    pub fn new(author: impl Into<String>, generator: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            generator: generator.into(),
            ..Self::default()
        }
    }

    pub fn with_mod_id(mut self, mod_id: impl Into<String>) -> Self {
        self.mod_id = mod_id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            author: String::new(),
            generator: String::new(),
            mod_id: "examplemod".to_string(),
            name: "Example Mod".to_string(),
            version: "0.1.0".to_string(),
        }
    }
}
