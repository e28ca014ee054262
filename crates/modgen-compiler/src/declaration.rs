//! JSON mod declarations.
//!
//! A declaration document names the mod, its generator, startup console
//! commands and an ordered list of elements. Event handlers are given as
//! lists of console commands and are replayed through the normal capture
//! path, so a built [`Mod`] is indistinguishable from one declared in code.
//!
//! ```json
//! {
//!   "author": "Theo", "generator": "minecraft-fabric-1.21.11", "mod_id": "demo_mod",
//!   "startup": ["say hi"],
//!   "elements": [
//!     {"type": "Item", "fields": {"identifier": "ruby"},
//!      "events": {"Drop": [["say dropped"]]}}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::config::ModConfig;
use crate::diagnostic::ModError;
use crate::module::Mod;
use crate::registry::GeneratorRegistry;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    #[serde(default)]
    pub author: String,
    pub generator: String,
    pub mod_id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,

    /// Console commands run once the server has started.
    #[serde(default)]
    pub startup: Vec<String>,

    #[serde(default)]
    pub elements: Vec<ElementDeclaration>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDeclaration {
    /// Element category offered by the generator, e.g. `Item`.
    #[serde(rename = "type")]
    pub element_type: String,

    #[serde(default)]
    pub fields: serde_json::Value,

    /// Event name → handlers, each handler a list of console commands.
    #[serde(default)]
    pub events: BTreeMap<String, Vec<Vec<String>>>,
}

impl Declaration {
    /// Reads and parses a declaration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ModError::io(path, e))?;
        Self::parse(&text, path.to_path_buf())
    }

    /// Parses a declaration held in memory.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, ModError> {
        Self::parse(text, PathBuf::from("<memory>"))
    }

    fn parse(text: &str, path: PathBuf) -> Result<Self, ModError> {
        serde_json::from_str(text).map_err(|e| ModError::InvalidDeclaration {
            path,
            message: e.to_string(),
        })
    }

    pub fn config(&self) -> ModConfig {
        let mut config = ModConfig::new(&self.author, &self.generator);
        if let Some(mod_id) = &self.mod_id {
            config = config.with_mod_id(mod_id);
        }
        if let Some(name) = &self.name {
            config = config.with_name(name);
        }
        if let Some(version) = &self.version {
            config = config.with_version(version);
        }
        config
    }

    /// Builds the mod. Without `registry` the generator is looked up in the
    /// process-wide registry.
    pub fn build(&self, registry: Option<&GeneratorRegistry>) -> Result<Mod, ModError> {
        let mut mod_ = match registry {
            Some(registry) => Mod::with_registry(self.config(), registry)?,
            None => Mod::new(self.config())?,
        };

        for command in &self.startup {
            mod_.send_console(command);
        }

        for declared in &self.elements {
            let mut element = mod_.element(&declared.element_type, declared.fields.clone())?;
            for (event, handlers) in &declared.events {
                for commands in handlers {
                    mod_.on(&mut element, event, || {
                        for command in commands {
                            mod_.send_console(command);
                        }
                    })?;
                }
            }
            mod_.add(element);
        }

        debug!(
            mod_id = %mod_.mod_id(),
            elements = mod_.elements().len(),
            "built mod from declaration"
        );
        Ok(mod_)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::Action;
    use crate::generators::fabric::GENERATOR_KEY;

    fn registry() -> GeneratorRegistry {
        GeneratorRegistry::with_builtins().unwrap()
    }

    #[test]
    fn builds_elements_events_and_startup() {
        let declaration = Declaration::from_str(
            r#"{
                "author": "Theo",
                "generator": "minecraft-fabric-1.21.11",
                "mod_id": "demo_mod",
                "startup": ["say ready"],
                "elements": [
                    {"type": "Item", "fields": {"identifier": "ruby"},
                     "events": {"Drop": [["say dropped", "give @a ruby"], []]}},
                    {"type": "Block", "fields": {"identifier": "ruby_block"}}
                ]
            }"#,
        )
        .unwrap();

        let mod_ = declaration.build(Some(&registry())).unwrap();
        assert_eq!(mod_.name(), "Example Mod");
        assert_eq!(mod_.startup_actions(), vec![Action::console("say ready")]);

        let names: Vec<&str> = mod_.elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["ruby", "ruby_block"]);

        let drop = mod_.elements()[0].events("Drop");
        assert_eq!(drop.len(), 2);
        assert_eq!(
            drop[0],
            vec![Action::console("say dropped"), Action::console("give @a ruby")]
        );
        assert!(drop[1].is_empty());
    }

    #[test]
    fn malformed_json_is_a_declaration_error() {
        let err = Declaration::from_str("{\"generator\": ").unwrap_err();
        assert!(matches!(err, ModError::InvalidDeclaration { .. }));

        let err = Declaration::from_str(r#"{"generator": "x", "colour": 1}"#).unwrap_err();
        assert!(matches!(err, ModError::InvalidDeclaration { .. }));
    }

    #[test]
    fn validation_errors_propagate() {
        let declaration = Declaration {
            generator: GENERATOR_KEY.to_string(),
            elements: vec![ElementDeclaration {
                element_type: "Item".to_string(),
                fields: serde_json::json!({}),
                events: BTreeMap::from([("Explode".to_string(), vec![vec!["boom".to_string()]])]),
            }],
            ..Declaration::default()
        };
        let err = declaration.build(Some(&registry())).unwrap_err();
        assert!(matches!(err, ModError::UnknownEvent { .. }));
    }

    #[test]
    fn unknown_generator() {
        let declaration = Declaration {
            generator: "nope".to_string(),
            ..Declaration::default()
        };
        let err = declaration.build(Some(&registry())).unwrap_err();
        assert!(matches!(err, ModError::GeneratorNotFound { .. }));
    }

    #[test]
    fn load_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod.json");
        fs::write(&path, r#"{"generator": "minecraft-fabric-1.21.11", "name": "Demo"}"#).unwrap();

        let declaration = Declaration::load(&path).unwrap();
        assert_eq!(declaration.config().name, "Demo");
        assert_eq!(declaration.config().mod_id, "examplemod");

        let err = Declaration::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ModError::IoError { .. }));
    }
}
