//! The Mod aggregate.

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::capture::{Action, ActionCapture, ActionList};
use crate::config::ModConfig;
use crate::diagnostic::ModError;
use crate::element::{Element, ElementBody, ElementRecord};
use crate::registry::{self, ElementFactory, Generator, GeneratorRegistry};

/// Root of a declaration: identity, selected generator, elements in
/// declaration order and startup actions.
pub struct Mod {
    config: ModConfig,
    generator: Arc<dyn Generator>,
    elements: Vec<Element>,
    capture: ActionCapture,
}

/// Serialized form of a [`Mod`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub author: String,
    pub generator: String,
    pub mod_id: String,
    pub name: String,
    pub version: String,
    pub startup_actions: ActionList,
    pub elements: Vec<ElementRecord>,
}

/// An element factory bound to the [`Mod`] that will own its elements.
#[derive(Clone, Copy)]
pub struct BoundFactory<'a> {
    mod_: &'a Mod,
    name: &'a str,
    factory: ElementFactory,
}

impl BoundFactory<'_> {
    pub fn name(&self) -> &str {
        self.name
    }

    /// Validates `fields` and constructs the element.
    pub fn create(&self, fields: serde_json::Value) -> Result<Element, ModError> {
        (self.factory)(self.mod_, fields)
    }
}

impl Mod {
    /// Creates a mod whose generator is resolved in the process-wide registry.
    pub fn new(config: ModConfig) -> Result<Self, ModError> {
        let generator = registry::get_generator(&config.generator)?;
        Ok(Self::from_parts(config, generator))
    }

    /// Creates a mod against an explicit registry.
    pub fn with_registry(config: ModConfig, registry: &GeneratorRegistry) -> Result<Self, ModError> {
        let generator = registry.get(&config.generator)?;
        Ok(Self::from_parts(config, generator))
    }

    fn from_parts(config: ModConfig, generator: Arc<dyn Generator>) -> Self {
        Self {
            config,
            generator,
            elements: Vec::new(),
            capture: ActionCapture::new(),
        }
    }

    pub fn config(&self) -> &ModConfig {
        &self.config
    }

    pub fn author(&self) -> &str {
        &self.config.author
    }

    pub fn mod_id(&self) -> &str {
        &self.config.mod_id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn version(&self) -> &str {
        &self.config.version
    }

    pub fn generator_key(&self) -> &str {
        &self.config.generator
    }

    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }

    /// Looks up an element category offered by the selected generator.
    pub fn element_type<'a>(&'a self, name: &'a str) -> Result<BoundFactory<'a>, ModError> {
        let factory = self
            .generator
            .element_types()
            .get(name)
            .copied()
            .ok_or_else(|| ModError::UnsupportedElementType {
                generator: self.config.generator.clone(),
                element_type: name.to_string(),
            })?;

        Ok(BoundFactory {
            mod_: self,
            name,
            factory,
        })
    }

    /// Shorthand for `element_type(name)?.create(fields)`.
    pub fn element(&self, name: &str, fields: serde_json::Value) -> Result<Element, ModError> {
        self.element_type(name)?.create(fields)
    }

    /// Appends an element. Adding the same declaration twice appends twice.
    pub fn add(&mut self, element: Element) -> &Element {
        self.elements.push(element);
        &self.elements[self.elements.len() - 1]
    }

    /// Records a console command. Inside an event handler it becomes one of
    /// the handler's actions; otherwise it runs at server startup.
    pub fn send_console(&self, command: impl Into<String>) {
        self.capture.record(Action::console(command));
    }

    /// Registers an event handler on `element` through this mod's capture
    /// sink.
    pub fn on<F>(&self, element: &mut Element, event: &str, handler: F) -> Result<(), ModError>
    where
        F: FnOnce(),
    {
        element.register_event(&self.capture, event, handler)
    }

    pub fn capture(&self) -> &ActionCapture {
        &self.capture
    }

    pub fn startup_actions(&self) -> ActionList {
        self.capture.startup_actions()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements whose body is `T`, paired with their element, in declaration
    /// order.
    pub fn elements_of<T: ElementBody + Any>(&self) -> impl Iterator<Item = (&Element, &T)> {
        self.elements
            .iter()
            .filter_map(|element| element.body::<T>().map(|body| (element, body)))
    }

    pub fn to_manifest(&self) -> Manifest {
        Manifest {
            author: self.config.author.clone(),
            generator: self.config.generator.clone(),
            mod_id: self.config.mod_id.clone(),
            name: self.config.name.clone(),
            version: self.config.version.clone(),
            startup_actions: self.startup_actions(),
            elements: self.elements.iter().map(Element::serialize).collect(),
        }
    }

    /// Ensures `output_dir` exists and hands the mod to its generator.
    /// Returns the project root the generator reports.
    pub fn compile(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf, ModError> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir).map_err(|e| ModError::io(output_dir, e))?;

        let root = self.generator.compile(self, output_dir)?;
        info!(
            mod_id = %self.config.mod_id,
            generator = %self.config.generator,
            root = %root.display(),
            "compiled mod"
        );
        Ok(root)
    }
}

impl fmt::Debug for Mod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mod")
            .field("config", &self.config)
            .field("elements", &self.elements)
            .field("capture", &self.capture)
            .finish()
    }
}
