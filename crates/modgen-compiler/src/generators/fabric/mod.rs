//! Minecraft Fabric 1.21.11 generator.
//!
//! Compilation runs in two phases:
//!
//! 1. **Plan** — partition the mod's elements by category, derive symbols and
//!    cross-references, and render every output file into a
//!    [`GeneratedProject`]. Required input files (injected Java sources,
//!    payload files) are read here, so a missing one aborts before any output
//!    is touched.
//! 2. **Write** — replace `<output>/<mod_id>-fabric-1.21.11` with the planned
//!    tree.
//!
//! Platform versions are fixed by this generator and are not configurable.

pub mod elements;
pub mod project;
pub mod resolve;
pub mod symbols;

mod assets;
mod data;
mod gradle;
mod java;
mod metadata;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use tracing::{info, warn};

use crate::capture::console_commands;
use crate::diagnostic::ModError;
use crate::element::Element;
use crate::module::Mod;
use crate::registry::{ElementFactory, ElementTypes, Generator};
use elements::{Biome, Block, Command, Entity, Item, JavaSource, Recipe, Tab, Tag, Worldgen};
use project::GeneratedProject;
use resolve::References;
use symbols::SymbolTable;

pub use assets::MISSING_ASSETS_FILE;
pub use java::{extract_class_name, extract_package};

/// Registry key of this generator.
pub const GENERATOR_KEY: &str = "minecraft-fabric-1.21.11";

pub const MINECRAFT_VERSION: &str = "1.21.11";
pub const YARN_MAPPINGS: &str = "1.21.11+build.1";
pub const LOOM_VERSION: &str = "1.13.3";
pub const LOADER_VERSION: &str = "0.18.2";
pub const FABRIC_API_VERSION: &str = "0.139.4+1.21.11";
pub const GRADLE_VERSION: &str = "9.2.1";
pub const JAVA_RELEASE: u32 = 21;

static ELEMENT_TYPES: LazyLock<ElementTypes> = LazyLock::new(|| {
    ElementTypes::from([
        ("Tab", elements::tab as ElementFactory),
        ("Item", elements::item),
        ("Block", elements::block),
        ("Recipe", elements::recipe),
        ("Tag", elements::tag),
        ("JavaSource", elements::java_source),
        ("Command", elements::command),
        ("Entity", elements::entity),
        ("Biome", elements::biome),
        ("Worldgen", elements::worldgen),
    ])
});

/// Elements of one category with their typed bodies, in declaration order.
pub(crate) type Declared<'a, T> = Vec<(&'a Element, &'a T)>;

/// A mod's elements split by category.
pub(crate) struct Partition<'a> {
    pub tabs: Declared<'a, Tab>,
    pub items: Declared<'a, Item>,
    pub blocks: Declared<'a, Block>,
    pub recipes: Declared<'a, Recipe>,
    pub tags: Declared<'a, Tag>,
    pub java_sources: Declared<'a, JavaSource>,
    pub commands: Declared<'a, Command>,
    pub entities: Declared<'a, Entity>,
    pub biomes: Declared<'a, Biome>,
    pub worldgens: Declared<'a, Worldgen>,
}

impl<'a> Partition<'a> {
    fn new(mod_: &'a Mod) -> Self {
        Self {
            tabs: mod_.elements_of::<Tab>().collect(),
            items: mod_.elements_of::<Item>().collect(),
            blocks: mod_.elements_of::<Block>().collect(),
            recipes: mod_.elements_of::<Recipe>().collect(),
            tags: mod_.elements_of::<Tag>().collect(),
            java_sources: mod_.elements_of::<JavaSource>().collect(),
            commands: mod_.elements_of::<Command>().collect(),
            entities: mod_.elements_of::<Entity>().collect(),
            biomes: mod_.elements_of::<Biome>().collect(),
            worldgens: mod_.elements_of::<Worldgen>().collect(),
        }
    }
}

/// Everything the emitters share while planning one mod.
pub(crate) struct FabricContext<'a> {
    pub mod_: &'a Mod,
    pub elements: Partition<'a>,
    pub symbols: SymbolTable,
    pub references: References,
    pub startup_commands: Vec<String>,
}

impl<'a> FabricContext<'a> {
    fn new(mod_: &'a Mod) -> Self {
        let elements = Partition::new(mod_);
        let symbols = SymbolTable::new(
            mod_.mod_id(),
            mod_.author(),
            elements
                .entities
                .iter()
                .filter(|(_, entity)| entity.has_spawn_egg())
                .map(|(element, _)| element.name().to_string()),
        );
        let references = References::new(
            mod_.mod_id(),
            elements.items.iter().map(|(e, _)| e.name().to_string()),
            elements.blocks.iter().map(|(e, _)| e.name().to_string()),
        );

        Self {
            mod_,
            elements,
            symbols,
            references,
            startup_commands: console_commands(&mod_.startup_actions()),
        }
    }

    pub fn mod_id(&self) -> &str {
        self.mod_.mod_id()
    }

    /// `src/main/resources/assets/<mod_id>`.
    pub fn assets_dir(&self) -> PathBuf {
        Path::new(RESOURCES_DIR).join("assets").join(self.mod_id())
    }
}

pub(crate) const RESOURCES_DIR: &str = "src/main/resources";

/// The Fabric 1.21.11 backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct FabricGenerator;

impl FabricGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Directory name of the generated project under the output directory.
    pub fn root_name(mod_id: &str) -> String {
        format!("{mod_id}-fabric-{MINECRAFT_VERSION}")
    }

    /// Renders the complete project in memory without writing anything.
    pub fn plan(&self, mod_: &Mod) -> Result<GeneratedProject, ModError> {
        let ctx = FabricContext::new(mod_);
        let mut project = GeneratedProject::new();

        let hooks = java::injected_sources(&mut project, &ctx)?;
        gradle::emit(&mut project, &ctx);
        metadata::emit(&mut project, &ctx, &hooks)?;
        java::emit(&mut project, &ctx, &hooks);
        assets::emit(&mut project, &ctx)?;
        data::emit(&mut project, &ctx)?;
        gradle::readme(&mut project, &ctx);

        Ok(project)
    }
}

impl Generator for FabricGenerator {
    fn key(&self) -> &str {
        GENERATOR_KEY
    }

    fn element_types(&self) -> &ElementTypes {
        &ELEMENT_TYPES
    }

    fn compile(&self, mod_: &Mod, output_dir: &Path) -> Result<PathBuf, ModError> {
        let root = output_dir.join(Self::root_name(mod_.mod_id()));
        let project = self.plan(mod_)?;
        project.write(&root)?;

        if !project.missing_assets().is_empty() {
            warn!(
                count = project.missing_assets().len(),
                "some textures were missing; see modgen_missing_assets.json"
            );
        }
        info!(
            root = %root.display(),
            files = project.files().len(),
            "generated Fabric project"
        );
        Ok(root)
    }
}
