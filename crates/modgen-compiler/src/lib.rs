//! # ModGen Compiler
//!
//! This crate turns a declarative description of a game mod (items, blocks,
//! recipes, entities, event handlers) into a complete, buildable platform
//! project. Platforms are supported through pluggable generators; the built-in
//! one targets Minecraft Fabric 1.21.11.
//!
//! ## Architecture
//!
//! ```text
//! Declaration (code or JSON)
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Mod      │  Identity, generator, elements,
//! │              │  captured event actions
//! └──────┬───────┘
//!        │ element factories validate fields
//!        ▼
//! ┌──────────────┐
//! │   Registry   │  Generator key → backend
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Generator   │  Plan in memory, then write
//! │ (Mod → tree) │  the project tree
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modgen_compiler::{Mod, ModConfig};
//! use serde_json::json;
//!
//! modgen_compiler::init()?;
//! let config = ModConfig::new("Theo", "minecraft-fabric-1.21.11").with_mod_id("demo_mod");
//! let mut mod_ = Mod::new(config)?;
//!
//! let mut ruby = mod_.element("Item", json!({"identifier": "ruby"}))?;
//! mod_.on(&mut ruby, "Drop", || mod_.send_console("say A ruby was dropped"))?;
//! mod_.add(ruby);
//!
//! let root = mod_.compile("build")?;
//! ```

pub mod capture;
pub mod config;
pub mod declaration;
pub mod diagnostic;
pub mod element;
pub mod generators;
pub mod module;
pub mod normalize;
pub mod registry;

pub use capture::{Action, ActionCapture, ActionList};
pub use config::ModConfig;
pub use declaration::Declaration;
pub use diagnostic::ModError;
pub use element::{Element, ElementBody, ElementRecord};
pub use module::{Manifest, Mod};
pub use registry::{
    get_generator, init, list_generators, register_generator, Generator, GeneratorRegistry,
};
