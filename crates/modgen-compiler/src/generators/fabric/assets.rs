//! Client assets: models, blockstates, textures and translations.
//!
//! A user-supplied model or texture is copied verbatim. Missing models are
//! generated; missing textures leave a `<name>.missing.txt` marker and are
//! listed in `modgen_missing_assets.json`.

use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::project::GeneratedProject;
use super::FabricContext;
use crate::diagnostic::ModError;

pub const MISSING_ASSETS_FILE: &str = "modgen_missing_assets.json";

pub(crate) fn emit(project: &mut GeneratedProject, ctx: &FabricContext) -> Result<(), ModError> {
    let mod_id = ctx.mod_id();
    let assets = ctx.assets_dir();
    let models = assets.join("models");
    let textures = assets.join("textures");
    let mut lang = Map::new();
    let mut missing = Vec::new();

    for (element, tab) in &ctx.elements.tabs {
        lang.insert(
            format!("itemGroup.{mod_id}.{}", element.name()),
            Value::from(tab.display_name.as_str()),
        );
    }

    for (element, item) in &ctx.elements.items {
        let name = element.name();
        lang.insert(format!("item.{mod_id}.{name}"), Value::from(item.display_name.as_str()));

        let model = models.join("item").join(format!("{name}.json"));
        if !project.copy_if_exists(item.model.as_deref(), &model)? {
            project.json(
                &model,
                &json!({
                    "parent": "minecraft:item/generated",
                    "textures": {"layer0": format!("{mod_id}:item/{name}")},
                }),
            )?;
        }

        texture(project, &textures.join("item"), name, item.texture.as_deref(), &mut missing)?;
    }

    for (element, block) in &ctx.elements.blocks {
        let name = element.name();
        lang.insert(format!("block.{mod_id}.{name}"), Value::from(block.display_name.as_str()));

        project.json(
            assets.join("blockstates").join(format!("{name}.json")),
            &json!({"variants": {"": {"model": format!("{mod_id}:block/{name}")}}}),
        )?;

        let model = models.join("block").join(format!("{name}.json"));
        if !project.copy_if_exists(block.model.as_deref(), &model)? {
            project.json(
                &model,
                &json!({
                    "parent": "minecraft:block/cube_all",
                    "textures": {"all": format!("{mod_id}:block/{name}")},
                }),
            )?;
        }
        project.json(
            models.join("item").join(format!("{name}.json")),
            &json!({"parent": format!("{mod_id}:block/{name}")}),
        )?;

        texture(project, &textures.join("block"), name, block.texture.as_deref(), &mut missing)?;
    }

    for (element, entity) in &ctx.elements.entities {
        let name = element.name();
        lang.insert(format!("entity.{mod_id}.{name}"), Value::from(entity.display_name.as_str()));
        if entity.has_spawn_egg() {
            lang.insert(
                format!("item.{mod_id}.{name}_spawn_egg"),
                Value::from(format!("{} Spawn Egg", entity.display_name)),
            );
            project.json(
                models.join("item").join(format!("{name}_spawn_egg.json")),
                &json!({"parent": "minecraft:item/template_spawn_egg"}),
            )?;
        }
    }

    project.json(assets.join("lang").join("en_us.json"), &lang)?;
    debug!(entries = lang.len(), "wrote translations");

    if !missing.is_empty() {
        let declared: Vec<&str> = missing.iter().filter_map(|m| m.as_deref()).collect();
        for source in &declared {
            project.note_missing_asset(*source);
        }
        project.json(assets.join(MISSING_ASSETS_FILE), &json!({"missing": declared}))?;
    }
    Ok(())
}

/// Copies a texture to `<dir>/<name>.png`, or leaves a marker when the source
/// is unset or missing. Missing sources are pushed to `missing` (`None` when
/// no texture was declared).
fn texture(
    project: &mut GeneratedProject,
    dir: &Path,
    name: &str,
    source: Option<&str>,
    missing: &mut Vec<Option<String>>,
) -> Result<(), ModError> {
    if project.copy_if_exists(source, dir.join(format!("{name}.png")))? {
        return Ok(());
    }

    if let Some(source) = source {
        warn!(texture = source, element = name, "texture source not found");
    }
    project.text(
        dir.join(format!("{name}.missing.txt")),
        format!("Missing texture source: {}", source.unwrap_or("none")),
    );
    missing.push(source.map(str::to_string));
    Ok(())
}
