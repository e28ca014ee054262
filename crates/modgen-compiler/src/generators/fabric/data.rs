//! Data pack files: recipes, tags, loot tables, biomes and worldgen entries.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use tracing::debug;

use super::elements::{Biome, Recipe, RecipeType};
use super::project::GeneratedProject;
use super::{FabricContext, RESOURCES_DIR};
use crate::diagnostic::ModError;
use crate::normalize::split_namespaced;

/// Placed-feature ids that are commonly confused with configured features.
const FEATURE_ALIASES: [(&str, &str); 1] = [("minecraft:ore_diamond", "minecraft:ore_diamond_small")];

pub(crate) fn emit(project: &mut GeneratedProject, ctx: &FabricContext) -> Result<(), ModError> {
    let data = Path::new(RESOURCES_DIR).join("data");

    for (_, recipe) in &ctx.elements.recipes {
        let (namespace, path) = split_namespaced(&recipe.identifier, ctx.mod_id());
        project.json(
            data.join(namespace).join("recipes").join(format!("{path}.json")),
            &recipe_payload(ctx, recipe),
        )?;
    }

    for (_, tag) in &ctx.elements.tags {
        let values: Vec<String> = tag
            .values
            .iter()
            .map(|value| ctx.references.resolve_id(value))
            .collect();
        project.json(
            data.join(&tag.namespace)
                .join("tags")
                .join(tag.registry.folder())
                .join(format!("{}.json", tag.identifier)),
            &json!({"replace": tag.replace, "values": values}),
        )?;
    }

    for (element, _) in &ctx.elements.blocks {
        let name = element.name();
        let loot = json!({
            "type": "minecraft:block",
            "pools": [{
                "rolls": 1.0,
                "entries": [{"type": "minecraft:item", "name": format!("{}:{name}", ctx.mod_id())}],
                "conditions": [{"condition": "minecraft:survives_explosion"}],
            }],
        });
        // `loot_tables/` is the pre-1.21 layout.
        for folder in ["loot_tables", "loot_table"] {
            project.json(
                data.join(ctx.mod_id()).join(folder).join("blocks").join(format!("{name}.json")),
                &loot,
            )?;
        }
    }

    for (element, biome) in &ctx.elements.biomes {
        let label = format!("Biome '{}'", element.name());
        let payload = resolve_payload(&label, biome.payload.as_ref(), biome.payload_file.as_deref())?;
        let payload = if payload.is_empty() {
            default_biome(biome)
        } else {
            payload
        };
        project.json(
            data.join(&biome.namespace)
                .join("worldgen")
                .join("biome")
                .join(format!("{}.json", biome.identifier)),
            &payload,
        )?;
    }

    for (element, entry) in &ctx.elements.worldgens {
        let label = format!("Worldgen '{}'", element.name());
        let mut payload =
            resolve_payload(&label, entry.payload.as_ref(), entry.payload_file.as_deref())?;
        if entry.worldgen_type == "placed_feature" {
            alias_feature(&mut payload);
        }
        project.json(
            data.join(&entry.namespace)
                .join("worldgen")
                .join(&entry.worldgen_type)
                .join(format!("{}.json", entry.identifier)),
            &payload,
        )?;
    }

    debug!(
        recipes = ctx.elements.recipes.len(),
        tags = ctx.elements.tags.len(),
        biomes = ctx.elements.biomes.len(),
        worldgen = ctx.elements.worldgens.len(),
        "wrote data files"
    );
    Ok(())
}

fn recipe_payload(ctx: &FabricContext, recipe: &Recipe) -> Value {
    let resolve = |value: &str| ctx.references.resolve_id(value);
    let output = resolve(&recipe.output);

    match recipe.recipe_type {
        RecipeType::Shaped => {
            let key: Map<String, Value> = recipe
                .key
                .iter()
                .map(|(symbol, item)| (symbol.clone(), json!({"item": resolve(item)})))
                .collect();
            json!({
                "type": "minecraft:crafting_shaped",
                "pattern": recipe.pattern,
                "key": key,
                "result": {"item": output, "count": recipe.count},
            })
        }
        RecipeType::Shapeless => {
            let ingredients: Vec<Value> = recipe
                .ingredients
                .iter()
                .map(|item| json!({"item": resolve(item)}))
                .collect();
            json!({
                "type": "minecraft:crafting_shapeless",
                "ingredients": ingredients,
                "result": {"item": output, "count": recipe.count},
            })
        }
        cooking => json!({
            "type": format!("minecraft:{}", cooking.as_str()),
            "ingredient": {"item": resolve(recipe.input_item.as_deref().unwrap_or_default())},
            "result": output,
            "experience": recipe.experience,
            "cookingtime": recipe.cooking_time,
        }),
    }
}

/// Inline payload, else the parsed `payload_file`, else an empty object.
fn resolve_payload(
    label: &str,
    payload: Option<&Map<String, Value>>,
    payload_file: Option<&str>,
) -> Result<Map<String, Value>, ModError> {
    if let Some(file) = payload_file {
        return read_payload_file(label, &PathBuf::from(file));
    }
    Ok(payload.cloned().unwrap_or_default())
}

fn read_payload_file(label: &str, path: &Path) -> Result<Map<String, Value>, ModError> {
    if !path.is_file() {
        return Err(ModError::MissingInputFile {
            label: format!("{label} payload"),
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| ModError::io(path, e))?;
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ModError::InvalidPayload {
            label: label.to_string(),
            message: format!("{} must contain a JSON object", path.display()),
        }),
        Err(e) => Err(ModError::InvalidPayload {
            label: label.to_string(),
            message: format!("{}: {e}", path.display()),
        }),
    }
}

fn alias_feature(payload: &mut Map<String, Value>) {
    let Some(Value::String(feature)) = payload.get_mut("feature") else {
        return;
    };
    if let Some((_, alias)) = FEATURE_ALIASES.iter().find(|(from, _)| *from == feature.as_str()) {
        *feature = alias.to_string();
    }
}

/// `#rrggbb`.
pub fn rgb_hex(color: u32) -> String {
    format!("#{:06x}", color.min(0xFF_FFFF))
}

fn default_biome(biome: &Biome) -> Map<String, Value> {
    let payload = json!({
        "has_precipitation": biome.has_precipitation,
        "temperature": biome.temperature,
        "downfall": biome.downfall,
        "attributes": {
            "minecraft:visual/sky_color": rgb_hex(biome.sky_color),
            "minecraft:visual/fog_color": rgb_hex(biome.fog_color),
            "minecraft:visual/water_fog_color": rgb_hex(biome.water_fog_color),
        },
        "effects": {
            "water_color": rgb_hex(biome.water_color),
        },
        "carvers": [
            "minecraft:cave",
            "minecraft:cave_extra_underground",
            "minecraft:canyon",
        ],
        "features": [],
        "spawners": {
            "ambient": [],
            "axolotls": [],
            "creature": [],
            "misc": [],
            "monster": [],
            "underground_water_creature": [],
            "water_ambient": [],
            "water_creature": [],
        },
        "spawn_costs": {},
    });
    match payload {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(rgb_hex(7_907_327), "#78a7ff");
        assert_eq!(rgb_hex(0), "#000000");
    }

    #[test]
    fn ore_diamond_is_aliased() {
        let mut payload = Map::new();
        payload.insert("feature".into(), json!("minecraft:ore_diamond"));
        alias_feature(&mut payload);
        assert_eq!(payload["feature"], "minecraft:ore_diamond_small");

        let mut other = Map::new();
        other.insert("feature".into(), json!("minecraft:ore_gold"));
        alias_feature(&mut other);
        assert_eq!(other["feature"], "minecraft:ore_gold");
    }

    #[test]
    fn payload_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = read_payload_file("Biome 'x'", &dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ModError::MissingInputFile { .. }));

        let array = dir.path().join("array.json");
        fs::write(&array, "[1, 2]").unwrap();
        let err = read_payload_file("Biome 'x'", &array).unwrap_err();
        assert!(matches!(err, ModError::InvalidPayload { .. }));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();
        let err = read_payload_file("Biome 'x'", &broken).unwrap_err();
        assert!(matches!(err, ModError::InvalidPayload { .. }));

        let good = dir.path().join("good.json");
        fs::write(&good, r#"{"temperature": 2.0}"#).unwrap();
        let map = read_payload_file("Biome 'x'", &good).unwrap();
        assert_eq!(map["temperature"], 2.0);
    }

    #[test]
    fn inline_payload_is_used_without_file() {
        let mut inline = Map::new();
        inline.insert("a".into(), json!(1));
        assert_eq!(resolve_payload("x", Some(&inline), None).unwrap(), inline);
        assert!(resolve_payload("x", None, None).unwrap().is_empty());
    }
}
