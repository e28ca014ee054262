//! Fabric element categories.
//!
//! Each category is a statically typed body. Factories deserialize the
//! declared fields into an argument struct (unknown fields are rejected), then
//! validate ranges and choices before the [`Element`] is built. Nothing is
//! clamped or coerced: a bad value is reported with the offending field.

use std::any::Any;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::java::extract_class_name;
use crate::diagnostic::ModError;
use crate::element::{Element, ElementBody};
use crate::module::Mod;
use crate::normalize::{
    display_name, normalize_command_literal, normalize_path, split_namespaced,
};

macro_rules! element_body {
    ($ty:ty, $kind:literal, [$($event:literal),*]) => {
        impl ElementBody for $ty {
            fn kind(&self) -> &'static str {
                $kind
            }

            fn event_names(&self) -> &'static [&'static str] {
                &[$($event),*]
            }

            fn properties(&self) -> Map<String, Value> {
                to_properties(self)
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

fn to_properties<T: Serialize>(body: &T) -> Map<String, Value> {
    match serde_json::to_value(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

// =============================================================================
// Field helpers
// =============================================================================

fn parse_args<T: DeserializeOwned>(element: &str, fields: Value) -> Result<T, ModError> {
    let fields = match fields {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(fields).map_err(|e| ModError::InvalidFields {
        element: element.to_string(),
        message: e.to_string(),
    })
}

/// Drops empty strings so `""` behaves like an absent field.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn first_present<'a>(candidates: &[&'a Option<String>]) -> &'a str {
    candidates
        .iter()
        .find_map(|c| c.as_deref().filter(|v| !v.is_empty()))
        .unwrap_or("")
}

fn count(element: &str, field: &str, value: i64, min: i64) -> Result<u32, ModError> {
    if value < min {
        return Err(ModError::invalid_field(
            element,
            field,
            format!("must be at least {min}, got {value}"),
        ));
    }
    u32::try_from(value)
        .map_err(|_| ModError::invalid_field(element, field, format!("{value} is too large")))
}

fn at_least(element: &str, field: &str, value: f64, min: f64) -> Result<f64, ModError> {
    if value.is_finite() && value >= min {
        Ok(value)
    } else {
        Err(ModError::invalid_field(
            element,
            field,
            format!("must be at least {min}, got {value}"),
        ))
    }
}

fn rgb(element: &str, field: &str, value: i64) -> Result<u32, ModError> {
    if (0..=0xFF_FFFF).contains(&value) {
        Ok(value as u32)
    } else {
        Err(ModError::invalid_field(
            element,
            field,
            format!("{value} is not an RGB color (0..=0xFFFFFF)"),
        ))
    }
}

fn tab_reference(value: Option<String>) -> Option<String> {
    present(value)
        .map(|tab| normalize_path(&tab, ""))
        .filter(|tab| !tab.is_empty())
}

fn object_payload(element: &str, payload: Option<Value>) -> Result<Option<Map<String, Value>>, ModError> {
    match payload {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(ModError::invalid_field(
            element,
            "payload",
            "must be a JSON object",
        )),
    }
}

fn at_most_one_payload(
    element: &str,
    payload: &Option<Value>,
    payload_file: &Option<String>,
) -> Result<(), ModError> {
    if payload.is_some() && payload_file.is_some() {
        return Err(ModError::InvalidFields {
            element: element.to_string(),
            message: "provide at most one of `payload` or `payload_file`".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Tab
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TabArgs {
    identifier: Option<String>,
    name: Option<String>,
    icon: Option<String>,
}

/// A creative inventory tab.
#[derive(Debug, Clone, Serialize)]
pub struct Tab {
    pub identifier: String,
    pub display_name: String,
    pub icon: Option<String>,
}

element_body!(Tab, "tab", []);

pub fn tab(_mod: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: TabArgs = parse_args("Tab", fields)?;
    let identifier = normalize_path(first_present(&[&args.identifier, &args.name]), "tab");
    let body = Tab {
        display_name: present(args.name).unwrap_or_else(|| display_name(&identifier)),
        icon: present(args.icon),
        identifier: identifier.clone(),
    };
    Ok(Element::new(&identifier, body))
}

// =============================================================================
// Item
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl Rarity {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "common" => Some(Self::Common),
            "uncommon" => Some(Self::Uncommon),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            _ => None,
        }
    }

    /// Constant name on `net.minecraft.util.Rarity`.
    pub fn java_constant(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Uncommon => "UNCOMMON",
            Self::Rare => "RARE",
            Self::Epic => "EPIC",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemArgs {
    identifier: Option<String>,
    name: Option<String>,
    texture: Option<String>,
    model: Option<String>,
    creative_tab: Option<String>,
    #[serde(default = "default_max_count")]
    max_count: i64,
    durability: Option<i64>,
    #[serde(default)]
    fireproof: bool,
    #[serde(default = "default_rarity")]
    rarity: String,
}

fn default_max_count() -> i64 {
    64
}

fn default_rarity() -> String {
    "common".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub identifier: String,
    pub display_name: String,
    pub texture: Option<String>,
    pub model: Option<String>,
    pub creative_tab: Option<String>,
    pub max_count: u32,
    pub durability: Option<u32>,
    pub fireproof: bool,
    pub rarity: Rarity,
}

element_body!(Item, "item", ["Drop", "Use"]);

pub fn item(_mod: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: ItemArgs = parse_args("Item", fields)?;
    let identifier = normalize_path(first_present(&[&args.identifier, &args.name]), "item");

    let rarity = Rarity::parse(&args.rarity).ok_or_else(|| {
        ModError::invalid_field(
            "Item",
            "rarity",
            format!("unknown rarity '{}' (expected common, uncommon, rare, epic)", args.rarity),
        )
    })?;
    let durability = args
        .durability
        .map(|value| count("Item", "durability", value, 1))
        .transpose()?;

    let body = Item {
        display_name: present(args.name).unwrap_or_else(|| display_name(&identifier)),
        texture: present(args.texture),
        model: present(args.model),
        creative_tab: tab_reference(args.creative_tab),
        max_count: count("Item", "max_count", args.max_count, 1)?,
        durability,
        fireproof: args.fireproof,
        rarity,
        identifier: identifier.clone(),
    };
    Ok(Element::new(&identifier, body))
}

// =============================================================================
// Block
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlockArgs {
    identifier: Option<String>,
    name: Option<String>,
    texture: Option<String>,
    model: Option<String>,
    #[serde(default = "default_hardness")]
    hardness: f64,
    resistance: Option<f64>,
    #[serde(default)]
    luminance: i64,
    #[serde(default)]
    requires_tool: bool,
    creative_tab: Option<String>,
}

fn default_hardness() -> f64 {
    1.5
}

#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub identifier: String,
    pub display_name: String,
    pub texture: Option<String>,
    pub model: Option<String>,
    pub hardness: f64,
    pub resistance: f64,
    pub luminance: u8,
    pub requires_tool: bool,
    pub creative_tab: Option<String>,
}

element_body!(Block, "block", ["Break", "Place"]);

pub fn block(_mod: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: BlockArgs = parse_args("Block", fields)?;
    let identifier = normalize_path(first_present(&[&args.identifier, &args.name]), "block");

    let hardness = at_least("Block", "hardness", args.hardness, 0.0)?;
    let resistance = at_least("Block", "resistance", args.resistance.unwrap_or(hardness), 0.0)?;
    if !(0..=15).contains(&args.luminance) {
        return Err(ModError::invalid_field(
            "Block",
            "luminance",
            format!("must be between 0 and 15, got {}", args.luminance),
        ));
    }

    let body = Block {
        display_name: present(args.name).unwrap_or_else(|| display_name(&identifier)),
        texture: present(args.texture),
        model: present(args.model),
        hardness,
        resistance,
        luminance: args.luminance as u8,
        requires_tool: args.requires_tool,
        creative_tab: tab_reference(args.creative_tab),
        identifier: identifier.clone(),
    };
    Ok(Element::new(&identifier, body))
}

// =============================================================================
// Recipe
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeType {
    Shaped,
    Shapeless,
    Smelting,
    Blasting,
    Smoking,
    CampfireCooking,
}

impl RecipeType {
    const SUPPORTED: &'static str =
        "blasting, campfire_cooking, shaped, shapeless, smelting, smoking";

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "shaped" => Some(Self::Shaped),
            "shapeless" => Some(Self::Shapeless),
            "smelting" => Some(Self::Smelting),
            "blasting" => Some(Self::Blasting),
            "smoking" => Some(Self::Smoking),
            "campfire_cooking" => Some(Self::CampfireCooking),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shaped => "shaped",
            Self::Shapeless => "shapeless",
            Self::Smelting => "smelting",
            Self::Blasting => "blasting",
            Self::Smoking => "smoking",
            Self::CampfireCooking => "campfire_cooking",
        }
    }

    pub fn is_cooking(self) -> bool {
        !matches!(self, Self::Shaped | Self::Shapeless)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeArgs {
    recipe_type: String,
    output: String,
    identifier: Option<String>,
    #[serde(default = "default_one")]
    count: i64,
    #[serde(default)]
    pattern: Vec<String>,
    #[serde(default)]
    key: Map<String, Value>,
    #[serde(default)]
    ingredients: Vec<String>,
    input_item: Option<String>,
    #[serde(default)]
    experience: f64,
    #[serde(default = "default_cooking_time")]
    cooking_time: i64,
}

fn default_one() -> i64 {
    1
}

fn default_cooking_time() -> i64 {
    200
}

#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub identifier: String,
    pub recipe_type: RecipeType,
    pub output: String,
    pub count: u32,
    pub pattern: Vec<String>,
    /// Pattern symbol → item reference, in declaration order.
    #[serde(serialize_with = "serialize_key")]
    pub key: Vec<(String, String)>,
    pub ingredients: Vec<String>,
    pub input_item: Option<String>,
    pub experience: f64,
    pub cooking_time: u32,
}

element_body!(Recipe, "recipe", []);

#[allow(clippy::ptr_arg)]
fn serialize_key<S: serde::Serializer>(
    key: &Vec<(String, String)>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(key.len()))?;
    for (symbol, reference) in key {
        map.serialize_entry(symbol, reference)?;
    }
    map.end()
}

pub fn recipe(_mod: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: RecipeArgs = parse_args("Recipe", fields)?;

    let recipe_type = RecipeType::parse(&args.recipe_type).ok_or_else(|| {
        ModError::invalid_field(
            "Recipe",
            "recipe_type",
            format!(
                "unsupported recipe_type '{}' (supported: {})",
                args.recipe_type,
                RecipeType::SUPPORTED
            ),
        )
    })?;
    if args.output.trim().is_empty() {
        return Err(ModError::invalid_field("Recipe", "output", "must not be empty"));
    }

    let mut key = Vec::with_capacity(args.key.len());
    for (symbol, reference) in args.key {
        match reference {
            Value::String(reference) => key.push((symbol, reference)),
            other => {
                return Err(ModError::invalid_field(
                    "Recipe",
                    "key",
                    format!("entry '{symbol}' must be an item reference string, got {other}"),
                ))
            }
        }
    }

    let input_item = present(args.input_item);
    match recipe_type {
        RecipeType::Shaped if args.pattern.is_empty() || key.is_empty() => {
            return Err(ModError::InvalidFields {
                element: "Recipe".to_string(),
                message: "shaped recipes require `pattern` and `key`".to_string(),
            });
        }
        RecipeType::Shapeless if args.ingredients.is_empty() => {
            return Err(ModError::invalid_field(
                "Recipe",
                "ingredients",
                "shapeless recipes require at least one ingredient",
            ));
        }
        kind if kind.is_cooking() && input_item.is_none() => {
            return Err(ModError::invalid_field(
                "Recipe",
                "input_item",
                format!("{} recipes require `input_item`", kind.as_str()),
            ));
        }
        _ => {}
    }

    let kind = recipe_type.as_str();
    let identifier = match present(args.identifier) {
        Some(identifier) => normalize_path(&identifier, &format!("{kind}_recipe")),
        None => normalize_path(&format!("{kind}_{}", args.output), &format!("{kind}_recipe")),
    };

    let body = Recipe {
        recipe_type,
        output: args.output,
        count: count("Recipe", "count", args.count, 1)?,
        pattern: args.pattern,
        key,
        ingredients: args.ingredients,
        input_item,
        experience: at_least("Recipe", "experience", args.experience, 0.0)?,
        cooking_time: count("Recipe", "cooking_time", args.cooking_time, 1)?,
        identifier: identifier.clone(),
    };
    Ok(Element::new(&identifier, body))
}

// =============================================================================
// Tag
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagRegistry {
    Item,
    Block,
}

impl TagRegistry {
    /// Directory under `tags/`.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Item => "items",
            Self::Block => "blocks",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TagArgs {
    registry: String,
    identifier: String,
    values: Vec<String>,
    #[serde(default)]
    replace: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub registry: TagRegistry,
    pub namespace: String,
    pub identifier: String,
    pub values: Vec<String>,
    pub replace: bool,
}

element_body!(Tag, "tag", []);

pub fn tag(mod_: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: TagArgs = parse_args("Tag", fields)?;
    let registry = match args.registry.trim().to_lowercase().as_str() {
        "item" => TagRegistry::Item,
        "block" => TagRegistry::Block,
        _ => {
            return Err(ModError::invalid_field(
                "Tag",
                "registry",
                format!("must be 'item' or 'block', got '{}'", args.registry),
            ))
        }
    };

    let (namespace, identifier) = split_namespaced(&args.identifier, mod_.mod_id());
    let name = normalize_path(&format!("{namespace}_{identifier}"), "tag");
    let body = Tag {
        registry,
        namespace,
        identifier,
        values: args.values,
        replace: args.replace,
    };
    Ok(Element::new(&name, body))
}

// =============================================================================
// JavaSource
// =============================================================================

/// Lifecycle hook an injected class is initialized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Entrypoint {
    None,
    Main,
    Client,
    Server,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JavaSourceArgs {
    class_name: Option<String>,
    source: Option<String>,
    source_file: Option<String>,
    package: Option<String>,
    #[serde(default = "default_entrypoint")]
    entrypoint: String,
    initialize: Option<String>,
    identifier: Option<String>,
}

fn default_entrypoint() -> String {
    "none".to_string()
}

/// Fallback class name when neither the declaration nor the source names one.
pub const INJECTED_CLASS_FALLBACK: &str = "InjectedJavaSource";

#[derive(Debug, Clone, Serialize)]
pub struct JavaSource {
    pub class_name: String,
    pub source: Option<String>,
    pub source_file: Option<String>,
    pub package: Option<String>,
    pub entrypoint: Entrypoint,
    pub initialize: Option<String>,
}

element_body!(JavaSource, "java_source", []);

pub fn java_source(_mod: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: JavaSourceArgs = parse_args("JavaSource", fields)?;
    let source = present(args.source);
    let source_file = present(args.source_file);
    if source.is_some() == source_file.is_some() {
        return Err(ModError::InvalidFields {
            element: "JavaSource".to_string(),
            message: "provide exactly one of `source` or `source_file`".to_string(),
        });
    }

    let entrypoint = match args.entrypoint.trim().to_lowercase().as_str() {
        "none" => Entrypoint::None,
        "main" => Entrypoint::Main,
        "client" => Entrypoint::Client,
        "server" => Entrypoint::Server,
        _ => {
            return Err(ModError::invalid_field(
                "JavaSource",
                "entrypoint",
                format!(
                    "must be one of none, main, client, server; got '{}'",
                    args.entrypoint
                ),
            ))
        }
    };

    let class_name = present(args.class_name)
        .or_else(|| source.as_deref().and_then(extract_class_name))
        .or_else(|| {
            source_file.as_deref().and_then(|file| {
                Path::new(file)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
        })
        .unwrap_or_else(|| INJECTED_CLASS_FALLBACK.to_string());

    let initialize = match (entrypoint, present(args.initialize)) {
        (Entrypoint::None, initialize) => initialize,
        (_, None) => Some("init".to_string()),
        (_, initialize) => initialize,
    };

    let name = normalize_path(
        present(args.identifier).as_deref().unwrap_or(&class_name),
        "java_source",
    );
    let body = JavaSource {
        class_name,
        source,
        source_file,
        package: present(args.package),
        entrypoint,
        initialize,
    };
    Ok(Element::new(&name, body))
}

// =============================================================================
// Command
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandArgs {
    literal: Option<String>,
    identifier: Option<String>,
    name: Option<String>,
    #[serde(default = "default_permission_level")]
    permission_level: i64,
    response: Option<String>,
}

fn default_permission_level() -> i64 {
    2
}

/// Literal used when a command declares no usable name.
pub const COMMAND_LITERAL_FALLBACK: &str = "modgen";

#[derive(Debug, Clone, Serialize)]
pub struct Command {
    pub identifier: String,
    pub literal: String,
    pub display_name: String,
    pub permission_level: u32,
    pub response: Option<String>,
}

element_body!(Command, "command", ["Execute"]);

pub fn command(_mod: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: CommandArgs = parse_args("Command", fields)?;
    let literal = normalize_command_literal(
        first_present(&[&args.literal, &args.identifier, &args.name]),
        COMMAND_LITERAL_FALLBACK,
    );
    let identifier = normalize_path(first_present(&[&args.identifier]), &literal);

    let body = Command {
        display_name: present(args.name).unwrap_or_else(|| display_name(&identifier)),
        literal,
        permission_level: count("Command", "permission_level", args.permission_level, 0)?,
        response: args.response,
        identifier: identifier.clone(),
    };
    Ok(Element::new(&identifier, body))
}

// =============================================================================
// Entity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpawnGroup {
    Monster,
    Creature,
    Ambient,
    WaterCreature,
    WaterAmbient,
    UndergroundWaterCreature,
    Axolotls,
    Misc,
}

impl SpawnGroup {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "monster" => Some(Self::Monster),
            "creature" => Some(Self::Creature),
            "ambient" => Some(Self::Ambient),
            "water_creature" => Some(Self::WaterCreature),
            "water_ambient" => Some(Self::WaterAmbient),
            "underground_water_creature" => Some(Self::UndergroundWaterCreature),
            "axolotls" => Some(Self::Axolotls),
            "misc" => Some(Self::Misc),
            _ => None,
        }
    }

    /// Constant name on `net.minecraft.entity.SpawnGroup`.
    pub fn java_constant(self) -> &'static str {
        match self {
            Self::Monster => "MONSTER",
            Self::Creature => "CREATURE",
            Self::Ambient => "AMBIENT",
            Self::WaterCreature => "WATER_CREATURE",
            Self::WaterAmbient => "WATER_AMBIENT",
            Self::UndergroundWaterCreature => "UNDERGROUND_WATER_CREATURE",
            Self::Axolotls => "AXOLOTLS",
            Self::Misc => "MISC",
        }
    }
}

/// A spawn egg color as declared: a number or `#rrggbb` / `0xrrggbb` text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorInput {
    Number(i64),
    Text(String),
}

fn parse_color(field: &str, input: Option<ColorInput>) -> Result<Option<u32>, ModError> {
    match input {
        None => Ok(None),
        Some(ColorInput::Number(value)) => rgb("Entity", field, value).map(Some),
        Some(ColorInput::Text(text)) => {
            let lowered = text.trim().to_lowercase();
            let digits = lowered.strip_prefix('#').unwrap_or(&lowered);
            let digits = digits.strip_prefix("0x").unwrap_or(digits);
            let valid = (1..=6).contains(&digits.len())
                && digits.chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(ModError::invalid_field(
                    "Entity",
                    field,
                    format!("invalid RGB color value '{text}'"),
                ));
            }
            u32::from_str_radix(digits, 16)
                .map(Some)
                .map_err(|e| ModError::invalid_field("Entity", field, e.to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityArgs {
    identifier: Option<String>,
    name: Option<String>,
    #[serde(default = "default_spawn_group")]
    spawn_group: String,
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
    #[serde(default = "default_max_health")]
    max_health: f64,
    #[serde(default = "default_movement_speed")]
    movement_speed: f64,
    #[serde(default = "default_attack_damage")]
    attack_damage: f64,
    creative_tab: Option<String>,
    spawn_egg_primary: Option<ColorInput>,
    spawn_egg_secondary: Option<ColorInput>,
    #[serde(default = "default_tracking_range")]
    tracking_range: i64,
    #[serde(default = "default_tracked_update_rate")]
    tracked_update_rate: i64,
    #[serde(default)]
    force_tracked_velocity_updates: bool,
}

fn default_spawn_group() -> String {
    "creature".to_string()
}

fn default_width() -> f64 {
    0.6
}

fn default_height() -> f64 {
    1.95
}

fn default_max_health() -> f64 {
    20.0
}

fn default_movement_speed() -> f64 {
    0.25
}

fn default_attack_damage() -> f64 {
    2.0
}

fn default_tracking_range() -> i64 {
    8
}

fn default_tracked_update_rate() -> i64 {
    3
}

#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub identifier: String,
    pub display_name: String,
    pub spawn_group: SpawnGroup,
    pub width: f64,
    pub height: f64,
    pub max_health: f64,
    pub movement_speed: f64,
    pub attack_damage: f64,
    pub creative_tab: Option<String>,
    pub spawn_egg_primary: Option<u32>,
    pub spawn_egg_secondary: Option<u32>,
    pub tracking_range: u32,
    pub tracked_update_rate: u32,
    pub force_tracked_velocity_updates: bool,
}

impl Entity {
    pub fn has_spawn_egg(&self) -> bool {
        self.spawn_egg_primary.is_some() && self.spawn_egg_secondary.is_some()
    }
}

element_body!(Entity, "entity", ["Spawn", "Death"]);

pub fn entity(_mod: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: EntityArgs = parse_args("Entity", fields)?;
    let identifier = normalize_path(first_present(&[&args.identifier, &args.name]), "entity");

    let spawn_group = SpawnGroup::parse(&args.spawn_group).ok_or_else(|| {
        ModError::invalid_field(
            "Entity",
            "spawn_group",
            format!("unknown spawn group '{}'", args.spawn_group),
        )
    })?;

    let primary = parse_color("spawn_egg_primary", args.spawn_egg_primary)?;
    let secondary = parse_color("spawn_egg_secondary", args.spawn_egg_secondary)?;
    // One color alone colors both layers.
    let (primary, secondary) = (primary.or(secondary), secondary.or(primary));

    let body = Entity {
        display_name: present(args.name).unwrap_or_else(|| display_name(&identifier)),
        spawn_group,
        width: at_least("Entity", "width", args.width, 0.1)?,
        height: at_least("Entity", "height", args.height, 0.1)?,
        max_health: at_least("Entity", "max_health", args.max_health, 1.0)?,
        movement_speed: at_least("Entity", "movement_speed", args.movement_speed, 0.01)?,
        attack_damage: at_least("Entity", "attack_damage", args.attack_damage, 0.0)?,
        creative_tab: tab_reference(args.creative_tab),
        spawn_egg_primary: primary,
        spawn_egg_secondary: secondary,
        tracking_range: count("Entity", "tracking_range", args.tracking_range, 1)?,
        tracked_update_rate: count("Entity", "tracked_update_rate", args.tracked_update_rate, 1)?,
        force_tracked_velocity_updates: args.force_tracked_velocity_updates,
        identifier: identifier.clone(),
    };
    Ok(Element::new(&identifier, body))
}

// =============================================================================
// Biome
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BiomeArgs {
    identifier: Option<String>,
    name: Option<String>,
    namespace: Option<String>,
    payload: Option<Value>,
    payload_file: Option<String>,
    #[serde(default = "default_temperature")]
    temperature: f64,
    #[serde(default = "default_downfall")]
    downfall: f64,
    #[serde(default = "default_true")]
    has_precipitation: bool,
    #[serde(default = "default_sky_color")]
    sky_color: i64,
    #[serde(default = "default_fog_color")]
    fog_color: i64,
    #[serde(default = "default_water_color")]
    water_color: i64,
    #[serde(default = "default_water_fog_color")]
    water_fog_color: i64,
}

fn default_temperature() -> f64 {
    0.8
}

fn default_downfall() -> f64 {
    0.4
}

fn default_true() -> bool {
    true
}

fn default_sky_color() -> i64 {
    7_907_327
}

fn default_fog_color() -> i64 {
    12_638_463
}

fn default_water_color() -> i64 {
    4_159_204
}

fn default_water_fog_color() -> i64 {
    329_011
}

#[derive(Debug, Clone, Serialize)]
pub struct Biome {
    pub identifier: String,
    pub display_name: String,
    pub namespace: String,
    pub payload: Option<Map<String, Value>>,
    pub payload_file: Option<String>,
    pub temperature: f64,
    pub downfall: f64,
    pub has_precipitation: bool,
    pub sky_color: u32,
    pub fog_color: u32,
    pub water_color: u32,
    pub water_fog_color: u32,
}

element_body!(Biome, "biome", []);

fn element_namespace(namespace: Option<String>, mod_id: &str) -> String {
    match present(namespace) {
        Some(namespace) => normalize_path(&namespace, mod_id),
        None => mod_id.to_string(),
    }
}

pub fn biome(mod_: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: BiomeArgs = parse_args("Biome", fields)?;
    at_most_one_payload("Biome", &args.payload, &args.payload_file)?;
    let identifier = normalize_path(first_present(&[&args.identifier, &args.name]), "biome");

    let body = Biome {
        display_name: present(args.name).unwrap_or_else(|| display_name(&identifier)),
        namespace: element_namespace(args.namespace, mod_.mod_id()),
        payload: object_payload("Biome", args.payload)?,
        payload_file: present(args.payload_file),
        temperature: args.temperature,
        downfall: args.downfall,
        has_precipitation: args.has_precipitation,
        sky_color: rgb("Biome", "sky_color", args.sky_color)?,
        fog_color: rgb("Biome", "fog_color", args.fog_color)?,
        water_color: rgb("Biome", "water_color", args.water_color)?,
        water_fog_color: rgb("Biome", "water_fog_color", args.water_fog_color)?,
        identifier: identifier.clone(),
    };
    Ok(Element::new(&identifier, body))
}

// =============================================================================
// Worldgen
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorldgenArgs {
    worldgen_type: Option<String>,
    identifier: String,
    namespace: Option<String>,
    payload: Option<Value>,
    payload_file: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Worldgen {
    pub worldgen_type: String,
    pub identifier: String,
    pub namespace: String,
    pub payload: Option<Map<String, Value>>,
    pub payload_file: Option<String>,
}

element_body!(Worldgen, "worldgen", []);

pub fn worldgen(mod_: &Mod, fields: Value) -> Result<Element, ModError> {
    let args: WorldgenArgs = parse_args("Worldgen", fields)?;
    at_most_one_payload("Worldgen", &args.payload, &args.payload_file)?;

    let worldgen_type = normalize_path(
        args.worldgen_type.as_deref().unwrap_or_default(),
        "placed_feature",
    );
    let identifier = normalize_path(&args.identifier, "worldgen");
    let name = normalize_path(&format!("{worldgen_type}_{identifier}"), "worldgen");

    let body = Worldgen {
        worldgen_type,
        identifier,
        namespace: element_namespace(args.namespace, mod_.mod_id()),
        payload: object_payload("Worldgen", args.payload)?,
        payload_file: present(args.payload_file),
    };
    Ok(Element::new(&name, body))
}
