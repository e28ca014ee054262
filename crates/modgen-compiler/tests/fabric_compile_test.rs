use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use walkdir::WalkDir;

use modgen_compiler::generators::fabric::{FabricGenerator, GENERATOR_KEY};
use modgen_compiler::{Action, GeneratorRegistry, Mod, ModConfig, ModError};

const JAVA_DIR: &str = "src/main/java/modgen/generated/demo_mod";
const ASSETS_DIR: &str = "src/main/resources/assets/demo_mod";
const DATA_DIR: &str = "src/main/resources/data";

fn new_mod() -> Mod {
    let config = ModConfig::new("tester", GENERATOR_KEY)
        .with_mod_id("demo_mod")
        .with_name("Demo Mod");
    Mod::with_registry(config, &GeneratorRegistry::with_builtins().unwrap()).unwrap()
}

/// The ruby demo: one element of every category, events on each
/// event-bearing element and two injected Java hooks.
fn ruby_mod(inputs: &Path) -> Mod {
    let item_texture = inputs.join("ruby.png");
    fs::write(&item_texture, b"PNG").unwrap();
    let block_texture = inputs.join("ruby_block.png");
    fs::write(&block_texture, b"PNG").unwrap();
    let external_hook = inputs.join("ExternalHook.java");
    fs::write(
        &external_hook,
        "public final class ExternalHook {\n    private ExternalHook() {}\n    public static void init() {}\n}",
    )
    .unwrap();

    let mut mod_ = new_mod();

    let tab = mod_
        .element("Tab", json!({"identifier": "core", "name": "Core", "icon": "ruby"}))
        .unwrap();
    let mut item = mod_
        .element(
            "Item",
            json!({
                "identifier": "ruby",
                "name": "Ruby",
                "texture": item_texture.to_str().unwrap(),
                "creative_tab": "core",
            }),
        )
        .unwrap();
    let mut block = mod_
        .element(
            "Block",
            json!({
                "identifier": "ruby_block",
                "name": "Ruby Block",
                "texture": block_texture.to_str().unwrap(),
                "creative_tab": "core",
                "hardness": 4.0,
                "resistance": 5.0,
                "requires_tool": true,
            }),
        )
        .unwrap();
    let recipe = mod_
        .element(
            "Recipe",
            json!({
                "recipe_type": "shaped",
                "identifier": "ruby_block_from_ruby",
                "output": "ruby_block",
                "pattern": ["RRR", "RRR", "RRR"],
                "key": {"R": "ruby"},
            }),
        )
        .unwrap();
    let tag = mod_
        .element(
            "Tag",
            json!({"registry": "item", "identifier": "c:gems/ruby", "values": ["ruby"]}),
        )
        .unwrap();
    let mut command = mod_
        .element(
            "Command",
            json!({"literal": "ruby", "response": "Ruby command executed", "permission_level": 2}),
        )
        .unwrap();
    let mut entity = mod_
        .element(
            "Entity",
            json!({
                "identifier": "ruby_guardian",
                "name": "Ruby Guardian",
                "spawn_group": "monster",
                "max_health": 40.0,
                "movement_speed": 0.3,
                "attack_damage": 7.0,
                "spawn_egg_primary": "#b90f3f",
                "spawn_egg_secondary": "#2c040f",
                "creative_tab": "core",
            }),
        )
        .unwrap();
    let biome = mod_
        .element(
            "Biome",
            json!({
                "identifier": "ruby_wastes",
                "name": "Ruby Wastes",
                "temperature": 2.0,
                "downfall": 0.0,
                "has_precipitation": false,
            }),
        )
        .unwrap();
    let worldgen = mod_
        .element(
            "Worldgen",
            json!({
                "worldgen_type": "placed_feature",
                "identifier": "ruby_ore_patch",
                "payload": {"feature": "minecraft:ore_diamond", "placement": []},
            }),
        )
        .unwrap();
    let inline_java = mod_
        .element(
            "JavaSource",
            json!({
                "class_name": "InlineHook",
                "entrypoint": "main",
                "initialize": "init",
                "source": "public final class InlineHook {\n    private InlineHook() {}\n    public static void init() {}\n}",
            }),
        )
        .unwrap();
    let file_java = mod_
        .element(
            "JavaSource",
            json!({
                "class_name": "ExternalHook",
                "source_file": external_hook.to_str().unwrap(),
                "entrypoint": "client",
                "initialize": "init",
            }),
        )
        .unwrap();

    mod_.on(&mut item, "Drop", || mod_.send_console("say dropped ruby"))
        .unwrap();
    mod_.on(&mut block, "Break", || mod_.send_console("say broke ruby block"))
        .unwrap();
    mod_.on(&mut command, "Execute", || {
        mod_.send_console("say ruby command triggered")
    })
    .unwrap();
    mod_.on(&mut entity, "Spawn", || {
        mod_.send_console("say ruby guardian spawned")
    })
    .unwrap();
    mod_.send_console("say startup");

    for element in [
        tab,
        item,
        block,
        recipe,
        tag,
        command,
        entity,
        biome,
        worldgen,
        inline_java,
        file_java,
    ] {
        mod_.add(element);
    }
    mod_
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap_or_else(|e| panic!("{path}: {e}"))
}

fn read_json(root: &Path, path: &str) -> Value {
    serde_json::from_str(&read(root, path)).unwrap()
}

fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(Result::unwrap)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect()
}

#[test]
fn ruby_demo_generates_full_project() {
    let dir = tempfile::TempDir::new().unwrap();
    let mod_ = ruby_mod(dir.path());
    let root = mod_.compile(dir.path().join("build")).unwrap();

    assert_eq!(root, dir.path().join("build").join("demo_mod-fabric-1.21.11"));

    for path in [
        "gradlew",
        "gradlew.bat",
        "gradle/wrapper/gradle-wrapper.properties",
        "src/main/resources/fabric.mod.json",
        "src/main/resources/assets/demo_mod/models/item/ruby.json",
        "src/main/resources/assets/demo_mod/models/block/ruby_block.json",
        "src/main/resources/assets/demo_mod/models/item/ruby_block.json",
        "src/main/resources/assets/demo_mod/models/item/ruby_guardian_spawn_egg.json",
        "src/main/resources/assets/demo_mod/blockstates/ruby_block.json",
        "src/main/resources/assets/demo_mod/textures/item/ruby.png",
        "src/main/resources/assets/demo_mod/textures/block/ruby_block.png",
        "src/main/resources/data/demo_mod/recipes/ruby_block_from_ruby.json",
        "src/main/resources/data/c/tags/items/gems/ruby.json",
        "src/main/resources/data/demo_mod/loot_tables/blocks/ruby_block.json",
        "src/main/resources/data/demo_mod/loot_table/blocks/ruby_block.json",
        "src/main/resources/data/demo_mod/worldgen/biome/ruby_wastes.json",
        "src/main/resources/data/demo_mod/worldgen/placed_feature/ruby_ore_patch.json",
    ] {
        assert!(root.join(path).is_file(), "missing {path}");
    }

    for class in [
        "InlineHook",
        "ExternalHook",
        "GeneratedCommands",
        "GeneratedEntities",
        "RubyGuardianEntity",
        "DemoModMod",
        "DemoModModClient",
        "GeneratedInjectedMain",
        "GeneratedInjectedClient",
    ] {
        let path = root.join(JAVA_DIR).join(format!("{class}.java"));
        assert!(path.is_file(), "missing {}", path.display());
    }
    assert!(!root.join(JAVA_DIR).join("DemoModModServer.java").exists());

    // Copied textures, so nothing is reported missing.
    assert!(!root.join(ASSETS_DIR).join("modgen_missing_assets.json").exists());
    assert_eq!(
        fs::read(root.join(ASSETS_DIR).join("textures/item/ruby.png")).unwrap(),
        b"PNG"
    );
}

#[test]
fn ruby_demo_file_contents() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = ruby_mod(dir.path()).compile(dir.path().join("build")).unwrap();

    let manifest = read_json(&root, "src/main/resources/data/demo_mod/modgen/manifest.json");
    assert_eq!(manifest["generator"], GENERATOR_KEY);
    assert_eq!(manifest["startup_actions"][0]["command"], "say startup");
    assert_eq!(manifest["generator_details"]["minecraft_version"], "1.21.11");
    let kinds: Vec<&str> = manifest["elements"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|element| element["kind"].as_str())
        .collect();
    for kind in ["command", "entity", "biome", "worldgen", "java_source"] {
        assert!(kinds.contains(&kind), "no {kind} in manifest");
    }

    let commands = read(&root, &format!("{JAVA_DIR}/GeneratedCommands.java"));
    assert!(commands.contains("CommandManager.literal(\"ruby\")"));
    assert!(commands.contains("say ruby command triggered"));
    assert!(commands.contains("Ruby command executed"));

    let events = read(&root, &format!("{JAVA_DIR}/GeneratedEvents.java"));
    assert!(events.contains("say dropped ruby"));
    assert!(events.contains("say broke ruby block"));
    assert!(events.contains("say ruby guardian spawned"));
    assert!(events.contains("say startup"));

    let lang = read_json(&root, &format!("{ASSETS_DIR}/lang/en_us.json"));
    assert_eq!(lang["entity.demo_mod.ruby_guardian"], "Ruby Guardian");
    assert_eq!(lang["item.demo_mod.ruby"], "Ruby");
    assert_eq!(lang["block.demo_mod.ruby_block"], "Ruby Block");
    assert_eq!(lang["itemGroup.demo_mod.core"], "Core");
    assert_eq!(
        lang["item.demo_mod.ruby_guardian_spawn_egg"],
        "Ruby Guardian Spawn Egg"
    );

    let gradlew = read(&root, "gradlew");
    assert!(gradlew.starts_with("#!/"));
    assert!(gradlew.to_lowercase().contains("bootstrap"));
    assert!(gradlew.contains("modgen-wrapper-bootstrap"));
    assert!(gradlew.contains("cd \"$TMP_DIR\""));
    assert!(!gradlew.contains("cd \"$APP_HOME\" && gradle wrapper"));

    assert!(read(&root, "gradle.properties").contains("loom_version=1.13.3"));
    let build = read(&root, "build.gradle");
    assert!(build.contains("id 'fabric-loom' version '1.13.3'"));
    assert!(build.contains("enableModProvidedJavadoc = false"));
    assert!(read(&root, "gradle/wrapper/gradle-wrapper.properties").contains("gradle-9.2.1-bin.zip"));

    let fabric = read_json(&root, "src/main/resources/fabric.mod.json");
    assert_eq!(fabric["id"], "demo_mod");
    assert_eq!(
        fabric["entrypoints"]["main"][0],
        "modgen.generated.demo_mod.DemoModMod"
    );
    assert_eq!(
        fabric["entrypoints"]["client"][0],
        "modgen.generated.demo_mod.DemoModModClient"
    );
    assert!(fabric["entrypoints"].get("server").is_none());

    let biome = read_json(&root, &format!("{DATA_DIR}/demo_mod/worldgen/biome/ruby_wastes.json"));
    for key in ["spawners", "spawn_costs", "features", "carvers"] {
        assert!(biome.get(key).is_some(), "biome lacks {key}");
    }
    assert!(biome.get("spawn_settings").is_none());
    assert!(biome.get("generation_settings").is_none());
    assert_eq!(biome["has_precipitation"], false);
    assert_eq!(biome["temperature"], 2.0);

    let worldgen = read_json(
        &root,
        &format!("{DATA_DIR}/demo_mod/worldgen/placed_feature/ruby_ore_patch.json"),
    );
    assert_eq!(worldgen["feature"], "minecraft:ore_diamond_small");
}

#[test]
fn short_names_resolve_to_local_content() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = ruby_mod(dir.path()).compile(dir.path().join("build")).unwrap();

    let recipe = read_json(
        &root,
        &format!("{DATA_DIR}/demo_mod/recipes/ruby_block_from_ruby.json"),
    );
    assert_eq!(recipe["type"], "minecraft:crafting_shaped");
    assert_eq!(recipe["key"]["R"]["item"], "demo_mod:ruby");
    assert_eq!(recipe["result"]["item"], "demo_mod:ruby_block");

    let tag = read_json(&root, &format!("{DATA_DIR}/c/tags/items/gems/ruby.json"));
    assert_eq!(tag, json!({"replace": false, "values": ["demo_mod:ruby"]}));
}

#[test]
fn injected_sources_get_a_package() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = ruby_mod(dir.path()).compile(dir.path().join("build")).unwrap();

    let inline = read(&root, &format!("{JAVA_DIR}/InlineHook.java"));
    assert!(inline.starts_with("package modgen.generated.demo_mod;"));
    assert!(inline.contains("public static void init()"));

    let main_hooks = read(&root, &format!("{JAVA_DIR}/GeneratedInjectedMain.java"));
    assert!(main_hooks.contains("InlineHook.init();"));
    let client_hooks = read(&root, &format!("{JAVA_DIR}/GeneratedInjectedClient.java"));
    assert!(client_hooks.contains("ExternalHook.init();"));
}

#[test]
fn missing_textures_are_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut mod_ = new_mod();
    let item = mod_
        .element(
            "Item",
            json!({"identifier": "ruby", "texture": "does/not/exist.png"}),
        )
        .unwrap();
    let block = mod_.element("Block", json!({"identifier": "ruby_block"})).unwrap();
    mod_.add(item);
    mod_.add(block);

    let root = mod_.compile(dir.path()).unwrap();
    let assets = root.join(ASSETS_DIR);

    let missing = read_json(&assets, "modgen_missing_assets.json");
    assert_eq!(missing, json!({"missing": ["does/not/exist.png"]}));
    assert_eq!(
        read(&assets, "textures/item/ruby.missing.txt"),
        "Missing texture source: does/not/exist.png\n"
    );
    assert_eq!(
        read(&assets, "textures/block/ruby_block.missing.txt"),
        "Missing texture source: none\n"
    );

    // Generated models stand in for the absent user models.
    let model = read_json(&assets, "models/item/ruby.json");
    assert_eq!(model["parent"], "minecraft:item/generated");
    assert_eq!(model["textures"]["layer0"], "demo_mod:item/ruby");
}

#[test]
fn recompiling_is_byte_identical() {
    let dir = tempfile::TempDir::new().unwrap();
    let mod_ = ruby_mod(dir.path());
    let output = dir.path().join("build");

    let root = mod_.compile(&output).unwrap();
    let first = snapshot(&root);

    fs::write(root.join("stale.txt"), "left over").unwrap();
    let again = mod_.compile(&output).unwrap();
    let second = snapshot(&again);

    assert_eq!(root, again);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn missing_source_file_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut mod_ = new_mod();
    let java = mod_
        .element(
            "JavaSource",
            json!({"source_file": dir.path().join("Nope.java").to_str().unwrap()}),
        )
        .unwrap();
    mod_.add(java);

    let output = dir.path().join("build");
    let err = mod_.compile(&output).unwrap_err();
    assert!(matches!(err, ModError::MissingInputFile { .. }));
    assert!(!output.join(FabricGenerator::root_name("demo_mod")).exists());
}

#[test]
fn missing_payload_file_keeps_previous_tree() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("build");
    let root = new_mod().compile(&output).unwrap();
    let before = snapshot(&root);

    let mut mod_ = new_mod();
    let biome = mod_
        .element(
            "Biome",
            json!({"identifier": "ash", "payload_file": dir.path().join("ash.json").to_str().unwrap()}),
        )
        .unwrap();
    mod_.add(biome);

    let err = mod_.compile(&output).unwrap_err();
    assert!(matches!(err, ModError::MissingInputFile { .. }));
    assert_eq!(snapshot(&root), before);
}

#[test]
fn payload_file_is_used_verbatim() {
    let dir = tempfile::TempDir::new().unwrap();
    let payload = dir.path().join("patch.json");
    fs::write(&payload, r#"{"feature": "minecraft:ore_diamond", "placement": [{"type": "minecraft:count", "count": 4}]}"#)
        .unwrap();

    let mut mod_ = new_mod();
    let worldgen = mod_
        .element(
            "Worldgen",
            json!({"identifier": "patch", "payload_file": payload.to_str().unwrap()}),
        )
        .unwrap();
    mod_.add(worldgen);

    let root = mod_.compile(dir.path().join("build")).unwrap();
    let written = read_json(
        &root,
        &format!("{DATA_DIR}/demo_mod/worldgen/placed_feature/patch.json"),
    );
    assert_eq!(written["feature"], "minecraft:ore_diamond_small");
    assert_eq!(written["placement"][0]["count"], 4);
}

#[test]
fn startup_actions_without_elements() {
    let mod_ = new_mod();
    mod_.send_console("say hello");
    assert_eq!(mod_.startup_actions(), vec![Action::console("say hello")]);

    let project = FabricGenerator::new().plan(&mod_).unwrap();
    let events = project
        .text_of(format!("{JAVA_DIR}/GeneratedEvents.java"))
        .unwrap();
    assert!(events.contains("SERVER_STARTED"));
    assert!(events.contains("say hello"));
}

#[test]
fn empty_initializer_calls_default_init() {
    let mut mod_ = new_mod();
    let hook = mod_
        .element(
            "JavaSource",
            json!({
                "class_name": "Hook",
                "source": "public final class Hook { public static void init() {} }",
                "entrypoint": "main",
                "initialize": ""
            }),
        )
        .unwrap();
    mod_.add(hook);

    let project = FabricGenerator::new().plan(&mod_).unwrap();
    let main = project
        .text_of(format!("{JAVA_DIR}/GeneratedInjectedMain.java"))
        .unwrap();
    assert!(main.contains("Hook.init();"));
    assert!(!main.contains("Hook.();"));
}
