use modgen_compiler::generators::fabric::FabricGenerator;
use modgen_compiler::{Declaration, GeneratorRegistry};

const RUBY_DEMO: &str = include_str!("../../../demos/ruby_mod.json");

#[test]
fn ruby_demo_declaration_builds() {
    let declaration = Declaration::from_str(RUBY_DEMO).unwrap();
    let mod_ = declaration
        .build(Some(&GeneratorRegistry::with_builtins().unwrap()))
        .unwrap();

    assert_eq!(mod_.mod_id(), "examplemod");
    assert_eq!(mod_.elements().len(), 10);
    assert_eq!(mod_.startup_actions().len(), 1);

    let kinds: Vec<&str> = mod_.elements().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        [
            "tab",
            "item",
            "block",
            "recipe",
            "tag",
            "command",
            "entity",
            "biome",
            "worldgen",
            "java_source"
        ]
    );
    assert_eq!(mod_.elements()[1].events("Drop").len(), 1);
}

#[test]
fn ruby_demo_plans_without_input_files() {
    let declaration = Declaration::from_str(RUBY_DEMO).unwrap();
    let mod_ = declaration
        .build(Some(&GeneratorRegistry::with_builtins().unwrap()))
        .unwrap();

    let project = FabricGenerator::new().plan(&mod_).unwrap();
    let hooks = project
        .text_of("src/main/java/modgen/generated/examplemod/GeneratedInjectedMain.java")
        .unwrap();
    assert!(hooks.contains("ExtraModHooks.init();"));

    // No textures were declared, so none are listed as missing.
    assert!(project.missing_assets().is_empty());
    assert!(project
        .get("src/main/resources/assets/examplemod/modgen_missing_assets.json")
        .is_some());
}
