//! `fabric.mod.json` and the generated manifest.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::java::InjectedHooks;
use super::project::GeneratedProject;
use super::{FabricContext, FABRIC_API_VERSION, LOADER_VERSION, MINECRAFT_VERSION, RESOURCES_DIR};
use crate::diagnostic::ModError;
use crate::module::Manifest;

/// Platform versions recorded alongside the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratorDetails {
    pub minecraft_version: &'static str,
    pub loader_version: &'static str,
    pub fabric_api_version: &'static str,
}

#[derive(Debug, Serialize)]
struct FabricManifest {
    #[serde(flatten)]
    manifest: Manifest,
    generator_details: GeneratorDetails,
}

pub(crate) fn emit(
    project: &mut GeneratedProject,
    ctx: &FabricContext,
    hooks: &InjectedHooks,
) -> Result<(), ModError> {
    project.json(
        format!("{RESOURCES_DIR}/fabric.mod.json"),
        &fabric_mod_json(ctx, hooks),
    )?;

    let manifest = FabricManifest {
        manifest: ctx.mod_.to_manifest(),
        generator_details: GeneratorDetails {
            minecraft_version: MINECRAFT_VERSION,
            loader_version: LOADER_VERSION,
            fabric_api_version: FABRIC_API_VERSION,
        },
    };
    project.json(
        format!("{RESOURCES_DIR}/data/{}/modgen/manifest.json", ctx.mod_id()),
        &manifest,
    )
}

fn fabric_mod_json(ctx: &FabricContext, hooks: &InjectedHooks) -> Value {
    let symbols = &ctx.symbols;
    let qualified = |class: &str| json!([format!("{}.{class}", symbols.package())]);

    let mut entrypoints = Map::new();
    entrypoints.insert("main".into(), qualified(symbols.main_class()));
    if hooks.has_client() {
        entrypoints.insert("client".into(), qualified(&symbols.client_class()));
    }
    if hooks.has_server() {
        entrypoints.insert("server".into(), qualified(&symbols.server_class()));
    }

    let mod_ = ctx.mod_;
    json!({
        "schemaVersion": 1,
        "id": mod_.mod_id(),
        "version": "${version}",
        "name": mod_.name(),
        "description": "Generated by ModGen",
        "authors": [mod_.author()],
        "license": "MIT",
        "environment": "*",
        "entrypoints": entrypoints,
        "depends": {
            "fabricloader": format!(">={LOADER_VERSION}"),
            "minecraft": format!("~{MINECRAFT_VERSION}"),
            "fabric-api": "*",
        },
    })
}
