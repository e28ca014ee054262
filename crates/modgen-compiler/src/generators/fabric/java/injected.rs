//! User-supplied Java sources and the entrypoint classes that call into them.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{extract_package, java_string, JavaClass};
use crate::diagnostic::ModError;
use crate::generators::fabric::elements::Entrypoint;
use crate::generators::fabric::project::GeneratedProject;
use crate::generators::fabric::symbols::package_path;
use crate::generators::fabric::FabricContext;

/// A static initializer method on an injected class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    /// Fully qualified class name.
    pub fqcn: String,
    pub method: String,
}

impl Hook {
    fn simple_name(&self) -> &str {
        self.fqcn.rsplit('.').next().unwrap_or(&self.fqcn)
    }
}

/// Hooks grouped by entrypoint, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct InjectedHooks {
    pub main: Vec<Hook>,
    pub client: Vec<Hook>,
    pub server: Vec<Hook>,
}

impl InjectedHooks {
    pub fn has_client(&self) -> bool {
        !self.client.is_empty()
    }

    pub fn has_server(&self) -> bool {
        !self.server.is_empty()
    }
}

/// Copies every `JavaSource` into the project and collects its hooks.
///
/// Fails with [`ModError::MissingInputFile`] when a `source_file` does not
/// exist.
pub(crate) fn injected_sources(
    project: &mut GeneratedProject,
    ctx: &FabricContext,
) -> Result<InjectedHooks, ModError> {
    let mut hooks = InjectedHooks::default();

    for (element, java) in &ctx.elements.java_sources {
        let text = match (&java.source, &java.source_file) {
            (Some(source), _) => source.clone(),
            (None, Some(file)) => read_source(Path::new(file))?,
            (None, None) => {
                return Err(ModError::InvalidFields {
                    element: "JavaSource".to_string(),
                    message: format!("'{}' has neither `source` nor `source_file`", element.name()),
                })
            }
        };

        let declared = extract_package(&text);
        let package = java
            .package
            .clone()
            .or_else(|| declared.clone())
            .unwrap_or_else(|| ctx.symbols.package().to_string());
        let text = if declared.is_some() {
            text
        } else {
            format!("package {package};\n\n{text}")
        };

        let target = package_path(&package).join(format!("{}.java", java.class_name));
        debug!(class = %java.class_name, path = %target.display(), "injecting Java source");
        project.text(target, text);

        let Some(method) = java.initialize.clone() else {
            continue;
        };
        let hook = Hook {
            fqcn: format!("{package}.{}", java.class_name),
            method,
        };
        match java.entrypoint {
            Entrypoint::Main => hooks.main.push(hook),
            Entrypoint::Client => hooks.client.push(hook),
            Entrypoint::Server => hooks.server.push(hook),
            Entrypoint::None => {}
        }
    }

    Ok(hooks)
}

fn read_source(path: &Path) -> Result<String, ModError> {
    if !path.is_file() {
        return Err(ModError::MissingInputFile {
            label: "Java source".to_string(),
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|e| ModError::io(path, e))
}

/// `GeneratedInjectedMain` and friends: one static call per hook.
pub(super) fn hook_class(ctx: &FabricContext, name: &str, hooks: &[Hook]) -> JavaClass {
    let mut calls: Vec<String> = hooks
        .iter()
        .map(|hook| format!("{}.{}();", hook.simple_name(), hook.method))
        .collect();
    if calls.is_empty() {
        calls.push("// No generated JavaSource hooks.".to_string());
    }

    JavaClass::new(ctx.symbols.package(), format!("public final class {name}"))
        .imports(hooks.iter().map(|hook| hook.fqcn.clone()))
        .private_constructor(name)
        .method("public static void register()", &calls)
}

/// The `ModInitializer` plus client and server initializers when they have
/// hooks to run.
pub(super) fn entrypoint_classes(ctx: &FabricContext, hooks: &InjectedHooks) -> Vec<(String, JavaClass)> {
    let symbols = &ctx.symbols;
    let main = symbols.main_class();

    let mut classes = vec![(
        main.to_string(),
        JavaClass::new(
            symbols.package(),
            format!("public final class {main} implements ModInitializer"),
        )
        .imports([
            "net.fabricmc.api.ModInitializer",
            "org.slf4j.Logger",
            "org.slf4j.LoggerFactory",
        ])
        .member(format!(
            "public static final String MOD_ID = {};\n\
             public static final Logger LOGGER = LoggerFactory.getLogger(MOD_ID);",
            java_string(ctx.mod_id())
        ))
        .method(
            "@Override\npublic void onInitialize()",
            &[
                format!(
                    "LOGGER.info({});",
                    java_string(&format!("Initializing {}", ctx.mod_.name()))
                ),
                "GeneratedItems.register();".to_string(),
                "GeneratedBlocks.register();".to_string(),
                "GeneratedEntities.register();".to_string(),
                "GeneratedCommands.register();".to_string(),
                "GeneratedItemGroups.register();".to_string(),
                "GeneratedItemGroups.registerEntries();".to_string(),
                "GeneratedEvents.register();".to_string(),
                "GeneratedInjectedMain.register();".to_string(),
            ],
        ),
    )];

    if hooks.has_client() {
        let name = symbols.client_class();
        let class = JavaClass::new(
            symbols.package(),
            format!("public final class {name} implements ClientModInitializer"),
        )
        .import("net.fabricmc.api.ClientModInitializer")
        .method(
            "@Override\npublic void onInitializeClient()",
            &["GeneratedInjectedClient.register();".to_string()],
        );
        classes.push((name, class));
    }

    if hooks.has_server() {
        let name = symbols.server_class();
        let class = JavaClass::new(
            symbols.package(),
            format!("public final class {name} implements DedicatedServerModInitializer"),
        )
        .import("net.fabricmc.api.DedicatedServerModInitializer")
        .method(
            "@Override\npublic void onInitializeServer()",
            &["GeneratedInjectedServer.register();".to_string()],
        );
        classes.push((name, class));
    }

    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_simple_name() {
        let hook = Hook {
            fqcn: "com.example.hooks.ServerHook".to_string(),
            method: "init".to_string(),
        };
        assert_eq!(hook.simple_name(), "ServerHook");

        let bare = Hook {
            fqcn: "Bare".to_string(),
            method: "init".to_string(),
        };
        assert_eq!(bare.simple_name(), "Bare");
    }

    #[test]
    fn missing_source_file() {
        let err = read_source(Path::new("/definitely/not/here/Hook.java")).unwrap_err();
        assert!(matches!(err, ModError::MissingInputFile { .. }));
    }
}
