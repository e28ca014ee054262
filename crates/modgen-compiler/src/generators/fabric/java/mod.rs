//! Java source emission.
//!
//! Generated classes are assembled with [`JavaClass`]: package, imports, a
//! declaration line and an ordered list of members, rendered in one pass.
//! Symbol names come from [`SymbolTable`](super::symbols::SymbolTable); this
//! module only arranges text.

mod events;
mod injected;
mod registries;

use std::sync::LazyLock;

use regex::Regex;

use super::project::GeneratedProject;
use super::FabricContext;

pub use injected::InjectedHooks;
pub(crate) use injected::injected_sources;

/// Writes every generated class into the mod's package directory.
pub(crate) fn emit(project: &mut GeneratedProject, ctx: &FabricContext, hooks: &InjectedHooks) {
    let dir = ctx.symbols.package_dir();
    let mut write = |name: &str, class: JavaClass| {
        project.text(dir.join(format!("{name}.java")), class.render());
    };

    for (element, entity) in &ctx.elements.entities {
        let class_name = ctx.symbols.entity_class(element.name());
        let class = registries::entity_class(ctx, &class_name, entity);
        write(&class_name, class);
    }
    write("GeneratedEntities", registries::entities_class(ctx));

    for (name, class) in injected::entrypoint_classes(ctx, hooks) {
        write(&name, class);
    }
    write("GeneratedItems", registries::items_class(ctx));
    write("GeneratedBlocks", registries::blocks_class(ctx));
    write("GeneratedCommands", events::commands_class(ctx));
    write("GeneratedItemGroups", registries::item_groups_class(ctx));
    write("GeneratedEvents", events::events_class(ctx));

    for (name, list) in [
        ("GeneratedInjectedMain", &hooks.main),
        ("GeneratedInjectedClient", &hooks.client),
        ("GeneratedInjectedServer", &hooks.server),
    ] {
        write(name, injected::hook_class(ctx, name, list));
    }
}

static PACKAGE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*package\s+([a-zA-Z_][\w.]*)\s*;").expect("valid regex")
});
static TYPE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:class|interface|enum)\s+([A-Za-z_]\w*)\b").expect("valid regex")
});

/// Package named by the first `package x.y;` line, if any.
pub fn extract_package(source: &str) -> Option<String> {
    PACKAGE_DECLARATION
        .captures(source)
        .map(|caps| caps[1].to_string())
}

/// Name of the first class, interface or enum declared in `source`.
pub fn extract_class_name(source: &str) -> Option<String> {
    TYPE_DECLARATION
        .captures(source)
        .map(|caps| caps[1].to_string())
}

/// Quotes `value` as a Java string literal.
pub fn java_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Comma-separated string literals, as passed to a varargs helper.
pub fn string_args(values: &[String]) -> String {
    values
        .iter()
        .map(|value| java_string(value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Indents every non-empty line of `text` by `spaces`.
pub fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Java compilation unit with a single top-level type.
#[derive(Debug, Clone)]
pub struct JavaClass {
    package: String,
    imports: Vec<String>,
    declaration: String,
    members: Vec<String>,
}

impl JavaClass {
    /// `declaration` is the type header without the opening brace, e.g.
    /// `public final class GeneratedItems`.
    pub fn new(package: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: Vec::new(),
            declaration: declaration.into(),
            members: Vec::new(),
        }
    }

    pub fn import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(path.into());
        self
    }

    pub fn imports<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds a member verbatim. Multi-line members are indented as a unit.
    pub fn member(mut self, text: impl Into<String>) -> Self {
        self.members.push(text.into());
        self
    }

    /// Adds a block of consecutive lines (typically field declarations), or
    /// `placeholder` as a comment when there are none.
    pub fn lines(self, lines: &[String], placeholder: &str) -> Self {
        if lines.is_empty() {
            self.member(format!("// {placeholder}"))
        } else {
            self.member(lines.join("\n"))
        }
    }

    /// Adds `private Name() {}` for static holder classes.
    pub fn private_constructor(self, name: &str) -> Self {
        self.member(format!("private {name}() {{}}"))
    }

    /// Adds a method whose body is made of statements, each possibly spanning
    /// several lines.
    pub fn method(self, signature: &str, body: &[String]) -> Self {
        let mut text = format!("{signature} {{\n");
        for statement in body {
            text.push_str(&indent(statement, 4));
            text.push('\n');
        }
        text.push('}');
        self.member(text)
    }

    pub fn render(&self) -> String {
        let mut out = format!("package {};\n\n", self.package);
        if !self.imports.is_empty() {
            for import in &self.imports {
                out.push_str(&format!("import {import};\n"));
            }
            out.push('\n');
        }

        out.push_str(&format!("{} {{\n", self.declaration));
        let members: Vec<String> = self.members.iter().map(|m| indent(m, 4)).collect();
        out.push_str(&members.join("\n\n"));
        if !members.is_empty() {
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_declarations() {
        let source = "  package com.example.hooks ;\n\npublic final class Hook {}\n";
        assert_eq!(extract_package(source).as_deref(), Some("com.example.hooks"));
        assert_eq!(extract_class_name(source).as_deref(), Some("Hook"));

        assert_eq!(extract_package("class X {}"), None);
        assert_eq!(extract_class_name("public enum Mode { A }").as_deref(), Some("Mode"));
        assert_eq!(extract_class_name("// nothing here"), None);
    }

    #[test]
    fn test_java_string_escapes() {
        assert_eq!(java_string(r#"say "hi" \o/"#), r#""say \"hi\" \\o/""#);
        assert_eq!(
            string_args(&["a".to_string(), "b".to_string()]),
            r#""a", "b""#
        );
    }

    #[test]
    fn test_render_class() {
        let class = JavaClass::new("demo.pkg", "public final class Holder")
            .import("java.util.List")
            .private_constructor("Holder")
            .lines(&[], "No fields.")
            .method(
                "public static void register()",
                &["if (true) {\n    run();\n}".to_string()],
            );

        let expected = "package demo.pkg;\n\
            \n\
            import java.util.List;\n\
            \n\
            public final class Holder {\n    \
            private Holder() {}\n\
            \n    \
            // No fields.\n\
            \n    \
            public static void register() {\n        \
            if (true) {\n            \
            run();\n        \
            }\n    \
            }\n\
            }\n";
        assert_eq!(class.render(), expected);
    }
}
