//! Commands and event handlers.
//!
//! Every captured handler becomes one Fabric callback registration that runs
//! the handler's console commands through the server command manager.
//! Handlers that captured no console commands are skipped.

use super::{java_string, string_args, JavaClass};
use crate::capture::{console_commands, ActionList};
use crate::element::Element;
use crate::generators::fabric::FabricContext;

/// `CommandManager` permission check for a numeric level.
fn permission_check(level: u32) -> &'static str {
    match level {
        0 => "ALWAYS_PASS_CHECK",
        1 | 3 => "GAMEMASTERS_CHECK",
        2 => "MODERATORS_CHECK",
        4 => "ADMINS_CHECK",
        _ => "OWNERS_CHECK",
    }
}

/// Console commands of each handler registered for `event`, skipping empty ones.
fn handler_commands<'e>(element: &'e Element, event: &str) -> impl Iterator<Item = Vec<String>> + 'e {
    element
        .events(event)
        .iter()
        .map(|handler: &ActionList| console_commands(handler))
        .filter(|commands| !commands.is_empty())
}

pub(super) fn commands_class(ctx: &FabricContext) -> JavaClass {
    let mut body = Vec::new();

    for (element, command) in &ctx.elements.commands {
        let execute: Vec<String> = element
            .events("Execute")
            .iter()
            .flat_map(|handler| console_commands(handler))
            .collect();

        let mut executes = vec!["ServerCommandSource source = context.getSource();".to_string()];
        if !execute.is_empty() {
            executes.push(format!("executeCommands(source, {});", string_args(&execute)));
        }
        if let Some(response) = command.response.as_deref().filter(|r| !r.trim().is_empty()) {
            executes.push(format!(
                "source.sendFeedback(() -> Text.literal({}), false);",
                java_string(response)
            ));
        }
        executes.push("return 1;".to_string());

        let mut statement = String::from(
            "CommandRegistrationCallback.EVENT.register((dispatcher, registryAccess, environment) ->\n",
        );
        statement.push_str(&format!(
            "    dispatcher.register(CommandManager.literal({})\n",
            java_string(&command.literal)
        ));
        statement.push_str(&format!(
            "        .requires(CommandManager.requirePermissionLevel(CommandManager.{}))\n",
            permission_check(command.permission_level)
        ));
        statement.push_str("        .executes(context -> {\n");
        for line in &executes {
            statement.push_str(&format!("            {line}\n"));
        }
        statement.push_str("        })\n    )\n);");
        body.push(statement);
    }

    if body.is_empty() {
        body.push("// No generated commands.".to_string());
    }
    body.push(format!(
        "{}.LOGGER.info({});",
        ctx.symbols.main_class(),
        java_string(&format!(
            "Registered {} generated command(s)",
            ctx.elements.commands.len()
        ))
    ));

    JavaClass::new(ctx.symbols.package(), "public final class GeneratedCommands")
        .imports([
            "net.fabricmc.fabric.api.command.v2.CommandRegistrationCallback",
            "net.minecraft.server.command.CommandManager",
            "net.minecraft.server.command.ServerCommandSource",
            "net.minecraft.text.Text",
        ])
        .private_constructor("GeneratedCommands")
        .method(
            "private static void executeCommands(ServerCommandSource source, String... commands)",
            &[
                "if (source == null || source.getServer() == null || commands == null) {\n    return;\n}"
                    .to_string(),
                "for (String command : commands) {\n    \
                 if (command == null || command.isBlank()) {\n        \
                 continue;\n    \
                 }\n    \
                 source.getServer().getCommandManager().parseAndExecute(source, command);\n\
                 }"
                .to_string(),
            ],
        )
        .method("public static void register()", &body)
}

/// Runs `args` when `condition` holds inside a callback.
fn guarded(opening: &str, condition: &str, server: &str, args: &str, tail: &[&str]) -> String {
    let mut text = format!("{opening}\n");
    text.push_str(&format!("    if ({condition}) {{\n"));
    text.push_str(&format!("        executeCommands({server}, {args});\n"));
    text.push_str("    }\n");
    for line in tail {
        text.push_str(&format!("    {line}\n"));
    }
    text.push_str("});");
    text
}

pub(super) fn events_class(ctx: &FabricContext) -> JavaClass {
    let symbols = &ctx.symbols;
    let mut handlers = Vec::new();

    for (element, _) in &ctx.elements.items {
        let constant = symbols.constant(element.name());
        for commands in handler_commands(element, "Drop") {
            handlers.push(format!(
                "ServerEntityEvents.ENTITY_LOAD.register((entity, world) -> {{\n    \
                 if (!(entity instanceof ItemEntity itemEntity)) {{\n        \
                 return;\n    \
                 }}\n    \
                 if (itemEntity.getStack().isOf(GeneratedItems.{constant})) {{\n        \
                 executeCommands(world.getServer(), {});\n    \
                 }}\n\
                 }});",
                string_args(&commands)
            ));
        }
        for commands in handler_commands(element, "Use") {
            handlers.push(guarded(
                "UseItemCallback.EVENT.register((player, world, hand) -> {\n    \
                 ItemStack stack = player.getStackInHand(hand);",
                &format!("stack.isOf(GeneratedItems.{constant})"),
                "world.getServer()",
                &string_args(&commands),
                &["return ActionResult.PASS;"],
            ));
        }
    }

    for (element, _) in &ctx.elements.blocks {
        let constant = symbols.constant(element.name());
        let item_constant = symbols.block_item_constant(element.name());
        for commands in handler_commands(element, "Break") {
            handlers.push(guarded(
                "PlayerBlockBreakEvents.AFTER.register((world, player, pos, state, blockEntity) -> {",
                &format!("state.isOf(GeneratedBlocks.{constant})"),
                "world.getServer()",
                &string_args(&commands),
                &[],
            ));
        }
        for commands in handler_commands(element, "Place") {
            handlers.push(guarded(
                "UseBlockCallback.EVENT.register((player, world, hand, hitResult) -> {\n    \
                 ItemStack stack = player.getStackInHand(hand);",
                &format!("stack.isOf(GeneratedBlocks.{item_constant})"),
                "world.getServer()",
                &string_args(&commands),
                &["return ActionResult.PASS;"],
            ));
        }
    }

    for (element, _) in &ctx.elements.entities {
        let condition = format!(
            "entityInstance.getType().equals(GeneratedEntities.{})",
            symbols.constant(element.name())
        );
        for commands in handler_commands(element, "Spawn") {
            handlers.push(guarded(
                "ServerEntityEvents.ENTITY_LOAD.register((entityInstance, world) -> {",
                &condition,
                "world.getServer()",
                &string_args(&commands),
                &[],
            ));
        }
        for commands in handler_commands(element, "Death") {
            handlers.push(guarded(
                "ServerLivingEntityEvents.AFTER_DEATH.register((entityInstance, damageSource) -> {",
                &condition,
                "entityInstance.getServer()",
                &string_args(&commands),
                &[],
            ));
        }
    }

    let handler_count = handlers.len();
    let mut body = Vec::new();
    if !ctx.startup_commands.is_empty() {
        body.push(format!(
            "ServerLifecycleEvents.SERVER_STARTED.register(server -> {{\n    \
             executeCommands(server, {});\n\
             }});",
            string_args(&ctx.startup_commands)
        ));
    }
    if handlers.is_empty() {
        body.push("// No generated element events.".to_string());
    }
    body.extend(handlers);
    body.push(format!(
        "{}.LOGGER.info({});",
        symbols.main_class(),
        java_string(&format!("Loaded {handler_count} generated event handler(s)"))
    ));

    JavaClass::new(symbols.package(), "public final class GeneratedEvents")
        .imports([
            "net.fabricmc.fabric.api.entity.event.v1.ServerLivingEntityEvents",
            "net.fabricmc.fabric.api.event.lifecycle.v1.ServerEntityEvents",
            "net.fabricmc.fabric.api.event.lifecycle.v1.ServerLifecycleEvents",
            "net.fabricmc.fabric.api.event.player.PlayerBlockBreakEvents",
            "net.fabricmc.fabric.api.event.player.UseBlockCallback",
            "net.fabricmc.fabric.api.event.player.UseItemCallback",
            "net.minecraft.entity.ItemEntity",
            "net.minecraft.item.ItemStack",
            "net.minecraft.server.MinecraftServer",
            "net.minecraft.util.ActionResult",
        ])
        .private_constructor("GeneratedEvents")
        .method(
            "private static void executeCommands(MinecraftServer server, String... commands)",
            &[
                "if (server == null || commands == null) {\n    return;\n}".to_string(),
                "for (String command : commands) {\n    \
                 if (command == null || command.isBlank()) {\n        \
                 continue;\n    \
                 }\n    \
                 server.getCommandManager().parseAndExecute(server.getCommandSource(), command);\n\
                 }"
                .to_string(),
            ],
        )
        .method("public static void register()", &body)
}
