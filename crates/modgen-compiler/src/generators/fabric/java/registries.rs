//! Registry holder classes: items, blocks, entities and creative tabs.

use std::collections::BTreeMap;

use super::{java_string, JavaClass};
use crate::generators::fabric::elements::Entity;
use crate::generators::fabric::resolve::{resolve_icon, IconSource};
use crate::generators::fabric::FabricContext;

const REGISTRY_IMPORTS: [&str; 4] = [
    "net.minecraft.registry.RegistryKey",
    "net.minecraft.registry.RegistryKeys",
    "net.minecraft.registry.Registries",
    "net.minecraft.registry.Registry",
];

fn registry_key(ctx: &FabricContext, ty: &str, registry: &str, constant: &str, path: &str) -> String {
    format!(
        "public static final RegistryKey<{ty}> {constant} = RegistryKey.of(RegistryKeys.{registry}, Identifier.of({}.MOD_ID, {}));",
        ctx.symbols.main_class(),
        java_string(path)
    )
}

fn logged(ctx: &FabricContext, message: String) -> String {
    format!("{}.LOGGER.info({});", ctx.symbols.main_class(), java_string(&message))
}

fn holder(ctx: &FabricContext, name: &str) -> JavaClass {
    JavaClass::new(ctx.symbols.package(), format!("public final class {name}"))
}

pub(super) fn items_class(ctx: &FabricContext) -> JavaClass {
    let symbols = &ctx.symbols;
    let mut fields = Vec::new();

    for (element, item) in &ctx.elements.items {
        let constant = symbols.constant(element.name());
        let key = symbols.key_constant(element.name());

        let mut settings = format!("new Item.Settings().registryKey({key})");
        match item.durability {
            Some(durability) => settings.push_str(&format!(".maxDamage({durability})")),
            None => settings.push_str(&format!(".maxCount({})", item.max_count)),
        }
        if item.fireproof {
            settings.push_str(".fireproof()");
        }
        settings.push_str(&format!(".rarity(Rarity.{})", item.rarity.java_constant()));

        fields.push(registry_key(ctx, "Item", "ITEM", &key, element.name()));
        fields.push(format!(
            "public static final Item {constant} = Registry.register(Registries.ITEM, {key}, new Item({settings}));"
        ));
    }

    holder(ctx, "GeneratedItems")
        .imports(["net.minecraft.item.Item", "net.minecraft.util.Rarity"])
        .imports(REGISTRY_IMPORTS)
        .import("net.minecraft.util.Identifier")
        .private_constructor("GeneratedItems")
        .lines(&fields, "No generated items.")
        .method(
            "public static void register()",
            &[logged(
                ctx,
                format!("Registered {} generated item(s)", ctx.elements.items.len()),
            )],
        )
}

pub(super) fn blocks_class(ctx: &FabricContext) -> JavaClass {
    let symbols = &ctx.symbols;
    let mut fields = Vec::new();

    for (element, block) in &ctx.elements.blocks {
        let name = element.name();
        let constant = symbols.constant(name);
        let key = symbols.key_constant(name);
        let item_constant = symbols.block_item_constant(name);
        let item_key = symbols.block_item_key_constant(name);

        let mut settings = format!(
            "AbstractBlock.Settings.create().registryKey({key}).strength({:.2}f, {:.2}f)",
            block.hardness, block.resistance
        );
        if block.luminance > 0 {
            settings.push_str(&format!(".luminance(state -> {})", block.luminance));
        }
        if block.requires_tool {
            settings.push_str(".requiresTool()");
        }

        fields.push(registry_key(ctx, "Block", "BLOCK", &key, name));
        fields.push(format!(
            "public static final Block {constant} = Registry.register(Registries.BLOCK, {key}, new Block({settings}));"
        ));
        fields.push(registry_key(ctx, "Item", "ITEM", &item_key, name));
        fields.push(format!(
            "public static final Item {item_constant} = Registry.register(Registries.ITEM, {item_key}, new BlockItem({constant}, new Item.Settings().registryKey({item_key})));"
        ));
    }

    holder(ctx, "GeneratedBlocks")
        .imports([
            "net.minecraft.block.AbstractBlock",
            "net.minecraft.block.Block",
            "net.minecraft.item.BlockItem",
            "net.minecraft.item.Item",
        ])
        .imports(REGISTRY_IMPORTS)
        .import("net.minecraft.util.Identifier")
        .private_constructor("GeneratedBlocks")
        .lines(&fields, "No generated blocks.")
        .method(
            "public static void register()",
            &[logged(
                ctx,
                format!("Registered {} generated block(s)", ctx.elements.blocks.len()),
            )],
        )
}

/// The `PathAwareEntity` subclass backing one entity type.
pub(super) fn entity_class(ctx: &FabricContext, class_name: &str, entity: &Entity) -> JavaClass {
    let attributes = format!(
        "return MobEntity.createMobAttributes()\n    \
         .add(EntityAttributes.MAX_HEALTH, {:.2}D)\n    \
         .add(EntityAttributes.MOVEMENT_SPEED, {:.4}D)\n    \
         .add(EntityAttributes.ATTACK_DAMAGE, {:.2}D);",
        entity.max_health, entity.movement_speed, entity.attack_damage
    );

    JavaClass::new(
        ctx.symbols.package(),
        format!("public final class {class_name} extends PathAwareEntity"),
    )
    .imports([
        "net.minecraft.entity.EntityType",
        "net.minecraft.entity.attribute.DefaultAttributeContainer",
        "net.minecraft.entity.attribute.EntityAttributes",
        "net.minecraft.entity.mob.MobEntity",
        "net.minecraft.entity.mob.PathAwareEntity",
        "net.minecraft.world.World",
    ])
    .method(
        &format!(
            "public {class_name}(EntityType<? extends PathAwareEntity> entityType, World world)"
        ),
        &["super(entityType, world);".to_string()],
    )
    .method(
        "public static DefaultAttributeContainer.Builder createAttributes()",
        &[attributes],
    )
}

pub(super) fn entities_class(ctx: &FabricContext) -> JavaClass {
    let symbols = &ctx.symbols;
    let mut fields = Vec::new();
    let mut register = Vec::new();

    for (element, entity) in &ctx.elements.entities {
        let name = element.name();
        let constant = symbols.constant(name);
        let key = symbols.key_constant(name);
        let class_name = symbols.entity_class(name);

        let mut builder = format!(
            "FabricEntityTypeBuilder.create(SpawnGroup.{}, {class_name}::new)\
             .dimensions(EntityDimensions.fixed({:.2}f, {:.2}f))\
             .trackRangeBlocks({})\
             .trackedUpdateRate({})",
            entity.spawn_group.java_constant(),
            entity.width,
            entity.height,
            entity.tracking_range,
            entity.tracked_update_rate
        );
        if entity.force_tracked_velocity_updates {
            builder.push_str(".forceTrackedVelocityUpdates(true)");
        }
        builder.push_str(&format!(".build({key})"));

        fields.push(registry_key(ctx, "EntityType<?>", "ENTITY_TYPE", &key, name));
        fields.push(format!(
            "public static final EntityType<{class_name}> {constant} = Registry.register(Registries.ENTITY_TYPE, {key}, {builder});"
        ));

        if symbols.has_spawn_egg(name) {
            let egg = symbols.spawn_egg_constant(name);
            let egg_key = format!("{egg}_KEY");
            fields.push(registry_key(
                ctx,
                "Item",
                "ITEM",
                &egg_key,
                &format!("{name}_spawn_egg"),
            ));
            fields.push(format!(
                "public static final Item {egg} = Registry.register(Registries.ITEM, {egg_key}, new SpawnEggItem(new Item.Settings().registryKey({egg_key}).spawnEgg({constant})));"
            ));
        }

        register.push(format!(
            "FabricDefaultAttributeRegistry.register({constant}, {class_name}.createAttributes());"
        ));
    }

    if register.is_empty() {
        register.push("// No entity attributes to register.".to_string());
    }
    register.push(logged(
        ctx,
        format!(
            "Registered {} generated entity type(s)",
            ctx.elements.entities.len()
        ),
    ));

    holder(ctx, "GeneratedEntities")
        .imports([
            "net.fabricmc.fabric.api.object.builder.v1.entity.FabricDefaultAttributeRegistry",
            "net.fabricmc.fabric.api.object.builder.v1.entity.FabricEntityTypeBuilder",
            "net.minecraft.entity.EntityDimensions",
            "net.minecraft.entity.EntityType",
            "net.minecraft.entity.SpawnGroup",
            "net.minecraft.item.Item",
            "net.minecraft.item.SpawnEggItem",
        ])
        .imports(REGISTRY_IMPORTS)
        .import("net.minecraft.util.Identifier")
        .private_constructor("GeneratedEntities")
        .lines(&fields, "No generated entities.")
        .method("public static void register()", &register)
}

fn icon_expression(ctx: &FabricContext, icon: Option<&str>) -> String {
    let symbols = &ctx.symbols;
    let source = resolve_icon(icon, &ctx.references, symbols.spawn_egg_entities());
    let stack = match source {
        IconSource::Item(name) => format!("GeneratedItems.{}", symbols.constant(&name)),
        IconSource::Block(name) => format!("GeneratedBlocks.{}", symbols.block_item_constant(&name)),
        IconSource::SpawnEgg(name) => {
            format!("GeneratedEntities.{}", symbols.spawn_egg_constant(&name))
        }
        IconSource::Registry { namespace, path } => format!(
            "Registries.ITEM.get(Identifier.of({}, {}))",
            java_string(&namespace),
            java_string(&path)
        ),
        IconSource::Stone => "Items.STONE".to_string(),
    };
    format!("new ItemStack({stack})")
}

/// Creative tabs and their entries.
///
/// Items, block items and spawn eggs join the tab they name, or the only tab
/// when exactly one exists. References to undeclared tabs are dropped.
pub(super) fn item_groups_class(ctx: &FabricContext) -> JavaClass {
    let symbols = &ctx.symbols;
    let tabs = &ctx.elements.tabs;
    let default_tab = match tabs.as_slice() {
        [(only, _)] => Some(only.name()),
        _ => None,
    };
    let target = |declared: &Option<String>| -> Option<String> {
        let tab = declared.as_deref().or(default_tab)?;
        tabs.iter()
            .any(|(element, _)| element.name() == tab)
            .then(|| tab.to_string())
    };

    let mut entries: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (element, item) in &ctx.elements.items {
        if let Some(tab) = target(&item.creative_tab) {
            entries
                .entry(tab)
                .or_default()
                .push(format!("GeneratedItems.{}", symbols.constant(element.name())));
        }
    }
    for (element, block) in &ctx.elements.blocks {
        if let Some(tab) = target(&block.creative_tab) {
            entries.entry(tab).or_default().push(format!(
                "GeneratedBlocks.{}",
                symbols.block_item_constant(element.name())
            ));
        }
    }
    for (element, entity) in &ctx.elements.entities {
        if !symbols.has_spawn_egg(element.name()) {
            continue;
        }
        if let Some(tab) = target(&entity.creative_tab) {
            entries.entry(tab).or_default().push(format!(
                "GeneratedEntities.{}",
                symbols.spawn_egg_constant(element.name())
            ));
        }
    }

    let mut fields = Vec::new();
    let mut registrations = Vec::new();
    for (element, tab) in tabs {
        let name = element.name();
        let constant = symbols.constant(name);
        let key = symbols.key_constant(name);

        fields.push(registry_key(ctx, "ItemGroup", "ITEM_GROUP", &key, name));
        fields.push(format!(
            "public static final ItemGroup {constant} = Registry.register(Registries.ITEM_GROUP, {key}, FabricItemGroup.builder().displayName(Text.translatable({})).icon(() -> {}).build());",
            java_string(&format!("itemGroup.{}.{name}", ctx.mod_id())),
            icon_expression(ctx, tab.icon.as_deref())
        ));

        let Some(lines) = entries.get(name).filter(|lines| !lines.is_empty()) else {
            continue;
        };
        let mut block = format!("ItemGroupEvents.modifyEntriesEvent({key}).register(entries -> {{\n");
        for line in lines {
            block.push_str(&format!("    entries.add({line});\n"));
        }
        block.push_str("});");
        registrations.push(block);
    }

    if registrations.is_empty() {
        registrations.push("// No tab entries assigned.".to_string());
    }

    holder(ctx, "GeneratedItemGroups")
        .imports([
            "net.fabricmc.fabric.api.itemgroup.v1.FabricItemGroup",
            "net.fabricmc.fabric.api.itemgroup.v1.ItemGroupEvents",
            "net.minecraft.item.ItemGroup",
            "net.minecraft.item.ItemStack",
            "net.minecraft.item.Items",
        ])
        .imports(REGISTRY_IMPORTS)
        .imports(["net.minecraft.text.Text", "net.minecraft.util.Identifier"])
        .private_constructor("GeneratedItemGroups")
        .lines(&fields, "No generated creative tabs.")
        .method(
            "public static void register()",
            &[logged(
                ctx,
                format!("Registered {} generated creative tab(s)", tabs.len()),
            )],
        )
        .method("public static void registerEntries()", &registrations)
}
