//! Default values seeded into new documents and new group pairs.

use crate::{
    data::{Mapping, Node, NodePath},
    form::SOUND,
};

/// Optional sub-sections to include in a property template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Include a `Particles` sub-mapping.
    pub particles: bool,
    /// Include a `Sound` sub-mapping.
    pub sound: bool,
}

impl TemplateOptions {
    pub fn new(particles: bool, sound: bool) -> Self {
        Self { particles, sound }
    }
}

/// Vanilla explosive entities that can be listed in an entity group.
pub const VANILLA_ENTITIES: &[&str] = &[
    "PRIMED_TNT",
    "ENDER_CRYSTAL",
    "WITHER",
    "MINECART_TNT",
    "CREEPER",
    "CHARGED_CREEPER",
    "FIREBALL",
    "DRAGON_FIREBALL",
    "SMALL_FIREBALL",
    "WITHER_SKULL",
    "CHARGED_WITHER_SKULL",
    "BED",
    "RESPAWN_ANCHOR",
];

fn mapping<const N: usize>(entries: [(&str, Node); N]) -> Mapping {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Explosion properties of a new entity group.
pub fn entity_properties(options: TemplateOptions) -> Mapping {
    let mut properties = mapping([
        ("ExplosionRadius", 0.0.into()),
        ("ExplosionFactor", 1.0.into()),
        ("ReplaceOriginalExplosion", false.into()),
        ("UnderwaterExplosionFactor", 0.5.into()),
        ("ExplosionDamageBlocksUnderwater", false.into()),
        ("ReplaceOriginalExplosionWhenUnderwater", true.into()),
        ("ExplosionRemoveWaterloggedStateFromNearbyBlocks", false.into()),
        ("ExplosionRemoveWaterloggedStateFromNearbyBlocksOnSurface", true.into()),
        ("ExplosionRemoveWaterloggedStateFromNearbyBlocksUnderwater", true.into()),
        ("ExplosionRemoveNearbyWaterloggedBlocks", false.into()),
        ("ExplosionRemoveNearbyWaterloggedBlocksOnSurface", true.into()),
        ("ExplosionRemoveNearbyWaterloggedBlocksUnderwater", true.into()),
        ("ExplosionRemoveNearbyLiquids", false.into()),
        ("ExplosionRemoveNearbyLiquidsOnSurface", true.into()),
        ("ExplosionRemoveNearbyLiquidsUnderwater", true.into()),
        ("PackDroppedItems", false.into()),
    ]);

    if options.particles {
        properties.insert(
            "Particles".to_string(),
            mapping([
                ("Name", "REDSTONE".into()),
                ("DeltaX", 2.0.into()),
                ("DeltaY", 2.0.into()),
                ("DeltaZ", 2.0.into()),
                ("Amount", 2000_i64.into()),
                ("Speed", 1.0.into()),
                ("Force", true.into()),
                ("Red", 255_i64.into()),
                ("Green", 0_i64.into()),
                ("Blue", 255_i64.into()),
                ("Size", 2.0.into()),
            ])
            .into(),
        );
    }
    if options.sound {
        properties.insert("Sound".to_string(), sound().into());
    }
    properties
}

/// Per-material properties of a new block group.
pub fn block_materials(options: TemplateOptions) -> Mapping {
    let mut materials = mapping([
        ("Damage", 50.0.into()),
        ("DropChance", 0.0.into()),
        ("DistanceAttenuationFactor", 0.0.into()),
        ("UnderwaterDamageFactor", 0.5.into()),
        ("FancyUnderwaterDetection", false.into()),
    ]);

    if options.particles {
        materials.insert(
            "Particles".to_string(),
            mapping([
                ("DeltaX", 5.0.into()),
                ("DeltaY", 5.0.into()),
                ("DeltaZ", 5.0.into()),
                ("Amount", 2000_i64.into()),
                ("Speed", 1.0.into()),
                ("Force", true.into()),
                ("Name", "BLOCK_CRACK".into()),
                ("Material", "OBSIDIAN".into()),
            ])
            .into(),
        );
    }
    if options.sound {
        materials.insert("Sound".to_string(), sound().into());
    }
    materials
}

fn sound() -> Mapping {
    mapping([
        ("Name", "ENTITY_OCELOT_HURT".into()),
        ("Volume", 1.0.into()),
        ("Pitch", 1.0.into()),
    ])
}

/// Body of a freshly created plugin configuration.
pub fn default_document() -> Mapping {
    let checktool = mapping([
        ("AlwaysEnabled", false.into()),
        ("EnabledByDefault", false.into()),
        ("PreventActionWhenCheckingHandledBlocks", true.into()),
        ("PreventActionWhenCheckingNonHandledBlocks", true.into()),
        ("SilentWhenCheckingOnDisabledWorlds", false.into()),
        ("SilentWhenCheckingWithoutPermissions", false.into()),
        ("SilentWhenCheckingNonHandledBlocks", false.into()),
        ("SilentWhenCheckingHandledBlocks", false.into()),
        ("ShowBossBar", false.into()),
        ("BossBarColor", "PURPLE".into()),
        ("BossBarStyle", "SOLID".into()),
        ("BossBarDuration", 30_i64.into()),
    ]);

    let locale = mapping([
        ("NotAllowed", "You are not allowed to perform this action!".into()),
        ("Usage", "Usage: %DESCRIPTION%".into()),
        ("OnlyPlayerAllowed", "Only players can perform this action!".into()),
        ("PlayerDoesntExist", "Player %NAME% doesn't exist in the server!".into()),
        ("PlayerIsOffline", "Player %NAME% must be online to perform that".into()),
        (
            "EnterChecktoolMode",
            "You can now right-click a block with %PRETTY_ITEM% to display block durability".into(),
        ),
        ("LeaveChecktoolMode", "You can no longer check for a block durability".into()),
        ("ChecktoolToggledOn", "Checktool mode toggled on for player %NAME%".into()),
        ("ChecktoolToggledOff", "Checktool mode toggled off for player %NAME%".into()),
        (
            "ChecktoolUse",
            "Block health: %DURABILITY_PERCENTAGE%% (%PRETTY_MATERIAL%)".into(),
        ),
        ("ChecktoolUseBossBar", "%PRETTY_MATERIAL%: %DURABILITY_PERCENTAGE%%".into()),
        ("ChecktoolSet", "Checktool successfully set to %PRETTY_ITEM%!".into()),
        (
            "ChecktoolNotPersisted",
            "Checktool item was set to %PRETTY_ITEM%, but it couldn't be persisted".into(),
        ),
        ("ChecktoolGiven", "A checktool (%PRETTY_ITEM%) was given to player %NAME%".into()),
        ("ChecktoolReset", "Checktool successfully reset to bare hand (Air)".into()),
        (
            "ChecktoolNotHandled",
            "%PRETTY_MATERIAL% is not handled by the current configuration".into(),
        ),
        ("ChecktoolInfo", "Current checktool item: %PRETTY_ITEM%".into()),
        ("ChecktoolAlwaysEnabled", "Checktool can't be toggled off".into()),
        ("DisabledInThisWorld", "This functionality is disabled in this world".into()),
        ("Reloaded", "Reloaded successfully!".into()),
        ("DebugEnabled", "Debug mode has been enabled".into()),
        ("DebugDisabled", "Debug mode has been disabled".into()),
    ]);

    mapping([
        ("UseBlockDatabase", false.into()),
        ("CheckBlockDatabaseAtStartup", false.into()),
        ("BlockDurability", 100.0.into()),
        ("EnableMetrics", true.into()),
        ("Checktool", checktool.into()),
        ("Groups", Node::empty_mapping()),
        ("VanillaEntity", Node::empty_mapping()),
        ("Locale", locale.into()),
        ("LocalePrefix", "[ExplodeAny]".into()),
        ("DisabledWorlds", Node::Sequence(Vec::new())),
    ])
}

/// Help text for a property, material or particle field, looked up by key.
///
/// The first line is a one-line summary; the rest lists defaults and ranges.
/// Fields inside a `Sound` section are covered by [`field_help`].
pub fn property_help(name: &str) -> Option<&'static str> {
    Some(match name {
        "ExplosionRadius" => {
            "Replaces the radius of the original explosion.\n\
             Default 0.0 keeps the original radius. Range [0.0, inf)."
        }
        "ExplosionFactor" => {
            "Multiplies the radius of the original explosion.\n\
             Default 1.0 keeps the radius. 0.0 cancels the explosion."
        }
        "ReplaceOriginalExplosion" => {
            "Replaces the vanilla explosion with a custom one.\n\
             Default false: only block damage handled by the plugin changes."
        }
        "UnderwaterExplosionFactor" => {
            "Multiplies the explosion radius underwater.\n\
             Default 0.5. 1.0 means water has no effect. Range [0.0, inf)."
        }
        "ExplosionDamageBlocksUnderwater" => {
            "Lets underwater explosions damage unmanaged vanilla blocks.\n\
             Default false."
        }
        "ReplaceOriginalExplosionWhenUnderwater" => {
            "Replaces the vanilla explosion when it happens underwater.\n\
             Default true. When false both explosions occur."
        }
        "ExplosionRemoveWaterloggedStateFromNearbyBlocks" => {
            "Dries waterlogged blocks around the explosion.\n\
             Default false."
        }
        "ExplosionRemoveWaterloggedStateFromNearbyBlocksOnSurface" => {
            "Dries waterlogged blocks for explosions on the surface.\n\
             Default true. Needs ExplosionRemoveWaterloggedStateFromNearbyBlocks."
        }
        "ExplosionRemoveWaterloggedStateFromNearbyBlocksUnderwater" => {
            "Dries waterlogged blocks for explosions underwater.\n\
             Default true. Needs ExplosionRemoveWaterloggedStateFromNearbyBlocks."
        }
        "ExplosionRemoveNearbyWaterloggedBlocks" => {
            "Removes waterlogged blocks around the explosion before it detonates.\n\
             Default false. Takes precedence over drying them."
        }
        "ExplosionRemoveNearbyWaterloggedBlocksOnSurface" => {
            "Removes waterlogged blocks for explosions on the surface.\n\
             Default true. Needs ExplosionRemoveNearbyWaterloggedBlocks."
        }
        "ExplosionRemoveNearbyWaterloggedBlocksUnderwater" => {
            "Removes waterlogged blocks for explosions underwater.\n\
             Default true. Needs ExplosionRemoveNearbyWaterloggedBlocks."
        }
        "ExplosionRemoveNearbyLiquids" => {
            "Removes liquids around the explosion before it detonates.\n\
             Default false."
        }
        "ExplosionRemoveNearbyLiquidsOnSurface" => {
            "Removes liquids for explosions on the surface.\n\
             Default true. Needs ExplosionRemoveNearbyLiquids."
        }
        "ExplosionRemoveNearbyLiquidsUnderwater" => {
            "Removes liquids for explosions underwater.\n\
             Default true. Needs ExplosionRemoveNearbyLiquids."
        }
        "PackDroppedItems" => {
            "Spawns all dropped items as a single entity.\n\
             Default false. Reduces lag from large explosions."
        }
        "Particles" => {
            "Particle effect spawned by the explosion.\n\
             Name, DeltaX/Y/Z, Amount, Speed and Force apply to every particle.\n\
             Red, Green, Blue and Size apply to REDSTONE only."
        }
        "Sound" => {
            "Sound played by the explosion.\n\
             Name is a Spigot Sound identifier. Volume sets the hearing radius."
        }
        "Damage" => {
            "Base damage dealt to blocks of this group.\n\
             Default 50.0. 0.0 leaves the block untouched. Range [0.0, inf)."
        }
        "DropChance" => {
            "Chance in percent that a broken block drops its item.\n\
             Default 0.0. Range [0.0, 100.0]."
        }
        "DistanceAttenuationFactor" => {
            "How much damage falls off with distance from the center.\n\
             Default 0.0: equal damage in range. 1.0: linear falloff. Range [0.0, 1.0]."
        }
        "UnderwaterDamageFactor" => {
            "Multiplies damage to blocks underwater.\n\
             Default 0.5. 1.0 means water has no effect. Range [0.0, inf)."
        }
        "FancyUnderwaterDetection" => {
            "Traces rays to each block to detect water.\n\
             Default false: water is only checked at the explosion center."
        }
        "Name" => {
            "Spigot Particle identifier to spawn.\n\
             Default REDSTONE for entities, BLOCK_CRACK for blocks."
        }
        "Material" => "Block material shown by BLOCK_CRACK style particles.\nDefault OBSIDIAN.",
        "DeltaX" => "Width of the particle cube along X.\nDefault 2.0.",
        "DeltaY" => "Width of the particle cube along Y.\nDefault 2.0.",
        "DeltaZ" => "Width of the particle cube along Z.\nDefault 2.0.",
        "Amount" => {
            "Number of particles to spawn.\n\
             Default 2000. Large values can drop client frame rates."
        }
        "Speed" => "Particle speed.\nDefault 1.0. Must not be negative.",
        "Force" => "Shows particles to players up to 256 blocks away.\nDefault true.",
        "Red" => "Red component of REDSTONE particles.\nDefault 255. Range [0, 255].",
        "Green" => "Green component of REDSTONE particles.\nDefault 0. Range [0, 255].",
        "Blue" => "Blue component of REDSTONE particles.\nDefault 255. Range [0, 255].",
        "Size" => "Size of REDSTONE particles.\nDefault 2.0.",
        _ => return None,
    })
}

fn sound_help(name: &str) -> Option<&'static str> {
    Some(match name {
        "Name" => "Spigot Sound identifier to play.\nDefault ENTITY_OCELOT_HURT.",
        "Volume" => "Sound volume; higher values carry further.\nDefault 1.0. Range [0.0, inf).",
        "Pitch" => "Playback speed of the sound.\nDefault 1.0. Range [0.5, 2.0].",
        _ => return None,
    })
}

/// Help text for the field at `path`, resolving `Sound` fields first.
pub fn field_help(path: &NodePath) -> Option<&'static str> {
    let (name, parents) = path.segments().split_last()?;
    if parents.last().is_some_and(|parent| parent == SOUND)
        && let Some(help) = sound_help(name)
    {
        return Some(help);
    }
    property_help(name)
}
