//! Command-line interface.
//!
//! Every command opens one configuration file. Commands that change the file
//! save it afterwards with the save policy from the settings file, unless
//! `--policy` overrides it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use explodeconf::{
    ConfigManager, GroupKind, GroupPair, NodePath, SaveOptions, SavePolicy, TemplateOptions,
    parse_item_list, template::VANILLA_ENTITIES,
};

use crate::{
    render::{self, GroupRow},
    settings::Settings,
};

/// Edit ExplodeAny plugin configuration files.
#[derive(Parser, Debug)]
#[command(name = "exedit", version, about)]
pub struct Cli {
    /// Settings file [default: ./exedit.toml]
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// How the `Groups` section is written when saving.
    #[arg(long, value_enum, global = true)]
    pub policy: Option<PolicyArg>,

    /// Back up the file before overwriting it.
    #[arg(long, global = true)]
    pub backup: bool,

    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Save policy selector.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// Write the whole document from memory.
    OverwriteAll,
    /// Keep the `Groups` section that is currently on disk.
    PreserveGroups,
}

impl From<PolicyArg> for SavePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::OverwriteAll => SavePolicy::OverwriteAll,
            PolicyArg::PreserveGroups => SavePolicy::PreserveGroupsFromDisk,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a configuration file with default contents.
    New { file: PathBuf },
    /// List groups, paired entity and block groups first.
    Groups { file: PathBuf },
    /// Print the value at a dot-separated path.
    Get { file: PathBuf, path: String },
    /// Set the value at a dot-separated path.
    Set {
        file: PathBuf,
        path: String,
        /// Text interpreted as boolean, integer, float, null or string.
        value: String,
    },
    /// Append comma-separated items to a group.
    Append {
        file: PathBuf,
        group: String,
        items: String,
    },
    /// Remove the first occurrence of an item from a group.
    Remove {
        file: PathBuf,
        group: String,
        item: String,
    },
    /// Add an entity group and its block group with default settings.
    AddPair {
        file: PathBuf,
        entity: String,
        block: String,
        #[arg(long)]
        entity_particles: bool,
        #[arg(long)]
        block_particles: bool,
        #[arg(long)]
        entity_sound: bool,
        #[arg(long)]
        block_sound: bool,
    },
    /// Show the editable settings of a group.
    Form {
        file: PathBuf,
        group: String,
        /// Print the full help text under every field.
        #[arg(long)]
        details: bool,
    },
    /// List the entity identifiers accepted in entity groups.
    Entities,
}

impl Cli {
    /// Resolve settings and execute the command.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings or configuration file cannot be
    /// read, the operation is rejected, or saving fails.
    pub fn run(self) -> Result<()> {
        let settings = Settings::load(self.settings.as_deref())?;
        let options = SaveOptions::new(
            self.policy
                .map(SavePolicy::from)
                .unwrap_or(settings.save_policy),
        )
        .with_backup(self.backup || settings.backup);

        let manager = ConfigManager::new();
        match self.command {
            Command::New { file } => {
                if file.exists() {
                    bail!("{} already exists", file.display());
                }
                manager
                    .create_new(&file)
                    .with_context(|| format!("Failed to create {}", file.display()))?;
                println!("{} {}", "created".green().bold(), file.display());
            }
            Command::Groups { file } => {
                open(&manager, &file)?;
                let index = manager.index();
                for name in manager.ordered_group_names() {
                    let kind = index.classify(&name);
                    let partner = match kind {
                        GroupKind::Entity => index.block_for(&name),
                        GroupKind::Block => index.entity_for(&name),
                        GroupKind::Unclassified => None,
                    }
                    .map(str::to_string);
                    let items = manager.group_items(&name).map(|i| i.len()).unwrap_or(0);
                    println!(
                        "{}",
                        render::group_line(&GroupRow {
                            name,
                            kind,
                            partner,
                            items,
                        })
                    );
                }
            }
            Command::Get { file, path } => {
                open(&manager, &file)?;
                let path = NodePath::parse(&path);
                let node = manager
                    .with_document(|doc| doc.get(&path).cloned())
                    .flatten()
                    .ok_or_else(|| anyhow!("`{path}` not found in {}", file.display()))?;
                println!("{}", render::node_text(&node)?);
            }
            Command::Set { file, path, value } => {
                open(&manager, &file)?;
                let scalar = manager.set_text(path.as_str(), &value)?;
                save(&manager, &file, options)?;
                println!("{path} = {scalar} ({})", scalar.kind().dimmed());
            }
            Command::Append { file, group, items } => {
                open(&manager, &file)?;
                let items = parse_item_list(&items);
                if items.is_empty() {
                    bail!("no items given");
                }
                let count = items.len();
                manager.append_items(&group, items)?;
                save(&manager, &file, options)?;
                println!("added {count} item(s) to {}", group.bold());
            }
            Command::Remove { file, group, item } => {
                open(&manager, &file)?;
                if manager.remove_item(&group, &item)? {
                    save(&manager, &file, options)?;
                    println!("removed {item} from {}", group.bold());
                } else {
                    println!("{} {item} is not in {group}", "unchanged:".yellow());
                }
            }
            Command::AddPair {
                file,
                entity,
                block,
                entity_particles,
                block_particles,
                entity_sound,
                block_sound,
            } => {
                open(&manager, &file)?;
                let pair = GroupPair::new(entity.as_str(), block.as_str())
                    .with_entity(TemplateOptions::new(entity_particles, entity_sound))
                    .with_block(TemplateOptions::new(block_particles, block_sound));
                manager.create_group_pair(&pair)?;
                save(&manager, &file, options)?;
                println!(
                    "{} {} -> {}",
                    "paired".green().bold(),
                    entity.green(),
                    block.yellow()
                );
            }
            Command::Form {
                file,
                group,
                details,
            } => {
                open(&manager, &file)?;
                let (section, entries) = manager.group_form(&group).ok_or_else(|| {
                    anyhow!("group `{group}` is not connected to any entity or block group")
                })?;
                for line in render::form_lines(&section, &entries, details) {
                    println!("{line}");
                }
            }
            Command::Entities => {
                for entity in VANILLA_ENTITIES {
                    println!("{entity}");
                }
            }
        }
        Ok(())
    }
}

fn open(manager: &ConfigManager, file: &Path) -> Result<()> {
    if !file.exists() {
        warn!("{} does not exist, starting from an empty document", file.display());
    }
    manager
        .load_from(file)
        .with_context(|| format!("Failed to load {}", file.display()))
}

fn save(manager: &ConfigManager, file: &Path, options: SaveOptions) -> Result<()> {
    manager
        .save(options)
        .with_context(|| format!("Failed to write {}", file.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use explodeconf::{Document, Node};

    use super::*;

    fn run(dir: &Path, args: &[&str]) -> Result<()> {
        let settings = dir.join("absent-settings.toml");
        let mut argv = vec!["exedit", "--settings", settings.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)?.run()
    }

    #[test]
    fn test_parse_add_pair_flags() {
        let cli = Cli::try_parse_from([
            "exedit",
            "--policy",
            "preserve-groups",
            "add-pair",
            "c.yml",
            "E",
            "B",
            "--block-sound",
        ])
        .unwrap();
        assert_eq!(cli.policy, Some(PolicyArg::PreserveGroups));
        let Command::AddPair {
            entity,
            block_sound,
            entity_sound,
            ..
        } = cli.command
        else {
            panic!("expected add-pair");
        };
        assert_eq!(entity, "E");
        assert!(block_sound);
        assert!(!entity_sound);
    }

    #[test]
    fn test_edit_session() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.yml");
        let f = file.to_str().unwrap();

        run(dir.path(), &["new", f]).unwrap();
        run(dir.path(), &["add-pair", f, "Tnt", "Soft", "--block-particles"]).unwrap();
        run(dir.path(), &["append", f, "Soft", "STONE, DIRT,STONE"]).unwrap();
        run(dir.path(), &["remove", f, "Soft", "DIRT"]).unwrap();
        run(
            dir.path(),
            &["set", f, "VanillaEntity.Tnt.Materials.Soft.Damage", "75"],
        )
        .unwrap();

        let doc = Document::load(&file).unwrap();
        assert_eq!(doc.group_items("Soft").unwrap(), ["STONE", "STONE"]);
        assert!(doc.get("Groups.Tnt").unwrap().is_empty_mapping());
        assert_eq!(
            doc.get("VanillaEntity.Tnt.Materials.Soft.Damage"),
            Some(&Node::from(75_i64))
        );
        assert!(doc.get("VanillaEntity.Tnt.Materials.Soft.Particles").is_some());

        run(dir.path(), &["groups", f]).unwrap();
        run(dir.path(), &["form", f, "Soft"]).unwrap();
        run(dir.path(), &["form", f, "Tnt", "--details"]).unwrap();
        run(dir.path(), &["get", f, "Groups"]).unwrap();
    }

    #[test]
    fn test_rejected_commands() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.yml");
        fs::write(&file, "Groups:\n  G: {}\n").unwrap();
        let f = file.to_str().unwrap();

        assert!(run(dir.path(), &["new", f]).is_err());
        assert!(run(dir.path(), &["append", f, "Missing", "STONE"]).is_err());
        assert!(run(dir.path(), &["append", f, "G", " , "]).is_err());
        assert!(run(dir.path(), &["form", f, "G"]).is_err());
        assert!(run(dir.path(), &["get", f, "Groups.G.0"]).is_err());
        assert_eq!(fs::read_to_string(&file).unwrap(), "Groups:\n  G: {}\n");
    }
}
