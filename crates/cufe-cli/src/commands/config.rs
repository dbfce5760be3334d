//! Config command - inspect and edit the configuration file.
//!
//! Every subcommand acts on one file: the global `--config` path when given,
//! otherwise the per-user `cufe/config.json`. Processing commands read the
//! same file through [`load_config`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use cufe_core::CufeConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration in effect
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Print one value by dotted key (e.g. "input.folder")
    Get {
        key: String,
    },

    /// Change one value by dotted key; JSON values are parsed, anything else is a string
    Set {
        key: String,
        value: String,
    },

    /// Print which configuration file is used
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the file instead of the active config path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

/// The configuration file a command reads and writes.
struct ConfigFile {
    path: PathBuf,
    explicit: bool,
}

impl ConfigFile {
    fn resolve(config_path: Option<&str>) -> Self {
        match config_path {
            Some(path) => Self {
                path: PathBuf::from(path),
                explicit: true,
            },
            None => Self {
                path: default_config_path(),
                explicit: false,
            },
        }
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read(&self) -> anyhow::Result<CufeConfig> {
        debug!("Loading config from {}", self.path.display());
        CufeConfig::from_file(&self.path)
            .with_context(|| format!("Failed to read config {}", self.path.display()))
    }

    fn read_or_default(&self) -> anyhow::Result<CufeConfig> {
        if self.exists() {
            self.read()
        } else {
            Ok(CufeConfig::default())
        }
    }

    fn write(&self, config: &CufeConfig) -> anyhow::Result<()> {
        write_config(&self.path, config)
    }
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let file = ConfigFile::resolve(config_path);
    match args.command {
        ConfigCommand::Show => show(&file),
        ConfigCommand::Init(init_args) => init(&file, init_args),
        ConfigCommand::Get { key } => get(&file, &key),
        ConfigCommand::Set { key, value } => set(&file, &key, &value),
        ConfigCommand::Path => path(&file),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cufe")
        .join("config.json")
}

/// Configuration for processing commands. An explicit `--config` file must
/// exist; the per-user file is optional and falls back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CufeConfig> {
    let file = ConfigFile::resolve(config_path);
    if file.explicit {
        file.read()
    } else {
        file.read_or_default()
    }
}

fn show(file: &ConfigFile) -> anyhow::Result<()> {
    if !file.exists() {
        println!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            file.path.display()
        );
    }
    let config = file.read_or_default()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init(file: &ConfigFile, args: InitArgs) -> anyhow::Result<()> {
    let target = args.output.unwrap_or_else(|| file.path.clone());

    if target.exists() && !args.force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            target.display()
        );
    }

    write_config(&target, &CufeConfig::default())?;
    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        target.display()
    );
    Ok(())
}

fn get(file: &ConfigFile, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(file.read_or_default()?)?;
    let value = lookup(&json, key)?;
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set(file: &ConfigFile, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(file.read_or_default()?)?;
    let value = parse_value(raw);
    assign(&mut json, key, value.clone())?;

    let config: CufeConfig = serde_json::from_value(json)
        .with_context(|| format!("Invalid value for {}: {}", key, raw))?;
    file.write(&config)?;

    println!(
        "{} Set {} = {} in {}",
        style("✓").green(),
        key,
        serde_json::to_string(&value)?,
        file.path.display()
    );
    Ok(())
}

fn path(file: &ConfigFile) -> anyhow::Result<()> {
    println!("Configuration file: {}", file.path.display());

    if file.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'cufe config init' to create a configuration file.");
    }
    Ok(())
}

fn write_config(path: &Path, config: &CufeConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    config
        .save(path)
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Parse a command-line value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn lookup<'a>(json: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.')
        .try_fold(json, |node, part| node.get(part))
        .ok_or_else(|| anyhow!("Configuration key not found: {}", key))
}

/// Replace an existing value. Unknown keys are rejected rather than added.
fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        bail!("Empty configuration key");
    };

    let mut node = json;
    for part in parents {
        node = node
            .get_mut(*part)
            .ok_or_else(|| anyhow!("Configuration key not found: {}", key))?;
    }

    match node.as_object_mut() {
        Some(obj) if obj.contains_key(*last) => {
            obj.insert((*last).to_string(), value);
            Ok(())
        }
        Some(_) => bail!("Configuration key not found: {}", key),
        None => bail!("Cannot set {}: parent is not an object", key),
    }
}
