//! Configuration for dlplay.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (DLPLAY_HOME, DLPLAY_CATALOG, DLPLAY_PLAYER)
//! 2. Config file (.dlplay/config.yaml)
//! 3. Defaults (~/.dlplay)
//!
//! Config file discovery:
//! - Searches current directory and parents for .dlplay/config.yaml
//! - Paths in config file are relative to the directory holding .dlplay/

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::mpv;
use crate::library::catalog::{DEFAULT_AUTO_PRUNE_RATIO, PATH_ATTRIBUTE};
use crate::library::media::{extension_list, DEFAULT_COVER_EXTENSIONS, DEFAULT_MEDIA_EXTENSIONS};
use crate::library::PrunePolicy;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Attributes never shown when presenting an entry
pub const DEFAULT_HIDDEN_ATTRIBUTES: &[&str] = &["img", PATH_ATTRIBUTE, "ファイル容量", "ファイル形式"];

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub player: Option<PlayerConfig>,
    #[serde(default)]
    pub library: Option<LibraryConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .dlplay/)
    pub home: Option<String>,
    /// Catalog file (relative to the project root)
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    pub binary: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    pub auto_prune_ratio: Option<f64>,
    pub media_extensions: Option<Vec<String>>,
    pub cover_extensions: Option<Vec<String>>,
    pub hidden_attributes: Option<Vec<String>>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// dlplay home (default catalog location), unknown without a home directory
    pub home: Option<PathBuf>,
    /// Catalog file, unknown when neither set nor derivable from home
    pub catalog: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Player process settings
    pub player: PlayerSettings,
    /// Library browsing settings
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    pub binary: String,
    pub args: Vec<String>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            binary: mpv::DEFAULT_BINARY.to_string(),
            args: mpv::DEFAULT_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibrarySettings {
    pub auto_prune_ratio: f64,
    pub media_extensions: Vec<String>,
    pub cover_extensions: Vec<String>,
    pub hidden_attributes: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            auto_prune_ratio: DEFAULT_AUTO_PRUNE_RATIO,
            media_extensions: extension_list(DEFAULT_MEDIA_EXTENSIONS),
            cover_extensions: extension_list(DEFAULT_COVER_EXTENSIONS),
            hidden_attributes: DEFAULT_HIDDEN_ATTRIBUTES
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}

impl LibrarySettings {
    pub fn prune_policy(&self) -> PrunePolicy {
        PrunePolicy {
            auto_prune_ratio: self.auto_prune_ratio,
        }
    }
}

/// Environment overrides, captured once so resolution stays testable
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub home: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub player: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            home: std::env::var("DLPLAY_HOME").ok().map(PathBuf::from),
            catalog: std::env::var("DLPLAY_CATALOG").ok().map(PathBuf::from),
            player: std::env::var("DLPLAY_PLAYER").ok(),
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".dlplay").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine a parsed config file, environment and defaults
pub fn resolve(
    config_file: Option<(&Path, ConfigFile)>,
    env: &EnvOverrides,
    default_home: Option<PathBuf>,
) -> ResolvedConfig {
    let mut player = PlayerSettings::default();
    let mut library = LibrarySettings::default();

    let (home, catalog, config_path) = if let Some((config_path, config)) = config_file {
        // .dlplay/ and the directory containing it
        let dlplay_dir = config_path.parent().unwrap_or(Path::new("."));
        let base_dir = dlplay_dir.parent().unwrap_or(Path::new("."));

        let home = if let Some(ref env_home) = env.home {
            Some(env_home.clone())
        } else if let Some(ref home_path) = config.paths.home {
            Some(resolve_path(dlplay_dir, home_path))
        } else {
            default_home
        };

        let catalog = if let Some(ref env_catalog) = env.catalog {
            Some(env_catalog.clone())
        } else if let Some(ref catalog_path) = config.paths.catalog {
            Some(resolve_path(base_dir, catalog_path))
        } else {
            home.as_ref().map(|h| h.join("catalog.json"))
        };

        if let Some(p) = config.player {
            if let Some(binary) = p.binary {
                player.binary = binary;
            }
            if let Some(args) = p.args {
                player.args = args;
            }
        }

        if let Some(l) = config.library {
            if let Some(ratio) = l.auto_prune_ratio {
                library.auto_prune_ratio = ratio;
            }
            if let Some(exts) = l.media_extensions {
                library.media_extensions = exts;
            }
            if let Some(exts) = l.cover_extensions {
                library.cover_extensions = exts;
            }
            if let Some(hidden) = l.hidden_attributes {
                library.hidden_attributes = hidden;
            }
        }

        (home, catalog, Some(config_path.to_path_buf()))
    } else {
        let home = env.home.clone().or(default_home);
        let catalog = env
            .catalog
            .clone()
            .or_else(|| home.as_ref().map(|h| h.join("catalog.json")));
        (home, catalog, None)
    };

    if let Some(ref binary) = env.player {
        player.binary = binary.clone();
    }

    ResolvedConfig {
        home,
        catalog,
        config_file: config_path,
        player,
        library,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    // Only needed when nothing else names the catalog
    let default_home = dirs::home_dir().map(|h| h.join(".dlplay"));

    let env = EnvOverrides::from_env();

    match find_config_file() {
        Some(path) => {
            let config = load_config_file(&path)?;
            Ok(resolve(Some((&path, config)), &env, default_home))
        }
        None => Ok(resolve(None, &env, default_home)),
    }
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
