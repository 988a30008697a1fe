use crate::error::{QualityError, Result};
use crate::types::config::QualityConfig;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "codeminitor.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".codeminitor/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/codeminitor/config.toml";

pub fn load_config(root: &Path) -> Result<QualityConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// Candidate files, lowest precedence first.
fn config_layers(root: &Path, global_path: Option<&Path>) -> Vec<PathBuf> {
    global_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain([root.join(DEFAULT_CONFIG_FILE), root.join(DEFAULT_LOCAL_FILE)])
        .collect()
}

/// Merges global, project and local layers; later layers win key by key.
pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<QualityConfig> {
    let mut merged = Table::new();
    for layer in config_layers(root, global_path) {
        if !layer.is_file() {
            continue;
        }
        debug!(path = %layer.display(), "loading config layer");
        overlay_table(&mut merged, read_table(&layer)?);
    }

    let cfg: QualityConfig = Value::Table(merged)
        .try_into()
        .map_err(|e: toml::de::Error| QualityError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn read_table(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| QualityError::Toml {
        path: path.display().to_string(),
        source,
    })
}

/// Nested tables merge recursively; any other value replaces what was there.
fn overlay_table(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match value {
            Value::Table(nested) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => overlay_table(existing, nested),
                _ => {
                    base.insert(key, Value::Table(nested));
                }
            },
            scalar => {
                base.insert(key, scalar);
            }
        }
    }
}
