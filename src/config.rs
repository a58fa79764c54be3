use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::alias::AliasMap;
use crate::error::LayerAliasError;
use crate::hook::HostOptions;

pub const CONFIG_FILE_NAME: &str = "layer-alias.json";

/// Host options and alias mapping read from a `layer-alias.json` file.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub path: PathBuf,
    pub options: HostOptions,
    pub aliases: AliasMap,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    root_dir: Option<String>,
    layers: Option<Vec<String>>,
    #[serde(default)]
    alias: serde_json::Map<String, serde_json::Value>,
}

/// Find and load the nearest `layer-alias.json`, walking up from `start_dir`.
pub fn discover(start_dir: &Path) -> Result<ProjectConfig, LayerAliasError> {
    let path = find_config(start_dir).ok_or_else(|| LayerAliasError::ConfigNotFound {
        file_name: CONFIG_FILE_NAME,
        start: start_dir.display().to_string(),
    })?;
    load(&path)
}

/// Load a config file. Relative paths inside it are taken from its directory.
pub fn load(path: &Path) -> Result<ProjectConfig, LayerAliasError> {
    let content = std::fs::read_to_string(path).map_err(|e| LayerAliasError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let config_dir = path.parent().unwrap_or(Path::new("."));
    parse(&content, path, config_dir)
}

fn parse(content: &str, path: &Path, config_dir: &Path) -> Result<ProjectConfig, LayerAliasError> {
    let stripped = strip_jsonc_comments(content);
    let raw: RawConfig =
        serde_json::from_str(&stripped).map_err(|e| LayerAliasError::ParseFailed {
            path: path.display().to_string(),
            source: e,
        })?;

    let root_dir = raw
        .root_dir
        .as_deref()
        .map_or_else(|| config_dir.to_path_buf(), |r| join_clean(config_dir, r));

    let layers = match raw.layers {
        Some(layers) => layers.iter().map(|l| join_clean(config_dir, l)).collect(),
        None => vec![root_dir.clone()],
    };

    let mut aliases = AliasMap::with_capacity(raw.alias.len());
    for (find, target) in raw.alias {
        let Some(target) = target.as_str() else {
            return Err(LayerAliasError::InvalidConfig {
                path: path.display().to_string(),
                message: format!("alias `{find}` must map to a string path"),
            });
        };
        let replacement = join_clean(config_dir, target).to_string_lossy().into_owned();
        aliases.push((find, replacement));
    }

    if !root_dir.is_dir() {
        log::warn!("root dir {} does not exist", root_dir.display());
    }

    Ok(ProjectConfig {
        path: path.to_path_buf(),
        options: HostOptions { root_dir, layers },
        aliases,
    })
}

/// Join `rel` onto `base`, dropping `.` components so layer names stay meaningful.
fn join_clean(base: &Path, rel: &str) -> PathBuf {
    base.join(rel).components().collect()
}

/// Strip JSONC comments (`//` line and `/* */` block) while respecting strings.
fn strip_jsonc_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                out.push('"');
                while let Some(c) = chars.next() {
                    out.push(c);
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if c == '"' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Walk up directories from `start` looking for the config file.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_dir() {
        start.to_path_buf()
    } else {
        start.parent()?.to_path_buf()
    };

    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}
