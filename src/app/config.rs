use crate::app::cli::Cli;
use crate::app::models::{
    RuntimeConfig, TargetSet, DEFAULT_EXTENSIONS, DEFAULT_FORMATTER, DEFAULT_STYLE,
    DEFAULT_TIMEOUT_SECS,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    dirs: Option<Vec<PathBuf>>,
    extensions: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    formatter: Option<String>,
    style: Option<String>,
    timeout_secs: Option<u64>,
}

fn load_presets_file() -> Result<HashMap<String, PresetConfig>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home.join(".config").join("fmt_srcs").join("presets.toml");

    if !config_path.exists() {
        log::debug!("No presets file at {:?}", config_path);
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content)
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content).context("Failed to parse presets.toml")?;
    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Extensions are compared without the leading dot, so '.cc' and 'cc' are the same.
fn normalize_extensions(exts: Vec<String>) -> Vec<String> {
    exts.into_iter()
        .map(|e| e.trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

pub fn resolve_config(cli: Cli, project_name: Option<&str>) -> Result<RuntimeConfig> {
    let presets = load_presets_file()?;
    Ok(resolve_with_presets(cli, project_name, &presets))
}

fn resolve_with_presets(
    cli: Cli,
    project_name: Option<&str>,
    presets: &HashMap<String, PresetConfig>,
) -> RuntimeConfig {
    // Determine preset to use: CLI flag > Auto-detect > None
    let preset_key = cli.preset.as_deref().or(project_name);
    let preset = match preset_key.and_then(|k| presets.get(k).map(|p| (k, p))) {
        Some((key, preset)) => {
            log::info!("Using preset '{}'", key);
            preset.clone()
        }
        None => {
            if let Some(key) = cli.preset.as_deref() {
                log::warn!("⚠️ Preset '{}' not found, using defaults", key);
            }
            PresetConfig::default()
        }
    };

    let targets = match (cli.dir, preset.dirs) {
        (Some(dir), _) => TargetSet::Explicit(dir),
        (None, Some(dirs)) if !dirs.is_empty() => TargetSet::Defaults(dirs),
        (None, _) => TargetSet::builtin(),
    };

    let preset_exts = preset
        .extensions
        .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect());

    RuntimeConfig {
        targets,
        extensions: merge_vecs(
            Some(normalize_extensions(preset_exts)),
            cli.ext.map(normalize_extensions),
        ),
        exclude: merge_vecs(preset.exclude, cli.exclude),
        formatter: cli
            .formatter
            .or(preset.formatter)
            .unwrap_or_else(|| DEFAULT_FORMATTER.to_string()),
        style: cli
            .style
            .or(preset.style)
            .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        timeout: Duration::from_secs(
            cli.timeout
                .or(preset.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        list_only: cli.list,
    }
}
