use std::path::{Path, PathBuf};

use mamalift_instruments::Instrument;
use mamalift_instruments::scoring::ScoringRules;
use serde::{Deserialize, Serialize};

/// Version stamped on every saved file. A bump needs a matching step in
/// [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MamaliftConfig {
    /// Absent in files written before scoring was configurable.
    #[serde(default)]
    pub config_version: u32,
    /// Cut-offs used by the classifier. Added in v1.
    pub scoring: ScoringRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<jiff::Timestamp>,
}

impl Default for MamaliftConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            scoring: ScoringRules::default(),
            created_at: None,
        }
    }
}

impl MamaliftConfig {
    /// Scoring rules checked against the instrument they will be used with.
    pub fn rules_for(&self, instrument: &dyn Instrument) -> eyre::Result<ScoringRules> {
        self.scoring
            .validate(instrument)
            .map_err(|e| eyre::eyre!("invalid scoring rules in config: {e}"))?;
        Ok(self.scoring)
    }
}

/// `<config dir>/com.mamalift.cli/config.json`.
pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| eyre::eyre!("could not determine the user config directory"))?;
    Ok(base.join("com.mamalift.cli").join("config.json"))
}

/// Load the config at `path`, or the defaults if there is no file there.
pub fn load_config_from(path: &Path) -> eyre::Result<MamaliftConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(MamaliftConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("cannot read {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse config JSON, migrating older versions first.
pub fn parse_config(contents: &str) -> eyre::Result<MamaliftConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(v) => u32::try_from(v)
            .map_err(|_| eyre::eyre!("config_version {v} is out of range"))?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: MamaliftConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Upgrade the raw JSON one version at a time, starting at `from_version`.
fn migrate(mut value: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config file is version {from_version} but this mamalift only understands up to \
             {CURRENT_VERSION}; upgrade mamalift to read it"
        ));
    }

    // v0 → v1: scoring rules became configurable
    if from_version < 1 {
        let defaults = serde_json::to_value(ScoringRules::default())?;
        let obj = value
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config root must be a JSON object"))?;
        obj.entry("scoring").or_insert(defaults);
        obj.insert("config_version".into(), 1.into());
        tracing::info!("migrated config v0 → v1 (added scoring)");
    }

    Ok(value)
}

pub fn save_config_to(config: &MamaliftConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let current = MamaliftConfig {
        config_version: CURRENT_VERSION,
        ..config.clone()
    };
    let contents = serde_json::to_string_pretty(&current)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), version = CURRENT_VERSION, "wrote config");
    Ok(())
}
