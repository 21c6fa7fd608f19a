use crate::material::{Catalog, Material};
use crate::pending::DEFAULT_DELAY;
use crate::wheel::WheelLayout;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub wheel: WheelLayout,
    pub recommendation_delay_ms: u64,
    pub asset_dir: Option<PathBuf>,
    pub materials: Vec<Material>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wheel: WheelLayout::default(),
            recommendation_delay_ms: DEFAULT_DELAY.as_millis() as u64,
            asset_dir: None,
            materials: Catalog::default().materials().to_vec(),
        }
    }
}

impl Config {
    pub fn recommendation_delay(&self) -> Duration {
        Duration::from_millis(self.recommendation_delay_ms)
    }

    /// Material catalog with asset paths resolved against `asset_dir`.
    pub fn catalog(&self) -> Catalog {
        let catalog = Catalog::new(self.materials.clone());
        match self.asset_dir.clone().or_else(default_asset_dir) {
            Some(dir) => catalog.rooted_at(&dir),
            None => catalog,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("wheel.{field} must be a positive number, got {value}")]
    InvalidWheel { field: &'static str, value: f64 },
    #[error("Failed to write config: {0}")]
    Io(#[from] std::io::Error),
}

fn check_wheel(wheel: &WheelLayout) -> Result<(), ConfigError> {
    let sizes = [
        ("max_radius", wheel.max_radius),
        ("marker_radius", wheel.marker_radius),
        ("marker_size", wheel.marker_size),
    ];
    for (field, value) in sizes {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidWheel { field, value });
        }
    }
    for (field, value) in [("center.x", wheel.center.x), ("center.y", wheel.center.y)] {
        if !value.is_finite() {
            return Err(ConfigError::InvalidWheel { field, value });
        }
    }
    Ok(())
}

fn finish(settings: config::Config) -> Result<Config, ConfigError> {
    let config: Config = settings.try_deserialize()?;
    check_wheel(&config.wheel)?;
    Ok(config)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "drape", "drape")
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn default_asset_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("materials"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("DRAPE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    finish(s)
}

/// Parses TOML text on its own, without the file or environment layers.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(s)
}

/// Falls back to the built-in defaults when the config cannot be read.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Writes the commented default config to `path` unless a file is already there.
/// Returns whether a new file was created.
pub fn write_default_config_to(path: &Path) -> Result<bool, ConfigError> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path);
    match file {
        Ok(mut file) => {
            file.write_all(DEFAULT_CONFIG.as_bytes())?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if !write_default_config_to(&path)? {
        log::info!("Keeping existing config at {}", path.display());
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use std::path::Path;

    #[test]
    fn test_shipped_config_matches_defaults() {
        let parsed = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed = parse_config(
            r#"
recommendation_delay_ms = 250

[wheel]
max_radius = 90.0
"#,
        )
        .unwrap();
        assert_eq!(parsed.recommendation_delay(), Duration::from_millis(250));
        assert_eq!(parsed.wheel.max_radius, 90.0);
        assert_eq!(parsed.wheel.center, Point::new(175.0, 175.0));
        assert_eq!(parsed.wheel.hue_count(), 20);
        assert_eq!(parsed.materials.len(), 8);
    }

    #[test]
    fn test_custom_materials_and_asset_dir() {
        let parsed = parse_config(
            r#"
asset_dir = "/srv/fabrics"

[[materials]]
name = "Tweed"
asset = "tweed.png"

[[materials]]
name = "Mesh"
"#,
        )
        .unwrap();
        let catalog = parsed.catalog();
        assert_eq!(catalog.materials().len(), 2);
        assert_eq!(
            catalog.asset_for("Tweed"),
            Some(Path::new("/srv/fabrics/tweed.png"))
        );
        assert_eq!(catalog.asset_for("Mesh"), Some(Path::new("")));
    }

    #[test]
    fn test_wheel_sizes_must_be_positive() {
        for toml in [
            "[wheel]\nmax_radius = 0.0\n",
            "[wheel]\nmax_radius = -40.0\n",
            "[wheel]\nmax_radius = nan\n",
            "[wheel]\nmarker_size = 0.0\n",
            "[wheel]\ncenter = { x = inf, y = 175.0 }\n",
        ] {
            assert!(
                matches!(parse_config(toml), Err(ConfigError::InvalidWheel { .. })),
                "accepted {toml:?}"
            );
        }
    }

    #[test]
    fn test_hue_count_is_not_configurable() {
        let parsed = parse_config("[wheel]\nhue_count = 0\n").unwrap();
        assert_eq!(parsed.wheel.hue_count(), 20);
        let center = parsed.wheel.center;
        assert!(parsed.wheel.locate(center).is_some());
    }

    #[test]
    fn test_write_default_config_keeps_existing_file() {
        let dir = std::env::temp_dir().join(format!("drape-config-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let _ = fs_err::remove_dir_all(&dir);

        assert!(write_default_config_to(&path).unwrap());
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs_err::write(&path, "recommendation_delay_ms = 5\n").unwrap();
        assert!(!write_default_config_to(&path).unwrap());
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "recommendation_delay_ms = 5\n"
        );

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bad_types_are_errors() {
        assert!(parse_config("recommendation_delay_ms = \"soon\"").is_err());
    }
}
