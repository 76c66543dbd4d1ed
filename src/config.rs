use std::{env, path::PathBuf};

use color_eyre::{Result, eyre::Context};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Knobs of the demo form.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// How long a submit keeps the button loading and the overlay up.
    pub submit_delay_ms: u64,
    /// Start with the hourglass spinner instead of the default ring.
    pub custom_spinner: bool,
    /// Overlay spinner size in points.
    pub spinner_size: u16,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            custom_spinner: false,
            spinner_size: formkit::theme::SPINNER_SIZE,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

impl Config {
    /// Layers, lowest priority first: built-in defaults, the optional
    /// `config.{toml,json5,yaml,...}` in the config directory, then the CLI.
    pub fn new(cli_source: Option<crate::cli::ClapSource>) -> Result<Self> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("config_dir", config_dir.to_string_lossy().as_ref())?
            .add_source(
                config::File::with_name(&config_dir.join("config").to_string_lossy())
                    .required(false),
            );

        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;

        Ok(cfg)
    }
}

fn dir_from_env(suffix: &str) -> Option<PathBuf> {
    env::var(format!("{}_{suffix}", PROJECT_NAME.clone()))
        .ok()
        .map(PathBuf::from)
}

pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = dir_from_env("DATA") {
        dir
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = dir_from_env("CONFIG") {
        dir
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "formkit", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::tempdir_in;

    use crate::cli::{ClapSource, Cli};

    use super::*;

    #[test]
    fn data_dir_from_env() {
        let temp_data = tempdir_in(".").unwrap();

        temp_env::with_vars(
            [(
                format!("{}_DATA", PROJECT_NAME.clone()).as_str(),
                Some(temp_data.path().to_str().unwrap()),
            )],
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.config.data_dir, temp_data.path());
            },
        );
    }

    #[test]
    fn data_dir_from_cli() {
        let args = Cli::parse_from(["test-config", "--data-dir", ".cli-data"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.config.data_dir, PathBuf::from(".cli-data"));
    }

    #[test]
    fn gallery_defaults() {
        let temp_config = tempdir_in(".").unwrap();
        temp_env::with_var(
            format!("{}_CONFIG", PROJECT_NAME.clone()),
            Some(temp_config.path()),
            || {
                let args = Cli::parse_from(["test-config"]);
                let config =
                    Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");
                assert_eq!(config.gallery.submit_delay_ms, 1500);
                assert!(!config.gallery.custom_spinner);
                assert_eq!(config.gallery.spinner_size, 50);
            },
        );
    }

    #[test]
    fn gallery_from_file_then_cli() {
        let temp_config = tempdir_in(".").unwrap();
        std::fs::write(
            temp_config.path().join("config.json5"),
            "{ gallery: { submit_delay_ms: 200, spinner_size: 30 } }",
        )
        .unwrap();

        temp_env::with_var(
            format!("{}_CONFIG", PROJECT_NAME.clone()),
            Some(temp_config.path()),
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.config.config_dir, temp_config.path());
                assert_eq!(config.gallery.submit_delay_ms, 200);
                assert_eq!(config.gallery.spinner_size, 30);

                let args = Cli::parse_from(["test-config", "--submit-delay-ms", "10", "--custom-spinner"]);
                let config = Config::new(Some(ClapSource::new(&args))).unwrap();
                assert_eq!(config.gallery.submit_delay_ms, 10);
                assert!(config.gallery.custom_spinner);
                assert_eq!(config.gallery.spinner_size, 30);
            },
        );
    }
}
