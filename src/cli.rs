use clap::Parser;
use color_eyre::Result;
use config::Source;

use crate::config::{get_config_dir, get_data_dir};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second. Drives the spinners.
    #[arg(short, long, value_name = "FLOAT", default_value_t = 10.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Path to the data directory (logs)
    #[arg(short, long, value_name = "PATH")]
    pub data_dir: Option<String>,

    /// How long a submit stays loading, in milliseconds
    #[arg(long, value_name = "MS")]
    pub submit_delay_ms: Option<u64>,

    /// Use the hourglass spinner in the overlay
    #[arg(long)]
    pub custom_spinner: bool,
}

const VERSION_MESSAGE: &str = concat!(env!("CARGO_PKG_VERSION"));

pub fn version() -> String {
    let author = clap::crate_authors!();

    let data_dir_path = get_data_dir().display().to_string();
    let config_dir_path = get_config_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}"
    )
}

#[derive(Debug, Clone)]
pub(crate) struct ClapSource {
    data_dir: Option<String>,
    submit_delay_ms: Option<u64>,
    custom_spinner: bool,
}

impl ClapSource {
    pub fn new(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            submit_delay_ms: cli.submit_delay_ms,
            custom_spinner: cli.custom_spinner,
        }
    }
}

impl Source for ClapSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut map = config::Map::new();
        if let Some(data_dir) = &self.data_dir {
            map.insert(
                "data_dir".to_string(),
                config::Value::new(None, data_dir.clone()),
            );
        }
        if let Some(delay) = self.submit_delay_ms {
            map.insert(
                "gallery.submit_delay_ms".to_string(),
                config::Value::new(None, delay),
            );
        }
        // an absent flag must not override the config file
        if self.custom_spinner {
            map.insert(
                "gallery.custom_spinner".to_string(),
                config::Value::new(None, true),
            );
        }
        Ok(map)
    }
}
