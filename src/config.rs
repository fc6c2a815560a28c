//! Configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Market-data book depth per side.
    pub depth: usize,
    pub inputs: InputConfig,
    /// Directory for the historical audit files.
    pub output_dir: PathBuf,
    pub gui: GuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub trades: PathBuf,
    pub marketdata: PathBuf,
    pub prices: PathBuf,
    pub inquiries: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuiConfig {
    pub throttle_millis: i64,
    pub max_updates: u32,
    pub output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            inputs: InputConfig {
                trades: PathBuf::from("trades.txt"),
                marketdata: PathBuf::from("marketdata.txt"),
                prices: PathBuf::from("prices.txt"),
                inquiries: PathBuf::from("inquiries.txt"),
            },
            output_dir: PathBuf::from("outputs"),
            gui: GuiConfig {
                throttle_millis: 300,
                max_updates: 100,
                output: PathBuf::from("gui.txt"),
            },
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
