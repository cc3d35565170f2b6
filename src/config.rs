use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub job: Job,
    #[serde(default)]
    pub shop: Shop,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub mail: Mail,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// A stable, normalization-friendly string for hashing.
    pub fn normalized_for_hash(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            job: Default::default(),
            shop: Default::default(),
            catalog: Default::default(),
            mail: Default::default(),
            output: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub only_last_stock: bool,
    pub notify_email: String,
    pub send_notification: bool,
}
impl Default for Job {
    fn default() -> Self {
        Self {
            only_last_stock: false,
            notify_email: "".into(),
            send_notification: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Shop {
    pub base_url: String,
    pub api_user: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}
impl Default for Shop {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".into(),
            api_user: "".into(),
            api_key: "".into(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub page_size: u32,
    pub follow_pages: bool,
}
impl Default for Catalog {
    fn default() -> Self {
        Self {
            page_size: 1000,
            follow_pages: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Mail {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub from_name: String,
    pub system_address: String,
}
impl Default for Mail {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".into(),
            smtp_port: 25,
            from_address: "".into(),
            from_name: "".into(),
            system_address: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub out_dir: String,
    pub write_report_json: bool,
    pub report_filename: String,
    pub write_index_json: bool,
    pub print_summary: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            out_dir: "out".into(),
            write_report_json: true,
            report_filename: "report.json".into(),
            write_index_json: true,
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: true,
            file_path: "".into(),
        }
    }
}
