use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between two consecutive UPS polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Host of the monitored UPS (SNMP agent)
    pub ups_host: String,
    #[serde(default = "default_ups_port")]
    pub ups_port: u16,
    /// SNMP v2c community string
    #[serde(default = "default_community")]
    pub snmp_community: String,
    /// Host of the SMS gateway
    pub gateway_host: String,
    pub gateway_port: u16,
    /// Comma-separated recipient phone numbers, in send order
    pub phone_numbers: String,
    /// Log file path; stderr when absent
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_poll_interval() -> u64 {
    60
}

fn default_ups_port() -> u16 {
    161
}

fn default_community() -> String {
    "public".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            ups_host: String::new(),
            ups_port: default_ups_port(),
            snmp_community: default_community(),
            gateway_host: String::new(),
            gateway_port: 0,
            phone_numbers: String::new(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load the configuration from an explicit path, or from the
    /// platform config directory when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::get_config_path()?,
        };

        let data = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be greater than zero");
        }
        if self.ups_host.is_empty() {
            bail!("ups_host must not be empty");
        }
        if self.gateway_host.is_empty() {
            bail!("gateway_host must not be empty");
        }
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("upswatch").join("config.json"))
    }

    /// Recipient list in configured order. Entries keep their
    /// surrounding whitespace; the gateway layer trims at send time.
    pub fn recipients(&self) -> Vec<String> {
        self.phone_numbers
            .split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| entry.to_string())
            .collect()
    }

    pub fn ups_addr(&self) -> String {
        format!("{}:{}", self.ups_host, self.ups_port)
    }

    pub fn gateway_addr(&self) -> String {
        format!("{}:{}", self.gateway_host, self.gateway_port)
    }
}
