use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub promotion: PromotionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Settings for the ready → active promotion worker.
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Run a single tick and exit, for deployments where cron owns the schedule.
    #[serde(default)]
    pub run_once: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    3600
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .set_default("database.url", "postgres://localhost/comedy_catalog")?
            .set_default("database.max_connections", 10)?
            .set_default("promotion.enabled", true)?
            .set_default("promotion.interval_secs", 3600)?
            .set_default("promotion.run_once", false)?
            .build()?;

        let config: Config = config.try_deserialize()?;
        if config.promotion.interval_secs == 0 {
            anyhow::bail!("promotion.interval_secs must be greater than zero");
        }

        Ok(config)
    }
}
