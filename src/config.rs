use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub table_count: i32,
    pub bootstrap: BootstrapConfig,
}

/// Knobs for the idempotent startup seed. The domain logic never depends on
/// seed data existing; this only makes a fresh install usable.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub enabled: bool,
    pub seed_demo_menu: bool,
    pub default_password: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let table_count = env::var("TABLE_COUNT")
            .ok()
            .and_then(|n| n.parse::<i32>().ok())
            .unwrap_or(20);

        let bootstrap = BootstrapConfig {
            enabled: env_flag("BOOTSTRAP_ENABLED", true),
            seed_demo_menu: env_flag("BOOTSTRAP_SEED_DEMO_MENU", true),
            default_password: env::var("BOOTSTRAP_DEFAULT_PASSWORD")
                .unwrap_or_else(|_| "password123".to_string()),
        };

        Ok(Self {
            database_url,
            host,
            port,
            table_count,
            bootstrap,
        })
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(default)
}
