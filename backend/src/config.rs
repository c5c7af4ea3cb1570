use rocket::figment::Figment;
use serde::Deserialize;

const DEFAULT_DATABASE_URL: &str = "sqlite://polls.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    Sqlite,
}

/// Application settings read from the same figment as Rocket's own config:
/// `Rocket.toml` overlaid by `ROCKET_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_store")]
    pub store: StoreKind,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_store() -> StoreKind {
    StoreKind::Sqlite
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.into()
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self, rocket::figment::Error> {
        figment.extract()
    }
}
