use config::{Config, ConfigError, File};
use serde::Deserialize;
use shared::{HolidayPolicy, ShiftTypeKey};

use crate::domain::fairness::FairnessConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub data_service: DataServiceSettings,
    pub team: TeamSettings,
    pub fairness: FairnessSettings,
    pub apply: ApplySettings,
    pub shift_types: Vec<ShiftTypeSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataServiceSettings {
    pub url: String,
}

/// IANA zone a team's shift-type window rules are anchored to — the spec's
/// window rules ("Monday 08:00 local") are defined in local time, so this is
/// the one piece of config that turns them into `DateTime<Utc>` instants.
#[derive(Debug, Deserialize, Clone)]
pub struct TeamSettings {
    pub timezone: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FairnessWeights {
    pub individual: f64,
    pub system: f64,
    pub under_load: f64,
}

/// `fairness.*` — ranking weights and penalty scale are policy, not code
/// (§9), so operators can retune them without rebuilding.
#[derive(Debug, Deserialize, Clone)]
pub struct FairnessSettings {
    pub history_window_days: i64,
    pub scale: f64,
    pub weights: FairnessWeights,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplySettings {
    pub default_deadline_ms: u64,
    pub strict_default: bool,
}

/// One `[[shift_types]]` table: the only shift-type-specific knowledge the
/// engine needs, matching `ShiftTypePolicy` field for field.
#[derive(Debug, Deserialize, Clone)]
pub struct ShiftTypeSettings {
    pub key: ShiftTypeKey,
    pub label: String,
    pub mutex_group: Option<String>,
    pub fairness_weight: u32,
    pub holiday_policy: HolidayPolicy,
    pub priority: u8,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Falls back to the spec's default team zone if `team.timezone` doesn't
    /// parse as an IANA name, rather than failing startup over a typo.
    pub fn team_timezone(&self) -> chrono_tz::Tz {
        self.team
            .timezone
            .parse()
            .unwrap_or(chrono_tz::Europe::Amsterdam)
    }

    pub fn fairness_config(&self) -> FairnessConfig {
        FairnessConfig {
            individual_weight: self.fairness.weights.individual,
            system_weight: self.fairness.weights.system,
            under_load_weight: self.fairness.weights.under_load,
            scale: self.fairness.scale,
        }
    }
}
