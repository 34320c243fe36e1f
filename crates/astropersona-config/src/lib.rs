use astropersona::chart::ChartSettings;
use astropersona::ephemeris::HouseSystem;
use chrono::NaiveTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

const MAX_ORB_LIMIT: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Swiss Ephemeris data directory, if configured
    pub ephemeris_path: Option<PathBuf>,
    pub chart: ChartSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartToml {
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default = "default_max_orb")]
    max_orb: f64,
    #[serde(default = "default_time")]
    default_time: String,
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_max_orb() -> f64 {
    astropersona::aspects::DEFAULT_MAX_ORB
}

fn default_time() -> String {
    "12:00".to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    chart: Option<ChartToml>,
}

/// Try common relative paths for `configs/astropersona.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/astropersona.toml", "../../configs/astropersona.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load astropersona.toml from {:?}", paths);
}

/// Parse and validate settings from TOML text. Missing sections take defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<AppSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse astropersona.toml: {e}"))?;

    let chart = match root.chart {
        Some(chart) => chart_settings(chart)?,
        None => ChartSettings::default(),
    };

    Ok(AppSettings {
        ephemeris_path: root.ephemeris.path,
        chart,
    })
}

fn chart_settings(cfg: ChartToml) -> anyhow::Result<ChartSettings> {
    let ChartToml {
        house_system,
        max_orb,
        default_time,
    } = cfg;

    let house_system: HouseSystem = house_system
        .parse()
        .map_err(|e| anyhow::anyhow!("chart.house_system: {e}"))?;

    if !(max_orb > 0.0 && max_orb <= MAX_ORB_LIMIT) {
        anyhow::bail!("chart.max_orb must be in (0, {MAX_ORB_LIMIT}], got {max_orb}");
    }

    let default_time = ["%H:%M", "%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&default_time, fmt).ok())
        .ok_or_else(|| anyhow::anyhow!("chart.default_time is not HH:MM: {default_time:?}"))?;

    Ok(ChartSettings {
        house_system,
        max_orb,
        default_time,
    })
}

/// Load settings from the default search paths, applying the environment override.
pub fn load_settings() -> anyhow::Result<AppSettings> {
    let text = read_config_toml_text()?;
    finish(parse_settings(&text)?)
}

/// Load settings from an explicit file, applying the environment override.
pub fn load_settings_from(path: &Path) -> anyhow::Result<AppSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    finish(parse_settings(&text)?)
}

fn finish(mut settings: AppSettings) -> anyhow::Result<AppSettings> {
    let env_path = std::env::var(EPHEMERIS_PATH_ENV).ok();
    settings.ephemeris_path = resolve_ephemeris_path(settings.ephemeris_path, env_path.as_deref());
    Ok(settings)
}

/// The environment variable wins over the configured path; empty values are ignored.
pub fn resolve_ephemeris_path(configured: Option<PathBuf>, env: Option<&str>) -> Option<PathBuf> {
    match env.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Some(PathBuf::from(v)),
        None => configured,
    }
}
