use std::{str::FromStr, time::Duration};

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::{
    nominatim::DEFAULT_NOMINATIM_URL,
    overpass::DEFAULT_OVERPASS_URL,
    search::{DEFAULT_MAX_RADIUS_METERS, DEFAULT_RADIUS_METERS},
    summary::DEFAULT_SUMMARY_LIMIT,
};

const ENV_PREFIX: &str = "OSM_FINDER_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Stdio,
}

impl FromStr for Transport {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "stdio" => Ok(Self::Stdio),
            other => Err(eyre!("unknown transport {other:?}, expected http or stdio")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the http transport listens on
    pub bind_addr: String,
    pub transport: Transport,
    pub overpass_url: String,
    pub overpass_timeout: Duration,
    /// Base url, `/search` and `/reverse` are appended
    pub nominatim_url: String,
    pub nominatim_timeout: Duration,
    /// Spacing between geocoding calls; the public Nominatim asks for 1s
    pub nominatim_min_interval: Duration,
    /// Sent on every upstream request
    pub user_agent: String,
    pub default_radius_meters: u32,
    pub max_radius_meters: u32,
    /// Places listed in the text summary
    pub summary_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            transport: Transport::Http,
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            overpass_timeout: Duration::from_secs(30),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            nominatim_timeout: Duration::from_secs(10),
            nominatim_min_interval: Duration::from_millis(1000),
            user_agent: "OSM-Finder-App/1.0".to_string(),
            default_radius_meters: DEFAULT_RADIUS_METERS,
            max_radius_meters: DEFAULT_MAX_RADIUS_METERS,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; `lookup` gets the full `OSM_FINDER_*` name
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut config = Self::default();

        if let Some(addr) = var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(transport) = var("TRANSPORT") {
            config.transport = transport.parse()?;
        }
        if let Some(url) = var("OVERPASS_URL") {
            config.overpass_url = url;
        }
        if let Some(secs) = var("OVERPASS_TIMEOUT_SECS") {
            config.overpass_timeout = Duration::from_secs(parse("OVERPASS_TIMEOUT_SECS", &secs)?);
        }
        if let Some(url) = var("NOMINATIM_URL") {
            config.nominatim_url = url;
        }
        if let Some(secs) = var("NOMINATIM_TIMEOUT_SECS") {
            config.nominatim_timeout =
                Duration::from_secs(parse("NOMINATIM_TIMEOUT_SECS", &secs)?);
        }
        if let Some(ms) = var("NOMINATIM_MIN_INTERVAL_MS") {
            config.nominatim_min_interval =
                Duration::from_millis(parse("NOMINATIM_MIN_INTERVAL_MS", &ms)?);
        }
        if let Some(agent) = var("USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(radius) = var("DEFAULT_RADIUS_METERS") {
            config.default_radius_meters = parse("DEFAULT_RADIUS_METERS", &radius)?;
        }
        if let Some(radius) = var("MAX_RADIUS_METERS") {
            config.max_radius_meters = parse("MAX_RADIUS_METERS", &radius)?;
        }
        if let Some(limit) = var("SUMMARY_LIMIT") {
            config.summary_limit = parse("SUMMARY_LIMIT", &limit)?;
        }

        if config.default_radius_meters == 0
            || config.default_radius_meters > config.max_radius_meters
        {
            return Err(eyre!(
                "default radius {} must be between 1 and the max radius {}",
                config.default_radius_meters,
                config.max_radius_meters
            ));
        }
        Ok(config)
    }
}

fn parse<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .wrap_err_with(|| format!("{ENV_PREFIX}{name} has an invalid value {value:?}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.transport, Transport::Http);
        assert_eq!(config.default_radius_meters, 1000);
        assert_eq!(config.nominatim_min_interval, Duration::from_secs(1));
        assert_eq!(config.overpass_url, "https://overpass-api.de/api/interpreter");
    }

    #[test]
    fn env_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("OSM_FINDER_TRANSPORT", "STDIO"),
            ("OSM_FINDER_OVERPASS_TIMEOUT_SECS", "5"),
            ("OSM_FINDER_NOMINATIM_MIN_INTERVAL_MS", "250"),
            ("OSM_FINDER_SUMMARY_LIMIT", "3"),
        ]))
        .unwrap();
        assert_eq!(config.transport, Transport::Stdio);
        assert_eq!(config.overpass_timeout, Duration::from_secs(5));
        assert_eq!(config.nominatim_min_interval, Duration::from_millis(250));
        assert_eq!(config.summary_limit, 3);
    }

    #[test]
    fn bad_numbers_are_errors() {
        let err = Config::from_lookup(lookup(&[("OSM_FINDER_MAX_RADIUS_METERS", "far")]))
            .unwrap_err();
        assert!(err.to_string().contains("OSM_FINDER_MAX_RADIUS_METERS"));
    }

    #[test]
    fn default_radius_must_fit_under_max() {
        assert!(Config::from_lookup(lookup(&[
            ("OSM_FINDER_DEFAULT_RADIUS_METERS", "5000"),
            ("OSM_FINDER_MAX_RADIUS_METERS", "2000"),
        ]))
        .is_err());
    }
}
