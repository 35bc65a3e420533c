use molviz::engine::config::GeometryConfig;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupSettings {
    pub pubchem_url: String,
    pub translate_url: String,
    pub timeout: Duration,
    /// Whether Hebrew names go through the translation service.
    pub translate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub geometry: GeometryConfig,
    pub lookup: LookupSettings,
}
