use molviz::engine::config::GeometryConfig;

pub const PUBCHEM_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound";
pub const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

pub struct DefaultsConfig {
    pub geometry: GeometryConfig,
    pub pubchem_url: String,
    pub translate_url: String,
    pub timeout_secs: u64,
    pub translate: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            pubchem_url: PUBCHEM_URL.to_string(),
            translate_url: TRANSLATE_URL.to_string(),
            timeout_secs: 30,
            translate: true,
        }
    }
}
