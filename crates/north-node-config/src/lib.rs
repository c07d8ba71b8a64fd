use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Process configuration, read once before the first request is served
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind: String,
    pub house_system: String,
    pub node: String,
    pub use_zone_database: bool,
    pub ephemeris_path: Option<PathBuf>,
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            house_system: default_house_system(),
            node: default_node(),
            use_zone_database: true,
            ephemeris_path: None,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServerToml {
    #[serde(default = "default_bind")]
    bind: String,
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default = "default_node")]
    node: String,
    #[serde(default = "default_true")]
    use_zone_database: bool,
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
    #[serde(default)]
    cors_origins: Vec<String>,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_node() -> String {
    "true".to_string()
}

fn default_true() -> bool {
    true
}

const CONFIG_ENV: &str = "NORTH_NODE_CONFIG";

/// `$NORTH_NODE_CONFIG` if set (must exist), else the first of the common
/// relative paths that exists. `None` means run on defaults.
pub fn read_server_toml_text() -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        let text = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Could not read {} ({CONFIG_ENV}): {e}", path.display()))?;
        return Ok(Some((path, text)));
    }
    let paths = ["configs/server.toml", "../../configs/server.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), c)));
        }
    }
    Ok(None)
}

pub fn parse_server_settings(text: &str) -> anyhow::Result<ServerSettings> {
    let cfg: ServerToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse server.toml: {e}"))?;
    let ServerToml {
        bind,
        house_system,
        node,
        use_zone_database,
        ephemeris_path,
        cors_origins,
    } = cfg;

    if bind.trim().is_empty() {
        anyhow::bail!("server.toml: bind must not be empty");
    }
    if let Some(path) = &ephemeris_path {
        if !path.exists() {
            anyhow::bail!("server.toml: ephemeris_path does not exist: {}", path.display());
        }
    }

    Ok(ServerSettings {
        bind,
        house_system,
        node,
        use_zone_database,
        ephemeris_path,
        cors_origins,
    })
}

pub fn load_server_settings() -> anyhow::Result<ServerSettings> {
    match read_server_toml_text()? {
        Some((path, text)) => parse_server_settings(&text)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display())),
        None => Ok(ServerSettings::default()),
    }
}
