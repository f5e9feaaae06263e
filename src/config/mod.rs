use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct DbConfig {
    pub location: String,
}

/// config properties for the object-storage stand-in that keeps file bodies on disk
#[derive(Deserialize, Clone)]
pub struct StorageConfig {
    pub location: String,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
pub struct ConductorConfig {
    pub database: DbConfig,
    pub storage: StorageConfig,
}

/// Parses the config file located at ./Conductor.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> ConductorConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./Conductor.toml"))
        .build();
    // some errors are fine, such as not found
    if let Err(ConfigError::Foreign(e)) = builder {
        let message = e.to_string();
        if message.contains("not found") {
            log::warn!("No config file found. Continuing startup...");
            return CONDUCTOR_CONFIG_DEFAULT.clone();
        }
        panic!("Failed to parse config file. Exception is {e}");
        // basically everything else is unrecoverable, though
    } else if let Err(e) = builder {
        log::error!("Failed to parse config file. Exception is {e}");
        panic!("Failed to parse config file. Exception is {e}");
    }
    let settings = builder.unwrap();
    settings
        .try_deserialize()
        .unwrap_or(CONDUCTOR_CONFIG_DEFAULT.clone())
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static CONDUCTOR_CONFIG: Lazy<ConductorConfig> = Lazy::new(parse_config);
static CONDUCTOR_CONFIG_DEFAULT: Lazy<ConductorConfig> = Lazy::new(|| ConductorConfig {
    database: DbConfig {
        location: "./conductor.sqlite".to_string(),
    },
    storage: StorageConfig {
        location: "./project_files".to_string(),
    },
});
