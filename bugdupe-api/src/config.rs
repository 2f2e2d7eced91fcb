use std::str::FromStr;

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub devops: DevOpsSettings,
    pub search: SearchSettings,
    pub openai: OpenAiSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Directory holding the prebuilt browser bundle.
    pub static_dir: String,
}

#[derive(Deserialize, Clone)]
pub struct DevOpsSettings {
    pub organization: String,
    pub project: String,
    pub pat: String,
    /// Default work-item type for batch imports.
    pub item_type: String,
    /// Default creation-date lower bound for batch imports (YYYY-MM-DD).
    pub start_date: String,
    pub staging_dir: String,
    pub page_size: usize,
}

#[derive(Deserialize, Clone)]
pub struct SearchSettings {
    pub service_name: String,
    pub index_name: String,
    pub api_key: String,
}

#[derive(Deserialize, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub embedding_model: String,
    pub chat_model: String,
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .expect("Failed to parse APP_ENVIRONMENT");
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("BUGDUPE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
