use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Name of the environment variable selecting the optional overlay file,
/// e.g. `APP_ENVIRONMENT=test` reads `configuration/test.yaml` on top of `base.yaml`.
pub const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    config_from_directory(&base_path.join("configuration"))
}

pub fn config_from_directory<Settings: DeserializeOwned>(
    configuration_directory: &Path,
) -> anyhow::Result<Settings> {
    let environment = std::env::var(ENVIRONMENT_VARIABLE).ok();
    let mut builder = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")));

    if let Some(environment) = environment {
        builder = builder.add_source(
            config::File::from(configuration_directory.join(format!("{environment}.yaml")))
                .required(false),
        );
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
