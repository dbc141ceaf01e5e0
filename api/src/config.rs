//! Startup configuration loading

use sf_shared::{AppConfig, Environment};

/// Configuration problems that prevent the server from starting
#[derive(Debug)]
pub struct ConfigProblems(pub Vec<String>);

impl std::fmt::Display for ConfigProblems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid configuration: {}", self.0.join("; "))
    }
}

impl std::error::Error for ConfigProblems {}

/// Load `.env` files into the process environment
///
/// The environment specific file (`.env.production`, ...) is read first so
/// its values win over the generic `.env`. Variables already set in the
/// process are never overridden.
pub fn load_env_files() -> Environment {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();
    Environment::from_env()
}

/// Read the configuration from the environment and reject unsafe settings
pub fn load_config() -> Result<AppConfig, ConfigProblems> {
    let config = AppConfig::from_env();
    check(config)
}

fn check(config: AppConfig) -> Result<AppConfig, ConfigProblems> {
    let problems = config.validate();
    if problems.is_empty() {
        Ok(config)
    } else {
        Err(ConfigProblems(problems))
    }
}
