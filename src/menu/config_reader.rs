use std::fs;

use serde::Deserialize;

use crate::menu::*;

/// The content of a `--config` file. All the fields are optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Deserialize)]
pub struct BallotConfig {
    pub capacity: Option<usize>,
    #[serde(rename = "maxNameLength")]
    pub max_name_length: Option<usize>,
    #[serde(default)]
    pub candidates: Vec<String>,
}

/// Everything needed to start a session, once the arguments and the
/// configuration file are merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub rules: RegistryRules,
    pub candidates: Vec<String>,
}

impl Settings {
    /// A registry with the rules and the candidates already registered, in order.
    pub fn build_registry(&self) -> MenuResult<Registry> {
        let mut registry = Registry::new(&self.rules);
        for name in self.candidates.iter() {
            registry
                .add_candidate(name)
                .context(PreRegisteringSnafu { name: name.clone() })?;
        }
        Ok(registry)
    }
}

pub fn read_config(path: &str) -> MenuResult<BallotConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    debug!("read content: {:?}", contents);
    let config: BallotConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    Ok(config)
}

/// Command line values take precedence over the configuration file.
pub fn load_settings(args: &Args) -> MenuResult<Settings> {
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => BallotConfig::default(),
    };
    debug!("config: {:?}", config);

    let rules = validate_rules(&config, args)?;

    let mut candidates = config.candidates;
    if let Some(extra) = &args.candidates {
        candidates.extend(extra.iter().cloned());
    }

    Ok(Settings { rules, candidates })
}

fn validate_rules(config: &BallotConfig, args: &Args) -> MenuResult<RegistryRules> {
    let defaults = RegistryRules::DEFAULT_RULES;
    let capacity = match args.capacity.or(config.capacity) {
        Some(0) => whatever!("The capacity must allow at least one candidate"),
        Some(x) => x,
        None => defaults.capacity,
    };
    let max_name_length = match args.max_name_length.or(config.max_name_length) {
        Some(0) => whatever!("The maximum name length must be at least 1"),
        Some(x) => x,
        None => defaults.max_name_length,
    };
    Ok(RegistryRules {
        capacity,
        max_name_length,
    })
}
