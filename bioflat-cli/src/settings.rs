use std::path::Path;

use anyhow::{Context, Result};
use bioflat_core::Config;
use clap::{Arg, ArgAction, ArgMatches};

pub const CONFIG_ARG: &str = "config";
pub const STRICT_ARG: &str = "strict";

pub fn config_arg() -> Arg {
    Arg::new(CONFIG_ARG)
        .long(CONFIG_ARG)
        .value_name("TOML")
        .global(true)
        .help("Path to a bioflat TOML configuration file")
}

pub fn strict_arg() -> Arg {
    Arg::new(STRICT_ARG)
        .long(STRICT_ARG)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Fail on the first malformed line instead of skipping it")
}

///
/// Load the configuration named by `--config` (or the defaults) and apply
/// `--strict` on top of it.
///
pub fn load_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<String>(CONFIG_ARG) {
        Some(path) => Config::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => Config::default(),
    };

    if matches.get_flag(STRICT_ARG) {
        config.reader.strict = true;
    }

    Ok(config)
}
