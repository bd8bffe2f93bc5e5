// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line interface and startup configuration.
//!
//! Resolves the initial [`Preset`] from, in order of precedence:
//!
//! 1. `--vertex`, `--fragment` and `--texture`, which override single
//!    fields of the preset;
//! 2. the `PRESET` argument;
//! 3. `$XDG_CONFIG_HOME/shaderkit/default.toml`, when it exists;
//! 4. the builtin preset.

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command};
use thiserror::Error;

use crate::{preset::*, *};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug)]
pub struct CliConfig {
    pub preset: Preset,

    /// Path of the preset file, `None` for the builtin preset.
    pub preset_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            preset: Preset::builtin(),
            preset_path: None,
        }
    }
}

fn command() -> Command {
    let path_arg = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .value_name("FILE")
            .help(help)
            .value_parser(clap::value_parser!(PathBuf))
    };

    Command::new(APP_NAME)
        .author(APP_AUTHOR)
        .version(APP_SEMVER)
        .about(APP_ABOUT)
        .arg(
            Arg::new("preset")
                .value_name("PRESET")
                .help("Path to TOML preset file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(path_arg("vertex", "Vertex shader file, overrides the preset"))
        .arg(path_arg("fragment", "Fragment shader file, overrides the preset"))
        .arg(path_arg("texture", "Image drawn on the quad, overrides the preset"))
        .after_help("Run with no arguments to use the default preset")
}

pub fn parse_args() -> Result<CliConfig, CliError> {
    config_from_matches(&command().get_matches())
}

fn config_from_matches(matches: &ArgMatches) -> Result<CliConfig, CliError> {
    let preset_path = match matches.get_one::<PathBuf>("preset") {
        Some(path) if !path.exists() => {
            return Err(CliError::InvalidInput(format!(
                "File not found: {}",
                path.display()
            )));
        }
        Some(path) => Some(path.clone()),
        None => default_preset_path().filter(|path| path.exists()),
    };

    let mut preset = match &preset_path {
        Some(path) => {
            log::info!("Loading {}", path.display());
            Preset::from_toml_file(path)?
        }
        None => Preset::builtin(),
    };

    if let Some(path) = matches.get_one::<PathBuf>("vertex") {
        preset.vertex = Some(ShaderSource::File(path.clone()));
    }
    if let Some(path) = matches.get_one::<PathBuf>("fragment") {
        preset.fragment = Some(ShaderSource::File(path.clone()));
    }
    if let Some(path) = matches.get_one::<PathBuf>("texture") {
        preset.texture = Some(path.clone());
    }

    Ok(CliConfig {
        preset,
        preset_path,
    })
}

/// `$XDG_CONFIG_HOME/shaderkit/default.toml`.
pub fn default_preset_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("default.toml"))
}
