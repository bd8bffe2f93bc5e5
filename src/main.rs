// ShaderKit
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderkit
// SPDX-License-Identifier: GPL-3.0-or-later

mod app;
mod cli;
mod preset;
mod viewer;

pub const APP_NAME: &str = "shaderkit";
pub const APP_ABOUT: &str = "GLSL shader preset viewer";
pub const APP_AUTHOR: &str = "Harlen Batagelo, hbatagelo@gmail.com";
pub const APP_ID: &str = "com.github.hbatagelo.shaderkit";
pub const APP_SEMVER: &str = "0.1.0";
pub const GL_VERSION: (i32, i32) = (3, 3);

fn main() -> gtk::glib::ExitCode {
    simple_logger::SimpleLogger::new()
        .with_level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init()
        .unwrap();

    let cli_config = cli::parse_args().unwrap_or_else(|err| {
        log::warn!("{err}. Using the builtin preset.");
        cli::CliConfig::default()
    });

    app::run(cli_config)
}
