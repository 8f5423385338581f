// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

#[macro_use]
mod logger;

mod context;
mod error;
mod parser;
mod frontend;
mod resolver;

use std::env;

use clap::Parser;

use context::Cli;
use frontend::RunSummary;
use parser::toml_parser;
use frontend::manifest::FileState;

fn main() {
    let (ctx, explicit_config) = Cli::parse().into_context();

    hook!("after_prepare: custom URL scheme for {}", ctx.project_root.display());

    let config_paths = toml_parser::config_paths(&ctx.project_root, explicit_config.as_deref());

    // Хук необязательный, поэтому процесс всегда завершается успешно, даже
    // если что-то пошло не так. Проблемы уже выведены в лог

    match frontend::execute(&ctx, config_paths, |key| env::var(key).ok()) {
        Some(RunSummary::Processed { scheme, files }) => {
            let patched = files.iter()
                .filter(|f| f.state == FileState::Patched)
                .count();

            for report in &files {
                if let FileState::Failed(reason) = &report.state {
                    error!("{} left unchanged: {}", report.path.display(), reason);
                }
            }

            info!("Done: scheme \"{}\", {} of {} manifest(s) patched", scheme.value, patched, files.len());
        }

        Some(RunSummary::NoManifest) | Some(RunSummary::SchemeUnresolved) | None => {}
    }
}
