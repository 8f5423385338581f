// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

pub mod toml_parser;
pub mod config_xml;
pub mod intent_filter;

pub use toml_parser::HookConfig;
pub use intent_filter::PatchOutcome;

use std::path::PathBuf;

use crate::error::Result;

pub fn load_config(paths: Vec<PathBuf>) -> Result<HookConfig> {
    toml_parser::load(paths)
}

pub fn patch_manifest(manifest: &str, scheme: &str) -> PatchOutcome {
    intent_filter::patch(manifest, scheme)
}
