// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::path::{Path, PathBuf};

/// Ошибки которые не относятся к обычным исходам хука (нет манифеста, нет
/// якоря и т.д.). Такие ошибки ловятся на самом верху и только логируются
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("io error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("toml syntax error {path:?}: {source}")]
    ConfigSyntax {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config structure error: {0}")]
    ConfigStructure(#[from] toml::de::Error),
}

impl HookError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn config_syntax(path: &Path, source: toml::de::Error) -> Self {
        Self::ConfigSyntax {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HookError>;
