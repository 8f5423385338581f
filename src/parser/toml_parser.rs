// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use serde::Deserialize;
use toml::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HookError, Result};

/// Заглушка которую вставляет хук если схему не удалось найти ни в одном источнике
pub const DEFAULT_FALLBACK: &str = "<customurl>";

/// Имя переменной плагина, переменной окружения и ключа в config.xml
pub const DEFAULT_KEY: &str = "ANDROID_SCHEME";

/// Имя конфига хука в корне проекта
pub const PROJECT_CONFIG: &str = "scheme-hook.toml";

/// Функция для парсинга toml конфигов хука. Конфигов может быть несколько
/// (пользовательский, проектный, явно переданный), поэтому передаётся вектор путей.
/// Более поздние файлы перекрывают более ранние по ключам
pub fn load<P: AsRef<Path>>(paths: Vec<P>) -> Result<HookConfig> {
    if paths.is_empty() {
        return Ok(HookConfig::default());
    }

    let mut merged_value = Value::Table(toml::map::Map::new());

    for path in paths {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref)
            .map_err(|e| HookError::io(path_ref, e))?;

        let value: Value = toml::from_str(&content)
            .map_err(|e| HookError::config_syntax(path_ref, e))?;

        merge_toml_values(&mut merged_value, value);
    }

    let config: HookConfig = merged_value.try_into()?;

    Ok(config)
}

/// Собирает список конфигов в порядке приоритета. Пользовательский и проектный
/// конфиги необязательны и берутся только если существуют, явно переданный
/// через --config берётся всегда (если его нет, load вернёт ошибку чтения)
pub fn config_paths(project_root: &Path, explicit: Option<&Path>) -> Vec<PathBuf> {
    config_paths_in(dirs::home_dir().as_deref(), project_root, explicit)
}

/// То же что config_paths, но домашняя директория передаётся явно
pub fn config_paths_in(home: Option<&Path>, project_root: &Path, explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home) = home {
        let user_config = home.join(".scheme-hook").join("config.toml");
        if user_config.is_file() {
            paths.push(user_config);
        }
    }

    let project_config = project_root.join(PROJECT_CONFIG);
    if project_config.is_file() {
        paths.push(project_config);
    }

    if let Some(p) = explicit {
        paths.push(p.to_path_buf());
    }

    paths
}

/// Сливает toml таблицы рекурсивно, значение из append заменяет значение из base
fn merge_toml_values(base: &mut Value, append: Value) {
    match (base, append) {
        (Value::Table(base_map), Value::Table(append_map)) => {
            for (k, v) in append_map {
                let base_entry = base_map.entry(k).or_insert(Value::Table(toml::map::Map::new()));
                merge_toml_values(base_entry, v);
            }
        }
        (base_val, append_val) => *base_val = append_val,
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct HookConfig {
    #[serde(default)]
    pub scheme: SchemeSection,

    #[serde(default)]
    pub manifest: ManifestSection,

    #[serde(default)]
    pub options: Options,
}

#[derive(Debug, Deserialize, Default)]
pub struct SchemeSection {
    // Последний запасной вариант схемы
    pub fallback: Option<String>,

    // Имя ключа, по умолчанию ANDROID_SCHEME
    pub key: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ManifestSection {
    // Дополнительные пути к манифестам относительно корня проекта
    #[serde(default)]
    pub candidates: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Options {
    #[serde(default)]
    pub verbose: bool,

    #[serde(default, alias = "dry_run")]
    pub dry_run: bool,
}

impl HookConfig {
    pub fn fallback(&self) -> &str {
        self.scheme.fallback.as_deref().unwrap_or(DEFAULT_FALLBACK)
    }

    pub fn key(&self) -> &str {
        match self.scheme.key.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => k,
            _ => DEFAULT_KEY,
        }
    }
}
