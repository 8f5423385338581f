// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fmt;
use std::path::Path;

use crate::parser::config_xml;

/// Источник схемы. Источники передаются в resolve списком в порядке приоритета,
/// поэтому ни окружение, ни контекст сборки напрямую здесь не читаются
pub enum SchemeSource<'a> {
    /// Переменная плагина из контекста сборки (--var ANDROID_SCHEME=...)
    PluginVariable(Option<&'a str>),

    /// Значение переменной окружения, уже прочитанное вызывающим кодом
    Environment(Option<String>),

    /// config.xml в корне проекта, читается только если до него дошла очередь
    ConfigXml(&'a Path),

    /// Заглушка на самый крайний случай
    Fallback(&'a str),
}

impl SchemeSource<'_> {
    fn lookup(&self, key: &str) -> Option<String> {
        match self {
            SchemeSource::PluginVariable(v) => v.map(str::to_string),
            SchemeSource::Environment(v) => v.clone(),
            SchemeSource::ConfigXml(root) => match config_xml::read_scheme(root, key) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Could not read {}: {}", config_xml::CONFIG_XML, e);
                    None
                }
            },
            SchemeSource::Fallback(v) => Some(v.to_string()),
        }
    }

    fn origin(&self) -> Origin {
        match self {
            SchemeSource::PluginVariable(_) => Origin::PluginVariable,
            SchemeSource::Environment(_) => Origin::Environment,
            SchemeSource::ConfigXml(_) => Origin::ConfigXml,
            SchemeSource::Fallback(_) => Origin::Fallback,
        }
    }
}

/// Откуда в итоге взялась схема, нужно для логов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    PluginVariable,
    Environment,
    ConfigXml,
    Fallback,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Origin::PluginVariable => "plugin variable",
            Origin::Environment => "environment",
            Origin::ConfigXml => "config.xml",
            Origin::Fallback => "fallback",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScheme {
    pub value: String,
    pub origin: Origin,
}

/// Идёт по источникам по порядку и останавливается на первом непустом (после
/// trim) значении. Если даже заглушка пустая, возвращает None и хук должен
/// остановиться с предупреждением
pub fn resolve(key: &str, sources: &[SchemeSource]) -> Option<ResolvedScheme> {
    sources.iter().find_map(|source| {
        let value = source.lookup(key)?;
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return None;
        }

        Some(ResolvedScheme {
            value: trimmed.to_string(),
            origin: source.origin(),
        })
    })
}
