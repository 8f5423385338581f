// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Оркестратор запускает скриптовые хуки с корнем проекта первым аргументом
/// и с рабочей директорией в корне проекта. Поэтому все аргументы необязательные
#[derive(Parser, Debug)]
#[command(
    name = "scheme-hook",
    version,
    about = "after_prepare hook: adds a custom URL scheme intent-filter to AndroidManifest.xml"
)]
pub struct Cli {
    #[command(subcommand)]
    pub action: Option<Actions>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Действие хука. Без подкоманды это patch с аргументами верхнего уровня
#[derive(Subcommand, Debug, Clone)]
pub enum Actions {
    /// Insert the intent-filter and write the manifest (default)
    Patch(RunArgs),

    /// Report what would change without writing anything
    Check(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Project root (defaults to the current directory)
    pub project_root: Option<PathBuf>,

    /// Plugin variable supplied by the build, e.g. --var ANDROID_SCHEME=myapp
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_variable)]
    pub variables: Vec<(String, String)>,

    /// Extra config file, applied after the user and project configs
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not write manifests
    #[arg(long)]
    pub dry_run: bool,

    /// Print diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunArgs {
    /// Аргументы до подкоманды и после неё складываются: значения подкоманды
    /// важнее, переменные объединяются, флаги складываются через или
    fn merge(self, sub: RunArgs) -> RunArgs {
        let mut variables = self.variables;
        variables.extend(sub.variables);

        RunArgs {
            project_root: sub.project_root.or(self.project_root),
            variables,
            config: sub.config.or(self.config),
            dry_run: self.dry_run || sub.dry_run,
            verbose: self.verbose || sub.verbose,
        }
    }
}

fn parse_variable(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// То что хук получает от оркестратора сборки: корень проекта и переменные плагина
#[derive(Debug, Clone, Default)]
pub struct HookContext {
    pub project_root: PathBuf,
    pub plugin_variables: HashMap<String, String>,
    pub dry_run: bool,
    pub verbose: bool,
}

impl HookContext {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Default::default()
        }
    }

    pub fn with_variable(mut self, key: &str, value: &str) -> Self {
        self.plugin_variables.insert(key.to_string(), value.to_string());
        self
    }

    pub fn plugin_variable(&self, key: &str) -> Option<&str> {
        self.plugin_variables.get(key).map(String::as_str)
    }
}

impl Cli {
    /// Превращает аргументы в контекст хука. Если корень не передан, берётся
    /// текущая директория
    pub fn into_context(self) -> (HookContext, Option<PathBuf>) {
        let (run, check) = match self.action {
            Some(Actions::Patch(sub)) => (self.run.merge(sub), false),
            Some(Actions::Check(sub)) => (self.run.merge(sub), true),
            None => (self.run, false),
        };

        let root = run.project_root.unwrap_or_else(|| PathBuf::from("."));

        let mut context = run.variables.iter()
            .fold(HookContext::new(root), |ctx, (k, v)| ctx.with_variable(k, v));

        context.dry_run = run.dry_run || check;
        context.verbose = run.verbose;

        (context, run.config)
    }
}
