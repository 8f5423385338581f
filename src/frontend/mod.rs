// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

pub mod manifest;

use std::path::PathBuf;

use crate::context::HookContext;
use crate::error::Result;
use crate::parser::{self, HookConfig};
use crate::resolver::{self, ResolvedScheme, SchemeSource};
use manifest::{FileReport, FileState};

/// Итог одного запуска хука
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    /// Схема пустая даже после заглушки, ничего не делали
    SchemeUnresolved,

    /// Ни одного манифеста нет, платформа ещё не подготовлена
    NoManifest,

    /// Каждый найденный манифест обработан, по одному отчёту на файл
    Processed { scheme: ResolvedScheme, files: Vec<FileReport> },
}

/// Точка входа хука. Грузит конфиги по списку путей (см.
/// toml_parser::config_paths) и запускает run. Любая неожиданная ошибка
/// только логируется: хук необязательный и не должен ронять сборку
pub fn execute<F>(ctx: &HookContext, config_paths: Vec<PathBuf>, env: F) -> Option<RunSummary>
where
    F: Fn(&str) -> Option<String>,
{
    let result = parser::load_config(config_paths)
        .and_then(|config| run(ctx, &config, env));

    match result {
        Ok(summary) => Some(summary),
        Err(e) => {
            error!("Hook failed: {}", e);
            None
        }
    }
}

/// Определяет схему, находит манифесты и обрабатывает их по очереди. Ошибка в
/// одном файле не мешает обработать следующие. env это чтение переменной
/// окружения, в тестах подменяется
pub fn run<F>(ctx: &HookContext, config: &HookConfig, env: F) -> Result<RunSummary>
where
    F: Fn(&str) -> Option<String>,
{
    let verbose = ctx.verbose || config.options.verbose;
    let dry_run = ctx.dry_run || config.options.dry_run;
    let key = config.key();

    task!("Resolve {}", key);

    let sources = [
        SchemeSource::PluginVariable(ctx.plugin_variable(key)),
        SchemeSource::Environment(env(key)),
        SchemeSource::ConfigXml(&ctx.project_root),
        SchemeSource::Fallback(config.fallback()),
    ];

    let scheme = match resolver::resolve(key, &sources) {
        Some(scheme) => scheme,
        None => {
            warn!("{} is empty, aborting", key);
            return Ok(RunSummary::SchemeUnresolved);
        }
    };

    if verbose {
        note!("Using scheme \"{}\" from {}", scheme.value, scheme.origin);
    }

    task!("Locate AndroidManifest.xml");

    let manifests = manifest::locate(&ctx.project_root, &config.manifest.candidates);

    if manifests.is_empty() {
        warn!("No AndroidManifest.xml found (platform not prepared yet?)");
        return Ok(RunSummary::NoManifest);
    }

    if verbose {
        for path in &manifests {
            note!("Candidate {}", path.display());
        }
    }

    let files = manifests
        .into_iter()
        .map(|path| {
            let state = match manifest::ensure_intent_filter(&path, &scheme.value, dry_run) {
                Ok(state) => state,
                Err(e) => FileState::Failed(e.to_string()),
            };

            FileReport { path, state }
        })
        .collect();

    Ok(RunSummary::Processed { scheme, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::toml_parser;
    use crate::resolver::Origin;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const NESTED: &str = "platforms/android/app/src/main/AndroidManifest.xml";
    const FLAT: &str = "platforms/android/AndroidManifest.xml";

    const MANIFEST: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <application>
        <activity android:name="MainActivity">
            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>
    </application>
</manifest>
"#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn processed(summary: RunSummary) -> (ResolvedScheme, Vec<FileReport>) {
        match summary {
            RunSummary::Processed { scheme, files } => (scheme, files),
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[test]
    fn first_manifest_without_anchor_does_not_stop_the_second() {
        let dir = TempDir::new().unwrap();
        let nested = write(dir.path(), NESTED, "<manifest><application /></manifest>");
        let flat = write(dir.path(), FLAT, MANIFEST);

        let ctx = HookContext::new(dir.path()).with_variable("ANDROID_SCHEME", "myapp");
        let (_, files) = processed(run(&ctx, &HookConfig::default(), no_env).unwrap());

        assert_eq!(files, vec![
            FileReport { path: nested.clone(), state: FileState::AnchorMissing },
            FileReport { path: flat.clone(), state: FileState::Patched },
        ]);
        assert_eq!(fs::read_to_string(&nested).unwrap(), "<manifest><application /></manifest>");
        assert!(fs::read_to_string(&flat).unwrap().contains("android:scheme=\"myapp\""));
    }

    #[test]
    fn scheme_from_config_xml_preference() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.xml", r#"<widget><preference name="ANDROID_SCHEME" value="myapp"/></widget>"#);
        let manifest = write(dir.path(), NESTED, MANIFEST);

        let ctx = HookContext::new(dir.path());
        let (scheme, _) = processed(run(&ctx, &HookConfig::default(), no_env).unwrap());

        assert_eq!(scheme.value, "myapp");
        assert_eq!(scheme.origin, Origin::ConfigXml);
        assert!(fs::read_to_string(manifest).unwrap().contains("<data android:scheme=\"myapp\" />"));
    }

    #[test]
    fn environment_beats_config_xml() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.xml", r#"<widget><preference name="ANDROID_SCHEME" value="fromxml"/></widget>"#);
        write(dir.path(), NESTED, MANIFEST);

        let env = |k: &str| (k == "ANDROID_SCHEME").then(|| "fromenv".to_string());
        let (scheme, _) = processed(run(&HookContext::new(dir.path()), &HookConfig::default(), env).unwrap());

        assert_eq!(scheme.value, "fromenv");
    }

    #[test]
    fn fallback_placeholder_is_inserted_when_nothing_is_set() {
        let dir = TempDir::new().unwrap();
        let manifest = write(dir.path(), NESTED, MANIFEST);

        let (scheme, _) = processed(run(&HookContext::new(dir.path()), &HookConfig::default(), no_env).unwrap());

        assert_eq!(scheme.value, toml_parser::DEFAULT_FALLBACK);
        assert!(fs::read_to_string(manifest).unwrap().contains("android:scheme=\"<customurl>\""));
    }

    #[test]
    fn blank_fallback_aborts_without_touching_files() {
        let dir = TempDir::new().unwrap();
        let manifest = write(dir.path(), NESTED, MANIFEST);
        let config_path = write(dir.path(), "hook.toml", "[scheme]\nfallback = \" \"\n");

        let config = parser::load_config(vec![config_path]).unwrap();
        let summary = run(&HookContext::new(dir.path()), &config, no_env).unwrap();

        assert_eq!(summary, RunSummary::SchemeUnresolved);
        assert_eq!(fs::read_to_string(manifest).unwrap(), MANIFEST);
    }

    #[test]
    fn unprepared_platform_is_no_manifest() {
        let dir = TempDir::new().unwrap();

        let summary = run(&HookContext::new(dir.path()), &HookConfig::default(), no_env).unwrap();

        assert_eq!(summary, RunSummary::NoManifest);
    }

    #[test]
    fn custom_key_and_extra_candidate_from_config() {
        let dir = TempDir::new().unwrap();
        let custom = write(dir.path(), "custom/AndroidManifest.xml", MANIFEST);
        let config_path = write(
            dir.path(),
            toml_parser::PROJECT_CONFIG,
            "[scheme]\nkey = \"MY_SCHEME\"\n[manifest]\ncandidates = [\"custom/AndroidManifest.xml\"]\n",
        );

        let config = parser::load_config(vec![config_path]).unwrap();
        let ctx = HookContext::new(dir.path())
            .with_variable("ANDROID_SCHEME", "ignored")
            .with_variable("MY_SCHEME", "mine");

        let (scheme, files) = processed(run(&ctx, &config, no_env).unwrap());

        assert_eq!(scheme.value, "mine");
        assert_eq!(files, vec![FileReport { path: custom, state: FileState::Patched }]);
    }

    #[test]
    fn dry_run_reports_but_keeps_file() {
        let dir = TempDir::new().unwrap();
        let manifest = write(dir.path(), FLAT, MANIFEST);

        let mut ctx = HookContext::new(dir.path()).with_variable("ANDROID_SCHEME", "myapp");
        ctx.dry_run = true;

        let (_, files) = processed(run(&ctx, &HookConfig::default(), no_env).unwrap());

        assert_eq!(files[0].state, FileState::Patched);
        assert_eq!(fs::read_to_string(manifest).unwrap(), MANIFEST);
    }

    #[test]
    fn failed_file_is_reported_and_next_one_still_processed() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(NESTED)).unwrap();
        let flat = write(dir.path(), FLAT, MANIFEST);

        let ctx = HookContext::new(dir.path()).with_variable("ANDROID_SCHEME", "myapp");
        let (_, files) = processed(run(&ctx, &HookConfig::default(), no_env).unwrap());

        assert!(matches!(files[0].state, FileState::Failed(_)));
        assert_eq!(files[1], FileReport { path: flat, state: FileState::Patched });
    }

    #[test]
    fn escaped_config_xml_value_stays_escaped_in_manifest() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "config.xml", r#"<widget><preference name="ANDROID_SCHEME" value="a&amp;b"/></widget>"#);
        let manifest = write(dir.path(), NESTED, MANIFEST);

        processed(run(&HookContext::new(dir.path()), &HookConfig::default(), no_env).unwrap());

        assert!(fs::read_to_string(manifest).unwrap().contains("<data android:scheme=\"a&amp;b\" />"));
    }

    #[test]
    fn broken_hook_config_is_logged_not_raised() {
        let dir = TempDir::new().unwrap();
        let manifest = write(dir.path(), NESTED, MANIFEST);
        let broken = write(dir.path(), "broken.toml", "[scheme\n");

        let ctx = HookContext::new(dir.path()).with_variable("ANDROID_SCHEME", "myapp");

        let paths = toml_parser::config_paths_in(None, dir.path(), Some(&broken));

        assert_eq!(execute(&ctx, paths, no_env), None);
        assert_eq!(fs::read_to_string(manifest).unwrap(), MANIFEST);
    }

    #[test]
    fn execute_picks_up_project_config() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), NESTED, MANIFEST);
        write(dir.path(), toml_parser::PROJECT_CONFIG, "[scheme]\nfallback = \"projectapp\"\n");

        let paths = toml_parser::config_paths_in(None, dir.path(), None);
        let summary = execute(&HookContext::new(dir.path()), paths, no_env).unwrap();

        assert_eq!(processed(summary).0.value, "projectapp");
    }
}
