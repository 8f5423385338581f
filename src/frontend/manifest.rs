// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HookError, Result};
use crate::parser::{self, PatchOutcome};

/// Где cordova-android кладёт сгенерированный манифест. Сначала новая структура
/// (app/src/main, cordova-android 7+), потом старая плоская
const KNOWN_LOCATIONS: [&[&str]; 2] = [
    &["platforms", "android", "app", "src", "main", "AndroidManifest.xml"],
    &["platforms", "android", "AndroidManifest.xml"],
];

/// Чем закончилась обработка одного манифеста
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    AlreadyPatched,
    AnchorMissing,
    Patched,

    /// Не удалось прочитать или записать файл
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub state: FileState,
}

/// Все возможные пути к манифесту в порядке проверки, включая дополнительные
/// из конфига хука. Повторы убираются
pub fn candidate_paths(project_root: &Path, extra: &[String]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = KNOWN_LOCATIONS.iter()
        .map(|parts| parts.iter().fold(project_root.to_path_buf(), |p, part| p.join(part)))
        .collect();

    for rel in extra {
        let path = project_root.join(rel);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    paths
}

/// Оставляет только те кандидаты которые реально есть на диске
pub fn locate(project_root: &Path, extra: &[String]) -> Vec<PathBuf> {
    candidate_paths(project_root, extra)
        .into_iter()
        .filter(|p| p.exists())
        .collect()
}

/// Убеждается что в манифесте есть VIEW intent-filter со схемой. Файл
/// перезаписывается только если блок реально вставлен и это не dry run.
/// Резервная копия не делается
pub fn ensure_intent_filter(manifest_path: &Path, scheme: &str, dry_run: bool) -> Result<FileState> {
    let xml = fs::read_to_string(manifest_path)
        .map_err(|e| HookError::io(manifest_path, e))?;

    match parser::patch_manifest(&xml, scheme) {
        PatchOutcome::AlreadyPatched => {
            info!("Scheme \"{}\" already present in {}", scheme, manifest_path.display());
            Ok(FileState::AlreadyPatched)
        }

        PatchOutcome::AnchorMissing => {
            warn!("Could not find MainActivity (MAIN/LAUNCHER intent-filter) in {}", manifest_path.display());
            Ok(FileState::AnchorMissing)
        }

        PatchOutcome::Patched(new_xml) => {
            if dry_run {
                info!("Would insert VIEW intent-filter into {} (dry run)", manifest_path.display());
            } else {
                fs::write(manifest_path, new_xml)
                    .map_err(|e| HookError::io(manifest_path, e))?;

                info!("VIEW intent-filter inserted into {}", manifest_path.display());
            }

            Ok(FileState::Patched)
        }
    }
}
