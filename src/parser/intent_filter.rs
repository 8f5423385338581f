// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use once_cell::sync::Lazy;
use regex::Regex;

/// Главная activity: первый <activity> у которого сразу идёт intent-filter с
/// MAIN и дальше LAUNCHER, до первого закрывающего </intent-filter>. Манифест
/// не парсится как xml, это поиск по тексту, поэтому переформатированные теги
/// (например action с атрибутами на разных строках) сюда не попадут
const MAIN_ACTIVITY_PATTERN: &str = concat!(
    r#"<activity\b[\s\S]*?>\s*<intent-filter>\s*"#,
    r#"<action android:name="android\.intent\.action\.MAIN"\s*/>[\s\S]*?"#,
    r#"<category android:name="android\.intent\.category\.LAUNCHER"\s*/>[\s\S]*?"#,
    r#"</intent-filter>"#,
);

static MAIN_ACTIVITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(MAIN_ACTIVITY_PATTERN).expect("main activity pattern is a valid regex")
});

/// Результат попытки вставить intent-filter в текст манифеста
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// android:scheme="..." уже есть, текст не меняется
    AlreadyPatched,

    /// Не нашли главную activity, текст не меняется
    AnchorMissing,

    /// Новый текст манифеста со вставленным блоком
    Patched(String),
}

/// Блок который вставляется сразу после intent-filter главной activity
pub fn view_intent_filter(scheme: &str) -> String {
    format!(
        "
      <intent-filter>
        <action android:name=\"android.intent.action.VIEW\" />
        <category android:name=\"android.intent.category.DEFAULT\" />
        <category android:name=\"android.intent.category.BROWSABLE\" />
        <data android:scheme=\"{}\" />
      </intent-filter>",
        scheme
    )
}

/// Проверяет есть ли уже в манифесте объявление этой схемы
pub fn has_scheme(manifest: &str, scheme: &str) -> bool {
    manifest.contains(&format!("android:scheme=\"{}\"", scheme))
}

/// Вставляет VIEW intent-filter со схемой после intent-filter главной activity.
/// Всё остальное содержимое сохраняется байт в байт. Схема вставляется как есть,
/// без экранирования
pub fn patch(manifest: &str, scheme: &str) -> PatchOutcome {
    if has_scheme(manifest, scheme) {
        return PatchOutcome::AlreadyPatched;
    }

    let anchor_end = match MAIN_ACTIVITY.find(manifest) {
        Some(m) => m.end(),
        None => return PatchOutcome::AnchorMissing,
    };

    let insert = view_intent_filter(scheme);

    let mut patched = String::with_capacity(manifest.len() + insert.len() + 1);
    patched.push_str(&manifest[..anchor_end]);
    patched.push('\n');
    patched.push_str(&insert);
    patched.push_str(&manifest[anchor_end..]);

    PatchOutcome::Patched(patched)
}
