// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

/// Тег который ставится в начало каждой строки хука. Оркестратор сборки
/// смешивает вывод всех хуков и плагинов, по тегу видно кто пишет
pub const TAG: &str = "[custom-url-scheme]";

/// Макрос для вывода информации о текущем этапе хука
/// Выводит "TASK: [custom-url-scheme] Сообщение" где TASK зелёным и жирным
#[macro_export]
macro_rules! task {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("{} {} {}", "TASK:".green().bold(), $crate::logger::TAG, format!($($arg)*));
    }};
}

/// Макрос для вывода обычной информации, только тег без префикса
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        println!("{} {}", $crate::logger::TAG, format!($($arg)*));
    }};
}

/// Подробности для --verbose. Префикс "NOTE:", синий и жирный
#[macro_export]
macro_rules! note {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("{} {} {}", "NOTE:".blue().bold(), $crate::logger::TAG, format!($($arg)*));
    }};
}

/// Сообщение о старте хука. Префикс HOOK, фиолетовый, жирный
#[macro_export]
macro_rules! hook {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        println!("{} {} {}", "HOOK:".purple().bold(), $crate::logger::TAG, format!($($arg)*));
    }};
}

/// Предупреждения. Выводит в stderr "WARN: [custom-url-scheme] Сообщение"
/// Хук после предупреждения не падает, сборка идёт дальше
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {} {}", "WARN:".yellow().bold(), $crate::logger::TAG, format!($($arg)*));
    }};
}

/// Ошибки. Выводит в stderr "ERROR: [custom-url-scheme] Сообщение", префикс
/// красный. Даже ошибка не роняет сборку, хук только сообщает о ней
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        eprintln!("{} {} {}", "ERROR:".red().bold(), $crate::logger::TAG, format!($($arg)*));
    }};
}
