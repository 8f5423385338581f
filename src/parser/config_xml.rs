// Copyright (c) 2025 Spawn
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// https://www.eclipse.org/legal/epl-2.0/
// SPDX-License-Identifier: EPL-2.0

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{HookError, Result};

/// config.xml лежит в корне проекта
pub const CONFIG_XML: &str = "config.xml";

/// Что удалось найти в config.xml. Переменная плагина важнее preference
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SchemeDeclarations {
    pub variable: Option<String>,
    pub preference: Option<String>,
}

impl SchemeDeclarations {
    pub fn scheme(self) -> Option<String> {
        self.variable.or(self.preference)
    }
}

/// Читает config.xml проекта и возвращает значение схемы. Если файла нет, то
/// это не ошибка, просто источник ничего не дал
pub fn read_scheme(project_root: &Path, key: &str) -> Result<Option<String>> {
    let path = project_root.join(CONFIG_XML);

    let xml = match fs::read_to_string(&path) {
        Ok(xml) => xml,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(HookError::io(&path, e)),
    };

    Ok(find_declarations(&xml, key).scheme())
}

/// Ищет <variable name="KEY" value="..."/> и <preference name="KEY" value="..."/>
/// в любом месте документа. Порядок и набор остальных атрибутов не важен, имена
/// тегов, атрибутов и сам ключ сравниваются без учёта регистра. Пустые значения
/// пропускаются. Если документ сломан, возвращается то что нашлось до ошибки
pub fn find_declarations(xml: &str, key: &str) -> SchemeDeclarations {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut found = SchemeDeclarations::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();

                if name.as_ref().eq_ignore_ascii_case(b"variable") {
                    if let Some(value) = declared_value(&e, key) {
                        found.variable = Some(value);

                        // Переменная плагина это высший приоритет внутри config.xml,
                        // дальше читать нет смысла
                        break;
                    }
                } else if name.as_ref().eq_ignore_ascii_case(b"preference") && found.preference.is_none() {
                    found.preference = declared_value(&e, key);
                }
            }

            Ok(Event::Eof) => break,
            Ok(_) => {}

            Err(e) => {
                warn!("{} is malformed at byte {}: {}", CONFIG_XML, reader.buffer_position(), e);
                break;
            }
        }

        buf.clear();
    }

    found
}

/// Возвращает обрезанное значение атрибута value, если атрибут name равен ключу
fn declared_value(elem: &BytesStart, key: &str) -> Option<String> {
    let mut name_matches = false;
    let mut value = None;

    for attr in elem.attributes().with_checks(false).filter_map(|a| a.ok()) {
        let attr_name = attr.key.local_name();
        // Значение берётся как есть, без раскодирования сущностей: оно потом
        // вставляется в атрибут манифеста и должно остаться валидным xml
        let attr_value = String::from_utf8_lossy(&attr.value).into_owned();

        if attr_name.as_ref().eq_ignore_ascii_case(b"name") {
            name_matches = attr_value.trim().eq_ignore_ascii_case(key);
        } else if attr_name.as_ref().eq_ignore_ascii_case(b"value") {
            value = Some(attr_value);
        }
    }

    if !name_matches {
        return None;
    }

    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
