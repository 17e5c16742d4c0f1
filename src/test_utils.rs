//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

/// `<docs>/locale/<language>.yml` を書き込む
pub(crate) fn write_structured(docs_dir: &Path, language: &str, yaml: &str) -> PathBuf {
    let dir = docs_dir.join("locale");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{language}.yml"));
    fs::write(&path, yaml).unwrap();
    path
}

/// `<docs>/i18n/<language>/LC_MESSAGES/messages.po` を書き込む
pub(crate) fn write_po(docs_dir: &Path, language: &str, po: &str) -> PathBuf {
    let dir = docs_dir.join("i18n").join(language).join("LC_MESSAGES");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("messages.po");
    fs::write(&path, po).unwrap();
    path
}

/// 最小限の `.mo` ファイルを書き込む（ヘッダー付き、リトルエンディアン）
pub(crate) fn write_mo(path: &Path, messages: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    let mut entries: Vec<(&str, &str)> =
        vec![("", "Content-Type: text/plain; charset=UTF-8\n")];
    entries.extend_from_slice(messages);
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let count = u32::try_from(entries.len()).unwrap();
    let originals_offset = 28u32;
    let translations_offset = originals_offset + count * 8;
    let mut data_offset = translations_offset + count * 8;

    let mut originals = Vec::new();
    let mut translations = Vec::new();
    let mut strings = Vec::new();
    for (original, _) in &entries {
        let len = u32::try_from(original.len()).unwrap();
        originals.extend_from_slice(&len.to_le_bytes());
        originals.extend_from_slice(&data_offset.to_le_bytes());
        strings.extend_from_slice(original.as_bytes());
        strings.push(0);
        data_offset += len + 1;
    }
    for (_, translation) in &entries {
        let len = u32::try_from(translation.len()).unwrap();
        translations.extend_from_slice(&len.to_le_bytes());
        translations.extend_from_slice(&data_offset.to_le_bytes());
        strings.extend_from_slice(translation.as_bytes());
        strings.push(0);
        data_offset += len + 1;
    }

    let mut bytes = Vec::new();
    for word in [0x9504_12de_u32, 0, count, originals_offset, translations_offset, 0, 0] {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes.extend_from_slice(&originals);
    bytes.extend_from_slice(&translations);
    bytes.extend_from_slice(&strings);

    fs::write(path, bytes).unwrap();
}

/// `<site>/search/search_index.json` を書き込む
pub(crate) fn write_search_index(site_dir: &Path, index: &serde_json::Value) -> PathBuf {
    let dir = site_dir.join("search");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("search_index.json");
    fs::write(&path, serde_json::to_string(index).unwrap()).unwrap();
    path
}

/// JSON ファイルを読み込む
pub(crate) fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
