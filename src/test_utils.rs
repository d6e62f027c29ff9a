//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。

use std::path::Path;

use crate::input::MemorySource;

/// `(locale, json)` の組からメモリ上の翻訳ソースを作成する
pub(crate) fn memory_source(documents: &[(&str, &str)]) -> MemorySource {
    let mut source = MemorySource::new(".");
    for (locale, text) in documents {
        source.insert(*locale, *text);
    }
    source
}

/// `dir` に `<locale>.json` を書き出す
#[allow(clippy::unwrap_used)]
pub(crate) fn write_locales(dir: &Path, documents: &[(&str, &str)]) {
    for (locale, text) in documents {
        std::fs::write(dir.join(format!("{locale}.json")), text).unwrap();
    }
}
