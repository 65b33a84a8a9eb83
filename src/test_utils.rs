//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

/// テスト用の monaco-editor パッケージを作成する
///
/// # Arguments
/// * `root` - 一時ディレクトリ
/// * `files` - パッケージルートからの相対パスと内容
///
/// # Returns
/// `root/node_modules/monaco-editor` のパス
#[allow(clippy::unwrap_used)]
pub(crate) fn write_package(root: &Path, files: &[(&str, &str)]) -> PathBuf {
    let package_dir = root.join("node_modules").join("monaco-editor");
    for (relative, content) in files {
        let path = package_dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    package_dir
}
