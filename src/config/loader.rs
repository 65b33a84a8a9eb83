//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    NlsOptions,
};

/// プロジェクト設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".monaco-nls.json";

/// ディレクトリから設定を読み込む
///
/// `.monaco-nls.json` ファイルを探して読み込む
///
/// # Arguments
/// * `dir` - 設定ファイルを探すディレクトリ
///
/// # Returns
/// - `Ok(Some(options))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub fn load_from_dir(dir: &Path) -> Result<Option<NlsOptions>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Configuration file not found: {:?}", config_path);
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    tracing::debug!("Loaded configuration from: {:?}", config_path);
    let options: NlsOptions = serde_json::from_str(&content)?;

    Ok(Some(options))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::locale::Locale;

    /// `load_from_dir`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_dir_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"locale": "ja"}"#;
        fs::write(temp_dir.path().join(".monaco-nls.json"), config_content).unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(result.is_ok());
        let options = result.unwrap();
        assert!(options.is_some());
        assert_eq!(options.unwrap().locale, Locale::Ja);
    }

    /// `load_from_dir`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_dir_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_dir`: JSON パースエラー
    #[rstest]
    fn test_load_from_dir_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".monaco-nls.json"), "invalid json").unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// `load_from_dir`: 設定ファイル名がディレクトリの場合は I/O エラー
    #[rstest]
    fn test_load_from_dir_config_path_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".monaco-nls.json")).unwrap();

        let result = load_from_dir(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
