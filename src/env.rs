use std::path::PathBuf;

/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（空文字列はNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.is_empty())
    }

    /// ホームディレクトリを取得
    ///
    /// Windows では `HOME` が無いことが多いので `USERPROFILE` にフォールバックする。
    pub fn home_dir() -> Option<PathBuf> {
        Self::get("HOME")
            .or_else(|| Self::get("USERPROFILE"))
            .map(PathBuf::from)
    }
}
