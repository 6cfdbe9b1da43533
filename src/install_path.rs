//! League of Legends インストールフォルダの解決
//!
//! 優先順位:
//! 1. `--path` フラグ
//! 2. 設定に保存されたパス（まだディレクトリとして存在する場合）
//! 3. プラットフォームの既定パス（未対応の OS ならここでエラー）
//! 4. 対話入力（妥当なパスが入力されるまで繰り返す）
//!
//! 解決したパスは設定に保存する。

use crate::error::{LbError, Result};
use crate::fs::FileSystem;
use crate::prompt::Prompter;
use crate::store::{self, SharedConfigStore, PATH_KEY};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// パスに含まれているべき文字列（小文字で比較）
const REQUIRED_SEGMENT: &str = "league of legends";

/// 実行中のプラットフォーム
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unsupported(&'static str),
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            other => Platform::Unsupported(other),
        }
    }

    /// 標準のインストール先
    pub fn default_install_path(&self) -> Option<PathBuf> {
        match self {
            Platform::Windows => Some(PathBuf::from(r"C:\Riot Games\League of Legends")),
            Platform::MacOs => Some(PathBuf::from(
                "/Applications/League of Legends.app/Contents/LoL",
            )),
            Platform::Unsupported(_) => None,
        }
    }
}

/// League of Legends のフォルダらしいパスか
pub fn looks_like_install_path(path: &Path) -> bool {
    path.to_string_lossy()
        .to_lowercase()
        .contains(REQUIRED_SEGMENT)
}

/// 入力されたパスの前後の空白と引用符を除く
fn clean_input(input: &str) -> &str {
    input.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// インストールフォルダを解決して保存する
pub fn resolve_install_path(
    flag: Option<&Path>,
    store: &SharedConfigStore,
    platform: Platform,
    fs: &dyn FileSystem,
    prompter: &mut dyn Prompter,
) -> Result<PathBuf> {
    if let Some(path) = flag {
        if !fs.is_dir(path) {
            return Err(LbError::InvalidInstallPath(format!(
                "Path does not exist: {}",
                path.display()
            )));
        }
        if !looks_like_install_path(path) {
            return Err(LbError::InvalidInstallPath(format!(
                "Please point to the League of Legends installation folder, got {}",
                path.display()
            )));
        }
        return remember(store, path.to_path_buf());
    }

    let saved = store::lock(store).install_path()?;
    if let Some(saved) = saved {
        if fs.is_dir(&saved) {
            tracing::debug!(path = %saved.display(), "using saved install path");
            return Ok(saved);
        }
        tracing::warn!(path = %saved.display(), "saved install path no longer exists");
    }

    if let Platform::Unsupported(os) = platform {
        return Err(LbError::UnsupportedPlatform(os.to_string()));
    }

    if let Some(default) = platform.default_install_path() {
        if fs.is_dir(&default) {
            return remember(store, default);
        }
        println!(
            "{} Can't find the League of Legends folder at {}",
            "!".yellow(),
            default.display()
        );
    }

    loop {
        let answer = prompter.ask("Path to your League of Legends folder: ")?;
        let path = PathBuf::from(clean_input(&answer));

        if !fs.is_dir(&path) {
            println!("{} Path does not exist: {}", "✗".red(), path.display());
            continue;
        }
        if !looks_like_install_path(&path) {
            println!(
                "{} Please point to the League of Legends installation folder",
                "✗".red()
            );
            continue;
        }

        return remember(store, path);
    }
}

fn remember(store: &SharedConfigStore, path: PathBuf) -> Result<PathBuf> {
    store::lock(store).save(PATH_KEY, Some(&path.to_string_lossy()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "install_path_test.rs"]
mod tests;
