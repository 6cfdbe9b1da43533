//! ファイルシステム抽象化
//!
//! アイテムセットの書き出し・削除で使用するファイルシステム操作の抽象化レイヤー。
//! テスト時に MockFs を注入してファイル操作をモック化できる。

use crate::error::{LbError, Result};
use std::path::{Path, PathBuf};

/// ファイル種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsFileType {
    File,
    Dir,
}

/// ファイルシステム抽象化のための独自 DirEntry
#[derive(Debug, Clone)]
pub struct FsDirEntry {
    pub path: PathBuf,
    pub file_type: FsFileType,
}

impl FsDirEntry {
    /// ディレクトリかどうか
    pub fn is_dir(&self) -> bool {
        self.file_type == FsFileType::Dir
    }

    /// ファイル名（UTF-8として解釈できない場合は空文字列）
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// ファイルシステム操作を抽象化するトレイト
///
/// テスト時に MockFs を注入してファイル操作をモック化できる。
/// 本番コードでは RealFs を使用する。
pub trait FileSystem: Send + Sync {
    /// ファイルのみを削除
    ///
    /// - 存在しない場合は Ok(())
    /// - ディレクトリの場合は Err
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// ディレクトリかどうか（シンボリックリンク追従）
    fn is_dir(&self, path: &Path) -> bool;

    /// ディレクトリを再帰的に作成（既に存在してもエラーにしない）
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// ファイルに書き込み
    ///
    /// - 親ディレクトリは自動作成
    /// - 既存ファイルは上書き
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// ディレクトリ内のエントリを取得
    ///
    /// - 順序は未定義
    /// - 引数がディレクトリでない場合は Err
    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>>;
}

/// 本番用ファイルシステム実装
pub struct RealFs;

impl FileSystem for RealFs {
    fn remove_file(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        if path.is_dir() {
            return Err(LbError::Io(std::io::Error::new(
                std::io::ErrorKind::IsADirectory,
                "Cannot remove directory with remove_file",
            )));
        }
        std::fs::remove_file(path)?;
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)?;
        Ok(())
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        // 親ディレクトリを作成
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_type = if entry.path().is_dir() {
                FsFileType::Dir
            } else {
                FsFileType::File
            };
            entries.push(FsDirEntry {
                path: entry.path(),
                file_type,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "fs_test.rs"]
mod tests;
