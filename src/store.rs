//! 設定ストア（状態マシン）
//!
//! インストールフォルダと、ソースごとのインポート済みバージョンを
//! `~/.lolbuilds/config.json` に永続化する。
//!
//! ## 状態遷移図
//!
//! ```text
//!                    ┌─────────────┐
//!                    │   Initial   │
//!                    └──────┬──────┘
//!                           │ new() / with_path()
//!                           ▼
//!                    ┌─────────────┐
//!              ┌────▶│    Idle     │
//!              │     └──────┬──────┘
//!              │            │ get() / save()
//!              │            ▼
//!              │     ┌─────────────┐
//!              │     │   Loaded    │  ← save() は毎回ファイルを読み直す
//!              │     └──────┬──────┘
//!              │            │ set
//!              │            ▼
//!              │     ┌─────────────┐
//!              │     │  Modified   │
//!              │     └──────┬──────┘
//!              │            │ persist()
//!              └────────────┘
//! ```
//!
//! ## 同時書き込み
//!
//! `save()` は「読み込み → 上書き → 書き戻し」を行う。
//! 同一プロセス内のワーカーは [`SharedConfigStore`] を共有するため更新は失われない。
//! 別プロセスが同じファイルへ同時に書き込む場合はロックしていないので、
//! 古いスナップショットを書き戻した側が他のキーの更新を消してしまう。

use crate::env::EnvVar;
use crate::error::{LbError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// インストールフォルダのキー
pub const PATH_KEY: &str = "path";

/// 設定ファイルの中身（フラットなキー・値）
pub type ConfigMap = BTreeMap<String, Option<String>>;

/// ワーカー間で共有する設定ストア
pub type SharedConfigStore = Arc<Mutex<ConfigStore>>;

/// 状態マシンの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Loaded,
    Modified,
}

/// 設定ストア（状態マシン）
pub struct ConfigStore {
    config_path: PathBuf,
    state: State,
    config: ConfigMap,
}

impl ConfigStore {
    /// 新しいストアを作成（デフォルトパス: ~/.lolbuilds/config.json）
    pub fn new() -> Result<Self> {
        let home = EnvVar::home_dir()
            .ok_or_else(|| LbError::Config("Home directory could not be determined".to_string()))?;
        Ok(Self::with_path(home.join(".lolbuilds").join("config.json")))
    }

    /// カスタムパスで作成（テスト用）
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            state: State::Idle,
            config: ConfigMap::new(),
        }
    }

    /// 共有ハンドルに変換
    pub fn into_shared(self) -> SharedConfigStore {
        Arc::new(Mutex::new(self))
    }

    /// 設定ファイルのパス
    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// 設定を読み込み（→ Loaded）
    ///
    /// ファイルが無い場合は空の設定として扱う。
    fn load(&mut self) -> Result<&ConfigMap> {
        let config = match fs::read_to_string(&self.config_path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                LbError::Config(format!("Failed to parse config.json: {}", e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ConfigMap::new(),
            Err(e) => return Err(LbError::Io(e)),
        };

        self.config = config;
        self.state = State::Loaded;

        Ok(&self.config)
    }

    /// 読み込み済みの設定にキーを設定（Loaded → Modified）
    fn set(&mut self, key: &str, value: Option<&str>) {
        self.config
            .insert(key.to_string(), value.map(str::to_string));
        self.state = State::Modified;
    }

    /// 設定を書き戻し（Modified → Idle）
    ///
    /// 同じディレクトリの一時ファイルに書いてからアトミックに置換する。
    fn persist(&mut self) -> Result<()> {
        if self.state != State::Modified {
            return Err(LbError::Config("Nothing to persist".to_string()));
        }

        let parent = self.config_path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)
            .map_err(|e| LbError::Config(format!("Failed to create temp file: {}", e)))?;

        let content = serde_json::to_string(&self.config)?;
        temp_file.write_all(content.as_bytes())?;

        temp_file
            .persist(&self.config_path)
            .map_err(|e| LbError::Config(format!("Failed to persist config: {}", e)))?;

        self.state = State::Idle;
        Ok(())
    }

    /// キーの値を取得
    ///
    /// キーが無い場合、または値が null の場合は `None`。
    pub fn get(&mut self, key: &str) -> Result<Option<String>> {
        let config = self.load()?;
        Ok(config.get(key).cloned().flatten())
    }

    /// キーと値を保存（読み込み → 上書き → 書き戻し）
    pub fn save(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        self.load()?;
        self.set(key, value);
        self.persist()
    }

    /// 保存済みのインストールフォルダ
    pub fn install_path(&mut self) -> Result<Option<PathBuf>> {
        Ok(self.get(PATH_KEY)?.map(PathBuf::from))
    }

    /// ソースのインポート済みバージョン
    pub fn imported_version(&mut self, source_name: &str) -> Result<Option<String>> {
        self.get(source_name)
    }

    /// 現在の状態を取得（デバッグ用）
    #[cfg(test)]
    pub fn current_state(&self) -> &'static str {
        match self.state {
            State::Idle => "Idle",
            State::Loaded => "Loaded",
            State::Modified => "Modified",
        }
    }
}

/// 共有ストアのロックを取得（poison されていても中身を使う）
pub fn lock(store: &SharedConfigStore) -> std::sync::MutexGuard<'_, ConfigStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
