//! 統計サイト（ソース）の抽象化
//!
//! 各サイト（champion.gg, probuilds.net, op.gg）からの取得処理を抽象化する。
//! 使う側は具体的なサイトを意識せず、`Source` traitを通じて操作する。
//!
//! ## 使い方
//!
//! ```ignore
//! let source = SourceKind::from_name("championgg")?.create(&HttpConfig::default());
//! for champion in source.fetch_champions().await? {
//!     let items = source.fetch_items(&champion, Some("Top")).await?;
//! }
//! ```

mod championgg;
mod html;
mod opgg;
mod probuilds;

pub use championgg::ChampionggSource;
pub use opgg::OpggSource;
pub use probuilds::ProbuildsSource;

use crate::champion::Champion;
use crate::config::HttpConfig;
use crate::error::{LbError, Result};
use crate::item_set::{ItemBuild, SkillOrder};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// ソースの非同期操作の戻り値
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// チャンピオン・ロール単位の取得結果
///
/// 致命的なエラー（ソース全体を中断すべきもの）は `Err` で表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// 取得成功
    Found(T),
    /// 一部または全部が見つからなかった（取得できた分は `partial` に入る）
    NotFound { partial: T, reason: String },
}

impl<T> Fetched<T> {
    /// 見つからなかった場合の結果
    pub fn not_found(partial: T, reason: impl Into<String>) -> Self {
        Self::NotFound {
            partial,
            reason: reason.into(),
        }
    }

    /// 取得成功かどうか
    #[cfg(test)]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// 取得できたデータを取り出す
    #[cfg(test)]
    pub fn into_inner(self) -> T {
        match self {
            Self::Found(data) | Self::NotFound { partial: data, .. } => data,
        }
    }
}

/// ソース種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Championgg,
    Probuilds,
    Opgg,
}

impl SourceKind {
    /// 登録済みの全ソース（表示順）
    pub const ALL: [SourceKind; 3] = [
        SourceKind::Championgg,
        SourceKind::Probuilds,
        SourceKind::Opgg,
    ];

    /// ソース名を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Championgg => "championgg",
            SourceKind::Probuilds => "probuilds",
            SourceKind::Opgg => "opgg",
        }
    }

    /// ソース名からパース（大文字小文字は区別しない）
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| LbError::SourceNotFound(name.trim().to_string()))
    }

    /// ソース実装を生成
    pub fn create(&self, config: &HttpConfig) -> Arc<dyn Source> {
        match self {
            SourceKind::Championgg => Arc::new(ChampionggSource::new(config)),
            SourceKind::Probuilds => Arc::new(ProbuildsSource::new(config)),
            SourceKind::Opgg => Arc::new(OpggSource::new(config)),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 統計サイトの抽象化trait
///
/// 各サイトがこのtraitを実装する。
/// `role` 引数は `supports_roles()` が `true` のソースにのみ `Some` で渡される。
pub trait Source: Send + Sync {
    /// ソース識別子（ファイル名・設定キーに使用）
    fn name(&self) -> &'static str;

    /// 表示名
    fn display_name(&self) -> &'static str;

    /// ロール別のアイテムセットに対応しているか
    fn supports_roles(&self) -> bool;

    /// チャンピオン一覧を取得（失敗時はソース全体を中断）
    fn fetch_champions(&self) -> SourceFuture<'_, Vec<Champion>>;

    /// アイテムビルドを取得
    fn fetch_items<'a>(
        &'a self,
        champion: &'a Champion,
        role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<ItemBuild>>;

    /// スキル順を取得
    fn fetch_skill_order<'a>(
        &'a self,
        champion: &'a Champion,
        role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<SkillOrder>>;

    /// サイトのバージョン（パッチ番号、または日付）を取得
    fn fetch_version(&self) -> SourceFuture<'_, String>;
}

/// 全ソースを取得
pub fn all_sources(config: &HttpConfig) -> Vec<Arc<dyn Source>> {
    SourceKind::ALL
        .iter()
        .map(|kind| kind.create(config))
        .collect()
}

/// 全ソース名（プロンプト表示用）
pub fn source_names() -> Vec<&'static str> {
    SourceKind::ALL.iter().map(SourceKind::as_str).collect()
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
