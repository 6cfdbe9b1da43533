//! チャンピオン情報
//!
//! ソースのチャンピオン一覧取得で生成され、実行中は変更されない。

use serde::{Deserialize, Serialize};

/// チャンピオン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Champion {
    /// 小文字のスラッグ（ファイルパスに使用、同一性の基準）
    pub name: String,
    /// 表示名
    pub display_name: String,
    /// ソース固有のID
    pub id: String,
    /// ロール一覧（先頭ほど優先度が高い）
    pub roles: Vec<String>,
}

impl Champion {
    pub fn new(name: &str, display_name: &str, id: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            display_name: display_name.to_string(),
            id: id.to_string(),
            roles: Vec::new(),
        }
    }

    /// ロールを付与
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }
}

/// ロール順位からソートランクを算出
///
/// 先頭のロールが 10 となり、ゲーム内で既定のアイテムセットとして表示される。
pub fn sort_rank(role_index: usize) -> i32 {
    10 - role_index as i32
}
