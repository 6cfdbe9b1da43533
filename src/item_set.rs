//! アイテムセットのドメインモデル
//!
//! ソースから取得した生のリスト（アイテムID・スキル順）と、
//! それをまとめた1ファイル分の `ItemSet` を定義する。
//!
//! ## 構造
//!
//! ```text
//! ItemBuild ──┐
//!             ├──▶ ItemSet { role, sort_rank, frequent, highest }
//! SkillOrder ─┘                     │
//!                                   ▼
//!                           writer::ItemSetFile（JSON）
//! ```

mod skill;
mod tally;

pub use skill::{format_skill_order, Skill};
pub use tally::{tally, ItemCount};

use serde::{Deserialize, Serialize};

/// 選択戦略ごとのアイテム構成
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// 完成ビルド
    pub full: Vec<String>,
    /// スターターアイテム
    pub starters: Vec<String>,
}

/// ソースから取得したアイテムビルド
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBuild {
    /// 最頻出
    pub frequent: Build,
    /// 最高勝率
    pub highest: Build,
}

/// ソースから取得したスキル順
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillOrder {
    pub frequent: Vec<Skill>,
    pub highest: Vec<Skill>,
}

/// 1つの選択戦略に対応するアイテム・スキル構成
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub full: Vec<String>,
    pub starters: Vec<String>,
    pub skill_order: Vec<Skill>,
}

/// 出力単位のアイテムセット
///
/// ロール対応ソースでは (ソース, チャンピオン, ロール) ごと、
/// 非対応ソースでは (ソース, チャンピオン) ごとに1つ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSet {
    pub role: Option<String>,
    pub sort_rank: Option<i32>,
    pub frequent: Strategy,
    pub highest: Strategy,
}

impl ItemSet {
    /// ビルドとスキル順を組み合わせてアイテムセットを作成
    pub fn assemble(
        items: ItemBuild,
        skills: SkillOrder,
        role: Option<&str>,
        sort_rank: Option<i32>,
    ) -> Self {
        Self {
            role: role.map(str::to_string),
            sort_rank,
            frequent: Strategy {
                full: items.frequent.full,
                starters: items.frequent.starters,
                skill_order: skills.frequent,
            },
            highest: Strategy {
                full: items.highest.full,
                starters: items.highest.starters,
                skill_order: skills.highest,
            },
        }
    }
}
