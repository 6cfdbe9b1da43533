//! アイテムセットファイルの書き出し
//!
//! ゲームクライアントが読み込むJSON形式に変換し、
//! `<install>/Config/Champions/<champion>/Recommended/` 配下へ保存・削除する。
//!
//! フィールド名とブロックの並び順はクライアント側で固定されているため変更しないこと。

use crate::champion::Champion;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::item_set::{format_skill_order, tally, ItemCount, ItemSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// スターターに必ず追加されるトリンケット（Warding Totem）
pub const TRINKET_ID: &str = "3340";

/// 消耗品ブロックの固定アイテム
const CONSUMABLE_IDS: [&str; 6] = ["2003", "2031", "2055", "2138", "2139", "2140"];

/// トリンケットブロックの固定アイテム
const TRINKET_IDS: [&str; 3] = ["3340", "3363", "3364"];

/// アイテムセット内のブロック
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub items: Vec<ItemCount>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Block {
    fn new(kind: impl Into<String>, items: Vec<ItemCount>) -> Self {
        Self {
            items,
            kind: kind.into(),
        }
    }

    fn fixed(kind: impl Into<String>, ids: &[&str]) -> Self {
        Self::new(kind, ids.iter().map(|id| ItemCount::single(id)).collect())
    }
}

/// ゲームクライアントのアイテムセットファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSetFile {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub map: String,
    pub mode: String,
    pub priority: bool,
    pub champion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortrank: Option<i32>,
    pub blocks: Vec<Block>,
}

impl ItemSetFile {
    /// アイテムセットからファイル内容を構築
    pub fn build(
        champion: &Champion,
        item_set: &ItemSet,
        version: &str,
        source_name: &str,
        roles: bool,
    ) -> Self {
        let role_suffix = match (&item_set.role, roles) {
            (Some(role), true) => format!(" {}", role),
            _ => String::new(),
        };

        let blocks = vec![
            Block::new(
                "Most Frequent Starters",
                starters_with_trinket(&item_set.frequent.starters),
            ),
            Block::new(
                "Highest Win % Starters",
                starters_with_trinket(&item_set.highest.starters),
            ),
            Block::new("Most Frequent Build", tally(&item_set.frequent.full)),
            Block::new("Highest Win % Build", tally(&item_set.highest.full)),
            Block::fixed(
                format!(
                    "Consumables | Frequent: {}",
                    format_skill_order(&item_set.frequent.skill_order)
                ),
                &CONSUMABLE_IDS,
            ),
            Block::fixed(
                format!(
                    "Trinkets | Wins: {}",
                    format_skill_order(&item_set.highest.skill_order)
                ),
                &TRINKET_IDS,
            ),
        ];

        Self {
            title: format!("{}{} {}", capitalize(source_name), role_suffix, version),
            kind: "custom".to_string(),
            map: "any".to_string(),
            mode: "any".to_string(),
            priority: false,
            champion: champion.name.clone(),
            sortrank: if roles { item_set.sort_rank } else { None },
            blocks,
        }
    }
}

/// スターターを集計し、トリンケットを末尾に1つだけ追加する
fn starters_with_trinket(starters: &[String]) -> Vec<ItemCount> {
    let without_trinket: Vec<&str> = starters
        .iter()
        .map(String::as_str)
        .filter(|id| *id != TRINKET_ID)
        .collect();

    let mut items = tally(&without_trinket);
    items.push(ItemCount::single(TRINKET_ID));
    items
}

/// 先頭だけ大文字、残りは小文字
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// アイテムセットの書き出し先
///
/// インストールフォルダを明示的に受け取り、設定ファイルには依存しない。
pub struct ItemSetWriter {
    install_path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl ItemSetWriter {
    pub fn new(install_path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            install_path: install_path.into(),
            fs,
        }
    }

    /// `Config/Champions` ディレクトリ
    pub fn champions_dir(&self) -> PathBuf {
        self.install_path.join("Config").join("Champions")
    }

    /// チャンピオンの `Recommended` ディレクトリ
    pub fn recommended_dir(&self, champion_name: &str) -> PathBuf {
        self.champions_dir().join(champion_name).join("Recommended")
    }

    /// ファイル名（例: `championgg_Top.json`）
    pub fn file_name(source_name: &str, role: Option<&str>) -> String {
        match role {
            Some(role) => format!("{}_{}.json", source_name, role),
            None => format!("{}.json", source_name),
        }
    }

    /// アイテムセットを保存し、書き込んだパスを返す
    ///
    /// ディレクトリが無ければ作成する（macOS では既定で作られない）。
    pub fn save(
        &self,
        champion: &Champion,
        item_set: &ItemSet,
        version: &str,
        source_name: &str,
        roles: bool,
    ) -> Result<PathBuf> {
        let file = ItemSetFile::build(champion, item_set, version, source_name, roles);

        let dir = self.recommended_dir(&champion.name);
        self.fs.create_dir_all(&dir)?;

        let role = if roles { item_set.role.as_deref() } else { None };
        let path = dir.join(Self::file_name(source_name, role));

        let content = serde_json::to_string(&file)?;
        self.fs.write(&path, content.as_bytes())?;

        tracing::debug!(path = %path.display(), "item set written");
        Ok(path)
    }

    /// チャンピオンのアイテムセットのうち、ソース名を含むファイルを削除
    ///
    /// ディレクトリが存在しない場合は何もしない。削除した件数を返す。
    pub fn delete(&self, champion_name: &str, source_name: &str) -> Result<usize> {
        let dir = self.recommended_dir(champion_name);
        if !self.fs.is_dir(&dir) {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in self.fs.read_dir(&dir)? {
            if entry.is_dir() || !entry.file_name().contains(source_name) {
                continue;
            }
            self.fs.remove_file(&entry.path)?;
            removed += 1;
        }

        Ok(removed)
    }

    /// 全チャンピオンについて、ソースのアイテムセットを削除
    pub fn delete_all(&self, source_name: &str) -> Result<usize> {
        let champions_dir = self.champions_dir();
        if !self.fs.is_dir(&champions_dir) {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in self.fs.read_dir(&champions_dir)? {
            if entry.is_dir() {
                removed += self.delete(entry.file_name(), source_name)?;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
