//! アイテムIDの集計

use serde::{Deserialize, Serialize};

/// 個数付きアイテム（アイテムセットJSONの `items` 要素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCount {
    pub count: u32,
    pub id: String,
}

impl ItemCount {
    pub fn single(id: &str) -> Self {
        Self {
            count: 1,
            id: id.to_string(),
        }
    }
}

/// アイテムID列を (ID, 出現数) に集約する
///
/// 順序は最初に出現した順を保つ。出現数の合計は入力長と一致する。
pub fn tally<S: AsRef<str>>(ids: &[S]) -> Vec<ItemCount> {
    let mut counts: Vec<ItemCount> = Vec::new();

    for id in ids {
        let id = id.as_ref();
        match counts.iter_mut().find(|c| c.id == id) {
            Some(entry) => entry.count += 1,
            None => counts.push(ItemCount::single(id)),
        }
    }

    counts
}
