//! ソース1つ分のインポート処理
//!
//! チャンピオン・ロールごとに取得したビルドとスキル順を `ItemSet` にまとめ、
//! 古いファイルを削除してから書き出す。チャンピオン単位の失敗はログに残して続行し、
//! チャンピオン一覧とバージョンの取得失敗だけがソース全体を中断する。

use crate::champion::{sort_rank, Champion};
use crate::error::Result;
use crate::item_set::{ItemBuild, ItemSet, SkillOrder};
use crate::source::{Fetched, Source};
use crate::store::{self, SharedConfigStore};
use crate::writer::ItemSetWriter;
use indicatif::ProgressBar;

/// インポート結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// 処理したチャンピオン数
    pub champions: usize,
    /// 書き出したアイテムセット数
    pub written: usize,
    /// 書き出しに失敗したアイテムセット数
    pub failed: usize,
    /// インポートしたバージョン
    pub version: String,
}

/// 取得結果を展開し、見つからない・失敗した場合はログに残す
fn unwrap_fetched<T: Default>(
    result: Result<Fetched<T>>,
    what: &str,
    champion: &Champion,
    role: Option<&str>,
    source: &dyn Source,
) -> T {
    let target = match role {
        Some(role) => format!("{} {}", champion.display_name, role),
        None => champion.display_name.clone(),
    };

    match result {
        Ok(Fetched::Found(data)) => data,
        Ok(Fetched::NotFound { partial, reason }) => {
            tracing::warn!(
                "NOT FOUND: {} for {} not found on {} ({})",
                what,
                target,
                source.display_name(),
                reason
            );
            partial
        }
        Err(e) => {
            tracing::warn!(
                "ERROR: {} for {} on {}: {}",
                what,
                target,
                source.display_name(),
                e
            );
            T::default()
        }
    }
}

/// チャンピオンのアイテムセットを取得
///
/// ロール対応ソースではロールごと（先頭ほど `sort_rank` が高い）、
/// 非対応ソースでは1つだけ作る。
pub async fn item_sets_for(source: &dyn Source, champion: &Champion) -> Vec<ItemSet> {
    if !source.supports_roles() {
        let items: ItemBuild =
            unwrap_fetched(source.fetch_items(champion, None).await, "Build", champion, None, source);
        let skills: SkillOrder = unwrap_fetched(
            source.fetch_skill_order(champion, None).await,
            "Skill order",
            champion,
            None,
            source,
        );
        return vec![ItemSet::assemble(items, skills, None, None)];
    }

    let mut item_sets = Vec::with_capacity(champion.roles.len());

    for (index, role) in champion.roles.iter().enumerate() {
        let role = Some(role.as_str());
        let items: ItemBuild = unwrap_fetched(
            source.fetch_items(champion, role).await,
            "Build",
            champion,
            role,
            source,
        );
        let skills: SkillOrder = unwrap_fetched(
            source.fetch_skill_order(champion, role).await,
            "Skill order",
            champion,
            role,
            source,
        );
        item_sets.push(ItemSet::assemble(items, skills, role, Some(sort_rank(index))));
    }

    item_sets
}

/// ソースの全チャンピオンのアイテムセットをインポート
///
/// バージョンは書き出し前に設定へ保存する。
pub async fn import_item_sets(
    source: &dyn Source,
    store: &SharedConfigStore,
    writer: &ItemSetWriter,
    progress: &ProgressBar,
) -> Result<ImportReport> {
    let champions = source.fetch_champions().await?;
    let version = source.fetch_version().await?;

    store::lock(store).save(source.name(), Some(&version))?;
    tracing::info!(
        source = source.name(),
        %version,
        champions = champions.len(),
        "importing item sets"
    );

    progress.set_length(champions.len() as u64);

    let mut report = ImportReport {
        version,
        ..ImportReport::default()
    };

    for champion in &champions {
        progress.set_message(champion.display_name.clone());

        if let Err(e) = writer.delete(&champion.name, source.name()) {
            tracing::warn!(
                "ERROR: could not remove old item sets for {}: {}",
                champion.display_name,
                e
            );
        }

        for item_set in item_sets_for(source, champion).await {
            match writer.save(
                champion,
                &item_set,
                &report.version,
                source.name(),
                source.supports_roles(),
            ) {
                Ok(_) => report.written += 1,
                Err(e) => {
                    tracing::warn!(
                        "ERROR: could not write item set for {}: {}",
                        champion.display_name,
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        report.champions += 1;
        progress.inc(1);
    }

    Ok(report)
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
