//! 実行全体の流れ（状態マシン）
//!
//! ## 状態遷移図
//!
//! ```text
//! ┌────────────────┐
//! │ PathResolution │  --path / 保存済み / 既定パス / 対話入力
//! └───────┬────────┘
//!         ▼
//! ┌────────────────┐
//! │   ModeSelect   │  "" = 全ソース取り込み, "d" = 削除, ソース名 = そのソースのみ
//! └───┬────────┬───┘
//!     ▼        ▼
//! ┌────────┐ ┌────────┐
//! │Importing│ │Deleting│
//! └───┬────┘ └───┬────┘
//!     └────┬─────┘
//!          ▼
//!     ┌────────┐
//!     │  Done  │
//!     └────────┘
//! ```
//!
//! 取り込みはソースごとに1タスクを起動し、同時実行数を
//! `min(ソース数, 利用可能な並列度)` に制限して全タスクの完了を待つ。

use crate::aggregator::{self, ImportReport};
use crate::error::{LbError, Result};
use crate::fs::FileSystem;
use crate::install_path::{self, Platform};
use crate::output;
use crate::prompt::Prompter;
use crate::source::{Source, SourceKind};
use crate::store::{self, SharedConfigStore};
use crate::version::{self, VersionStatus};
use crate::writer::ItemSetWriter;
use indicatif::MultiProgress;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// 実行モード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// 取り込み（`None` は全ソース）
    Import(Option<SourceKind>),
    /// 削除（`None` は全ソース）
    Delete(Option<SourceKind>),
}

/// モード選択の入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeInput {
    ImportAll,
    ImportOne(SourceKind),
    /// 削除対象を続けて尋ねる
    Delete,
}

/// モード選択の入力を解釈
pub fn parse_mode_input(input: &str) -> Result<ModeInput> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(ModeInput::ImportAll);
    }
    if input.eq_ignore_ascii_case("d") {
        return Ok(ModeInput::Delete);
    }
    SourceKind::from_name(input).map(ModeInput::ImportOne)
}

/// 削除対象の入力を解釈（空は全ソース）
pub fn parse_delete_target(input: &str) -> Result<Option<SourceKind>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    SourceKind::from_name(input).map(Some)
}

fn source_list() -> String {
    crate::source::source_names().join(", ")
}

/// 妥当な入力があるまでモードを尋ねる
pub fn select_mode(prompter: &mut dyn Prompter) -> Result<Mode> {
    let question = format!(
        "Press Enter to import all item sets, 'd' to delete, or a source name ({}): ",
        source_list()
    );

    loop {
        match parse_mode_input(&prompter.ask(&question)?) {
            Ok(ModeInput::ImportAll) => return Ok(Mode::Import(None)),
            Ok(ModeInput::ImportOne(kind)) => return Ok(Mode::Import(Some(kind))),
            Ok(ModeInput::Delete) => break,
            Err(e) => output::print_invalid_choice(&e),
        }
    }

    let question = format!(
        "Press Enter to delete item sets of all sources, or a source name ({}): ",
        source_list()
    );

    loop {
        match parse_delete_target(&prompter.ask(&question)?) {
            Ok(target) => return Ok(Mode::Delete(target)),
            Err(e) => output::print_invalid_choice(&e),
        }
    }
}

/// ソース1つ分のタスク結果
#[derive(Debug)]
pub struct WorkerOutcome {
    pub source: &'static str,
    pub result: std::result::Result<ImportReport, String>,
}

/// ソース1つ分の削除結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub source: &'static str,
    pub result: std::result::Result<usize, String>,
}

/// 実行結果
#[derive(Debug)]
pub enum Outcome {
    Imported(Vec<WorkerOutcome>),
    Deleted(Vec<DeleteOutcome>),
}

/// ワーカー数: `min(ソース数, 利用可能な並列度)`
pub fn worker_count(sources: usize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    sources.min(cores).max(1)
}

/// 全ソースを並行して取り込み、全タスクの完了を待つ
///
/// 結果はソースの並び順で返す。
pub async fn import_all(
    sources: Vec<Arc<dyn Source>>,
    store: &SharedConfigStore,
    writer: Arc<ItemSetWriter>,
    progress: &MultiProgress,
) -> Vec<WorkerOutcome> {
    let order: Vec<&'static str> = sources.iter().map(|s| s.name()).collect();
    let semaphore = Arc::new(Semaphore::new(worker_count(sources.len())));
    let mut tasks = JoinSet::new();

    for source in sources {
        let semaphore = semaphore.clone();
        let store = store.clone();
        let writer = writer.clone();
        let bar = progress.add(output::source_spinner(source.display_name()));

        tasks.spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(e) => {
                    return (source.name(), Err(LbError::Worker(e.to_string())));
                }
            };

            bar.enable_steady_tick(output::TICK);
            let result = aggregator::import_item_sets(source.as_ref(), &store, &writer, &bar).await;
            output::finish_spinner(&bar, &result);

            (source.name(), result)
        });
    }

    let mut outcomes: Vec<WorkerOutcome> = Vec::with_capacity(order.len());
    let mut crashed = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, result)) => {
                if let Err(e) = &result {
                    tracing::error!(source = name, error = %e, "import failed");
                }
                outcomes.push(WorkerOutcome {
                    source: name,
                    result: result.map_err(|e| e.to_string()),
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "import worker crashed");
                crashed.push(e.to_string());
            }
        }
    }

    // 結果を返さなかったタスクは失敗として扱う
    for name in &order {
        if !outcomes.iter().any(|o| o.source == *name) {
            let message = crashed
                .pop()
                .unwrap_or_else(|| "worker did not finish".to_string());
            outcomes.push(WorkerOutcome {
                source: *name,
                result: Err(message),
            });
        }
    }

    outcomes.sort_by_key(|o| order.iter().position(|name| *name == o.source));
    outcomes
}

/// 指定ソースのアイテムセットを全チャンピオンから削除
pub fn delete_all(sources: &[Arc<dyn Source>], writer: &ItemSetWriter) -> Vec<DeleteOutcome> {
    sources
        .iter()
        .map(|source| {
            let result = writer.delete_all(source.name()).map_err(|e| e.to_string());
            if let Ok(removed) = result {
                tracing::info!(source = source.name(), removed, "item sets deleted");
            }
            DeleteOutcome {
                source: source.name(),
                result,
            }
        })
        .collect()
}

/// 実行全体
pub struct Orchestrator<'a> {
    pub sources: Vec<Arc<dyn Source>>,
    pub store: SharedConfigStore,
    pub fs: Arc<dyn FileSystem>,
    pub platform: Platform,
    pub path_flag: Option<PathBuf>,
    pub prompter: &'a mut dyn Prompter,
    /// スピナー表示（ログ出力と共有）
    pub progress: MultiProgress,
}

impl Orchestrator<'_> {
    /// インストールフォルダを解決
    pub fn resolve_path(&mut self) -> Result<PathBuf> {
        install_path::resolve_install_path(
            self.path_flag.as_deref(),
            &self.store,
            self.platform,
            self.fs.as_ref(),
            self.prompter,
        )
    }

    /// モードに応じて取り込みまたは削除を実行
    pub async fn execute(&self, install_path: PathBuf, mode: Mode) -> Outcome {
        let writer = Arc::new(ItemSetWriter::new(install_path, self.fs.clone()));

        match mode {
            Mode::Import(target) => {
                let sources = self.select_sources(target);
                println!("Importing item sets from {}...", names(&sources));
                Outcome::Imported(import_all(sources, &self.store, writer, &self.progress).await)
            }
            Mode::Delete(target) => {
                let sources = self.select_sources(target);
                println!("Deleting item sets from {}...", names(&sources));
                Outcome::Deleted(delete_all(&sources, &writer))
            }
        }
    }

    /// ゲームパッチと各ソースのバージョンを比較
    ///
    /// バージョンを取得できなかったソースは警告して除外する。
    pub async fn check_versions(&self, client: &Client) -> Result<(String, Vec<VersionStatus>)> {
        let lol_version = version::lol_version(client).await?;
        let mut statuses = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let source_version = match source.fetch_version().await {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!("ERROR: could not get {} version: {}", source.display_name(), e);
                    continue;
                }
            };
            let local_version = store::lock(&self.store).imported_version(source.name())?;
            let status = VersionStatus::evaluate(
                source.name(),
                &source_version,
                &lol_version,
                local_version.as_deref(),
            );
            tracing::debug!("{}", status.summary_line());
            statuses.push(status);
        }

        Ok((lol_version, statuses))
    }

    fn select_sources(&self, target: Option<SourceKind>) -> Vec<Arc<dyn Source>> {
        self.sources
            .iter()
            .filter(|source| target.map_or(true, |kind| kind.as_str() == source.name()))
            .cloned()
            .collect()
    }
}

fn names(sources: &[Arc<dyn Source>]) -> String {
    sources
        .iter()
        .map(|s| s.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
