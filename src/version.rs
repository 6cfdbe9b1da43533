//! パッチバージョンの確認
//!
//! Data Dragon から現在のゲームパッチを取得し、ソースごとに
//! サイトのバージョンと取り込み済みバージョンを比較する。

use crate::error::{LbError, Result};
use crate::http;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use reqwest::Client;

const VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";

/// 現在のゲームパッチ（例: "10.14.5" → "10.14"）
pub async fn lol_version(client: &Client) -> Result<String> {
    let versions: Vec<String> = http::fetch_json(client, VERSIONS_URL, "ddragon").await?;
    versions
        .first()
        .map(|latest| major_minor(latest))
        .ok_or_else(|| LbError::scrape("ddragon", "version list is empty"))
}

fn major_minor(version: &str) -> String {
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}

/// バージョン文字列を数値として解釈（"10.14" → 10.14）
///
/// 日付など数値でないものは `None`（比較しない）。
pub fn parse_version(version: &str) -> Option<f64> {
    version.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// ソースごとのバージョン比較結果
#[derive(Debug, Clone, PartialEq)]
pub struct VersionStatus {
    pub source: String,
    pub source_version: String,
    pub local_version: Option<String>,
    /// ゲームパッチの方が新しい（サイトが未更新）
    pub source_outdated: bool,
    /// サイトの方が取り込み済みより新しい
    pub local_outdated: bool,
}

impl VersionStatus {
    pub fn evaluate(
        source: &str,
        source_version: &str,
        lol_version: &str,
        local_version: Option<&str>,
    ) -> Self {
        let site = parse_version(source_version);
        let game = parse_version(lol_version);

        let source_outdated = matches!((game, site), (Some(game), Some(site)) if game > site);
        let local_outdated = match (site, local_version.and_then(parse_version)) {
            (Some(site), Some(local)) => site > local,
            _ => false,
        };

        Self {
            source: source.to_string(),
            source_version: source_version.to_string(),
            local_version: local_version.map(str::to_string),
            source_outdated,
            local_outdated,
        }
    }

    /// 1行の表示（例: `championgg version: 10.13 (Not updated to new patch yet), imported version: 10.12 (outdated!)`）
    pub fn summary_line(&self) -> String {
        format!(
            "{} version: {}{}, imported version: {}{}",
            self.source,
            self.source_version,
            if self.source_outdated {
                " (Not updated to new patch yet)"
            } else {
                ""
            },
            self.local_version.as_deref().unwrap_or("None"),
            if self.local_outdated { " (outdated!)" } else { "" },
        )
    }
}

/// バージョン一覧を表にする
pub fn render_table(lol_version: &str, statuses: &[VersionStatus]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Source"),
            Cell::new(format!("Site version (LoL {})", lol_version)),
            Cell::new("Imported version"),
        ]);

    for status in statuses {
        let site = if status.source_outdated {
            Cell::new(format!("{} (Not updated to new patch yet)", status.source_version))
                .fg(Color::Yellow)
        } else {
            Cell::new(&status.source_version)
        };

        let local_text = status.local_version.as_deref().unwrap_or("None");
        let local = if status.local_outdated {
            Cell::new(format!("{} (outdated!)", local_text)).fg(Color::Red)
        } else {
            Cell::new(local_text)
        };

        table.add_row(vec![Cell::new(&status.source), site, local]);
    }

    table
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
