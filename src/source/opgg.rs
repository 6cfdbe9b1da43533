//! op.gg ソース実装
//!
//! ロール別統計ページの推奨ビルド表から、ピック率最大の行を最頻出、
//! 勝率最大の行を最高勝率として扱う。

use super::html::{selector, text_of};
use super::{Fetched, Source, SourceFuture};
use crate::champion::Champion;
use crate::config::HttpConfig;
use crate::error::{LbError, Result};
use crate::http;
use crate::item_set::{Build, ItemBuild, Skill, SkillOrder};
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

const BASE_URL: &str = "https://www.op.gg";
const NAME: &str = "opgg";
const SITE: &str = "op.gg";

/// op.gg 上のロールのURL表記
fn role_slug(role: &str) -> String {
    match role.trim().to_lowercase().as_str() {
        "middle" | "mid" => "mid".to_string(),
        "bottom" | "bot" | "adc" => "bot".to_string(),
        "support" | "supp" => "support".to_string(),
        other => other.to_string(),
    }
}

/// op.gg ソース
pub struct OpggSource {
    http: Client,
}

impl OpggSource {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            http: config.build_client(),
        }
    }

    fn statistics_url(champion_name: &str, role: Option<&str>) -> String {
        match role {
            Some(role) => format!(
                "{}/champion/{}/statistics/{}",
                BASE_URL,
                champion_name,
                role_slug(role)
            ),
            None => format!("{}/champion/{}/statistics", BASE_URL, champion_name),
        }
    }

    fn statistics_page<'a>(
        &'a self,
        champion: &'a Champion,
        role: Option<&'a str>,
    ) -> SourceFuture<'a, String> {
        Box::pin(async move {
            let url = Self::statistics_url(&champion.name, role);
            http::fetch_text(&self.http, &url, SITE).await
        })
    }
}

impl Source for OpggSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "op.gg"
    }

    fn supports_roles(&self) -> bool {
        true
    }

    fn fetch_champions(&self) -> SourceFuture<'_, Vec<Champion>> {
        Box::pin(async move {
            let url = format!("{}/champion/statistics", BASE_URL);
            let body = http::fetch_text(&self.http, &url, SITE).await?;
            parse_champions(&body)
        })
    }

    fn fetch_items<'a>(
        &'a self,
        champion: &'a Champion,
        role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<ItemBuild>> {
        Box::pin(async move {
            let body = self.statistics_page(champion, role).await?;
            parse_items(&body)
        })
    }

    fn fetch_skill_order<'a>(
        &'a self,
        champion: &'a Champion,
        role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<SkillOrder>> {
        Box::pin(async move {
            let body = self.statistics_page(champion, role).await?;
            parse_skill_order(&body)
        })
    }

    fn fetch_version(&self) -> SourceFuture<'_, String> {
        Box::pin(async move {
            let url = format!("{}/champion/statistics", BASE_URL);
            let body = http::fetch_text(&self.http, &url, SITE).await?;
            parse_version(&body)
        })
    }
}

/// チャンピオン一覧ページから抽出
pub(crate) fn parse_champions(body: &str) -> Result<Vec<Champion>> {
    let doc = Html::parse_document(body);
    let item_sel = selector(NAME, "div.champion-index__champion-item")?;
    let position_sel = selector(NAME, "span.champion-index__champion-item__position")?;

    let champions: Vec<Champion> = doc
        .select(&item_sel)
        .filter_map(|item| {
            let attrs = item.value();
            let key = attrs.attr("data-champion-key")?;
            let display_name = attrs.attr("data-champion-name").unwrap_or(key);
            let id = attrs.attr("data-champion-id").unwrap_or_default();
            let roles: Vec<String> = item
                .select(&position_sel)
                .map(text_of)
                .filter(|role| !role.is_empty())
                .collect();
            Some(Champion::new(key, display_name, id).with_roles(roles))
        })
        .collect();

    if champions.is_empty() {
        return Err(LbError::scrape(NAME, "no champions found on the statistics page"));
    }

    Ok(champions)
}

/// 推奨ビルド表の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Core,
    Starter,
    Other,
}

impl Section {
    fn from_header(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("starter") {
            Section::Starter
        } else if text.contains("build") {
            Section::Core
        } else {
            Section::Other
        }
    }
}

/// 推奨ビルド表の1行
#[derive(Debug, Clone, PartialEq)]
struct BuildRow {
    section: Section,
    items: Vec<String>,
    pick_rate: f64,
    win_rate: f64,
}

/// "52.31%" → 52.31
fn parse_rate(text: &str) -> Option<f64> {
    text.trim().trim_end_matches('%').trim().parse().ok()
}

/// 画像URLからアイテムIDを抽出
fn item_id_pattern() -> Result<Regex> {
    Regex::new(r"item/(\d+)\.png").map_err(|e| LbError::scrape(NAME, e.to_string()))
}

fn parse_rows(doc: &Html) -> Result<Vec<BuildRow>> {
    let row_sel = selector(NAME, "table.champion-overview__table tr")?;
    let header_sel = selector(NAME, "th.champion-overview__sub-header")?;
    let img_sel = selector(NAME, "li.champion-stats__list__item img")?;
    let pick_sel = selector(NAME, "td.champion-overview__stats--pick")?;
    let win_sel = selector(NAME, "td.champion-overview__stats--win")?;
    let item_re = item_id_pattern()?;

    let rate = |row: ElementRef<'_>, sel: &Selector| {
        row.select(sel)
            .next()
            .and_then(|cell| parse_rate(&text_of(cell)))
    };

    let mut section = Section::Other;
    let mut rows = Vec::new();

    for row in doc.select(&row_sel) {
        if let Some(header) = row.select(&header_sel).next() {
            section = Section::from_header(&text_of(header));
        }

        let items: Vec<String> = row
            .select(&img_sel)
            .filter_map(|img| img.value().attr("src"))
            .filter_map(|src| item_re.captures(src))
            .map(|caps| caps[1].to_string())
            .collect();

        if items.is_empty() {
            continue;
        }

        rows.push(BuildRow {
            section,
            items,
            pick_rate: rate(row, &pick_sel).unwrap_or(0.0),
            win_rate: rate(row, &win_sel).unwrap_or(0.0),
        });
    }

    Ok(rows)
}

/// 指定区分の中で `key` が最大の行（同率なら先の行）
fn best_row(rows: &[BuildRow], section: Section, key: fn(&BuildRow) -> f64) -> Vec<String> {
    rows.iter()
        .filter(|row| row.section == section)
        .fold(None::<&BuildRow>, |best, row| match best {
            Some(b) if key(b) >= key(row) => Some(b),
            _ => Some(row),
        })
        .map(|row| row.items.clone())
        .unwrap_or_default()
}

/// 統計ページからアイテムビルドを抽出
pub(crate) fn parse_items(body: &str) -> Result<Fetched<ItemBuild>> {
    let doc = Html::parse_document(body);
    let rows = parse_rows(&doc)?;

    let by_pick = |row: &BuildRow| row.pick_rate;
    let by_win = |row: &BuildRow| row.win_rate;

    let items = ItemBuild {
        frequent: Build {
            full: best_row(&rows, Section::Core, by_pick),
            starters: best_row(&rows, Section::Starter, by_pick),
        },
        highest: Build {
            full: best_row(&rows, Section::Core, by_win),
            starters: best_row(&rows, Section::Starter, by_win),
        },
    };

    let mut missing = Vec::new();
    if items.frequent.full.is_empty() {
        missing.push("core build");
    }
    if items.frequent.starters.is_empty() {
        missing.push("starter items");
    }

    if missing.is_empty() {
        Ok(Fetched::Found(items))
    } else {
        Ok(Fetched::not_found(items, missing.join(", ")))
    }
}

/// スキル表からスキル順を抽出
///
/// 1つ目の表が最頻出、2つ目があれば最高勝率（無ければ最頻出と同じ）。
pub(crate) fn parse_skill_order(body: &str) -> Result<Fetched<SkillOrder>> {
    let doc = Html::parse_document(body);
    let table_sel = selector(NAME, "table.champion-skill-build__table")?;
    let cell_sel = selector(NAME, "td")?;

    let mut tables = doc.select(&table_sel).map(|table| {
        table
            .select(&cell_sel)
            .filter_map(|td| text_of(td).parse::<Skill>().ok())
            .collect::<Vec<_>>()
    });

    let Some(frequent) = tables.next().filter(|order| !order.is_empty()) else {
        return Ok(Fetched::not_found(
            SkillOrder::default(),
            "skill build table not found",
        ));
    };
    let highest = tables
        .next()
        .filter(|order| !order.is_empty())
        .unwrap_or_else(|| frequent.clone());

    Ok(Fetched::Found(SkillOrder { frequent, highest }))
}

/// "Version : 10.14" 形式のヘッダーからパッチ番号を抽出
pub(crate) fn parse_version(body: &str) -> Result<String> {
    let doc = Html::parse_document(body);
    let version_sel = selector(NAME, "div.champion-index__version")?;
    let re = Regex::new(r"(\d+\.\d+)").map_err(|e| LbError::scrape(NAME, e.to_string()))?;

    doc.select(&version_sel)
        .next()
        .map(text_of)
        .and_then(|text| re.captures(&text).map(|caps| caps[1].to_string()))
        .ok_or_else(|| LbError::scrape(NAME, "patch version not found"))
}

#[cfg(test)]
#[path = "opgg_test.rs"]
mod tests;
