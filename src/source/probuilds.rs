//! probuilds.net ソース実装
//!
//! プロの試合データから取得するためロール別のアイテムセットはない。
//! スキル順は probuilds.net に無いため champion.gg のロール指定なしページを使う。

use super::championgg::{self, ChampionggSource};
use super::html::{child_elements, collect_attr, next_element, selector, text_of};
use super::{Fetched, Source, SourceFuture};
use crate::champion::Champion;
use crate::config::HttpConfig;
use crate::error::{LbError, Result};
use crate::http;
use crate::item_set::{Build, ItemBuild, SkillOrder};
use crate::writer::TRINKET_ID;
use reqwest::Client;
use scraper::Html;
use serde::{Deserialize, Deserializer};

const BASE_URL: &str = "https://www.probuilds.net";
const NAME: &str = "probuilds";
const SITE: &str = "probuilds.net";

/// スターターとして拾う要素数（先頭要素とその子2つ）
const STARTER_SLOTS: usize = 3;

/// probuilds.net ソース
pub struct ProbuildsSource {
    http: Client,
}

impl ProbuildsSource {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            http: config.build_client(),
        }
    }
}

impl Source for ProbuildsSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "probuilds.net"
    }

    fn supports_roles(&self) -> bool {
        false
    }

    fn fetch_champions(&self) -> SourceFuture<'_, Vec<Champion>> {
        Box::pin(async move {
            let url = format!("{}/ajax/championListNew", BASE_URL);
            let list: ChampionList = http::fetch_json(&self.http, &url, SITE).await?;
            list.into_champions()
        })
    }

    fn fetch_items<'a>(
        &'a self,
        champion: &'a Champion,
        _role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<ItemBuild>> {
        Box::pin(async move {
            let builds_url = format!("{}/ajax/champBuilds?championId={}", BASE_URL, champion.id);
            let builds: ChampBuilds = http::fetch_json(&self.http, &builds_url, SITE).await?;

            let details_url = format!("{}/champions/details/{}", BASE_URL, champion.id);
            let details = http::fetch_text(&self.http, &details_url, SITE).await?;

            parse_items(&builds, &details)
        })
    }

    fn fetch_skill_order<'a>(
        &'a self,
        champion: &'a Champion,
        _role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<SkillOrder>> {
        Box::pin(async move {
            let url = ChampionggSource::champion_url(&champion.name, None);
            let body = http::fetch_text(&self.http, &url, "champion.gg").await?;
            championgg::parse_skill_order(&body)
        })
    }

    /// バージョン番号が無いため取得日を使う
    fn fetch_version(&self) -> SourceFuture<'_, String> {
        Box::pin(async move { Ok(chrono::Local::now().date_naive().to_string()) })
    }
}

/// `ajax/championListNew` のレスポンス
#[derive(Debug, Deserialize)]
pub(crate) struct ChampionList {
    #[serde(default)]
    champions: Vec<ChampionEntry>,
}

#[derive(Debug, Deserialize)]
struct ChampionEntry {
    /// スラッグ（例: "MissFortune"）
    id: String,
    name: String,
    /// 数値ID（文字列と数値のどちらでも返ってくる）
    #[serde(deserialize_with = "string_or_number")]
    key: String,
}

impl ChampionList {
    fn into_champions(self) -> Result<Vec<Champion>> {
        if self.champions.is_empty() {
            return Err(LbError::scrape(NAME, "champion list is empty"));
        }

        Ok(self
            .champions
            .into_iter()
            .map(|entry| Champion::new(&entry.id, &entry.name, &entry.key))
            .collect())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// `ajax/champBuilds` のレスポンス（各試合とビルド順はHTML断片）
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChampBuilds {
    #[serde(default)]
    matches: Vec<String>,
    #[serde(default)]
    build_order: String,
}

/// 試合ごとのビルドとKDA
#[derive(Debug, Clone, PartialEq)]
struct MatchBuild {
    items: Vec<String>,
    kda: f64,
}

/// アイテムビルドを組み立てる
///
/// - 最高勝率ビルド: KDAが最も高い試合のビルド
/// - スターター: ビルド順の先頭（両戦略で共通）
/// - 最頻出ビルド: 詳細ページの人気アイテム
pub(crate) fn parse_items(builds: &ChampBuilds, details: &str) -> Result<Fetched<ItemBuild>> {
    let mut missing = Vec::new();

    let mut best: Option<MatchBuild> = None;
    for fragment in &builds.matches {
        match parse_match(fragment)? {
            Some(candidate) => {
                if best.as_ref().map_or(true, |b| candidate.kda > b.kda) {
                    best = Some(candidate);
                }
            }
            None => tracing::debug!(source = NAME, "skipping match without KDA"),
        }
    }
    let highest_full = best.map(|b| b.items).unwrap_or_default();
    if highest_full.is_empty() {
        missing.push("highest win % build");
    }

    let starters = parse_starters(&builds.build_order)?;
    if starters.is_empty() {
        missing.push("starter items");
    }

    let frequent_full = parse_popular_items(details)?;
    if frequent_full.is_empty() {
        missing.push("frequent build");
    }

    let items = ItemBuild {
        frequent: Build {
            full: frequent_full,
            starters: starters.clone(),
        },
        highest: Build {
            full: highest_full,
            starters,
        },
    };

    if missing.is_empty() {
        Ok(Fetched::Found(items))
    } else {
        Ok(Fetched::not_found(items, missing.join(", ")))
    }
}

/// 1試合分のHTML断片からビルドとKDAを抽出（KDAが読めなければ `None`）
fn parse_match(fragment: &str) -> Result<Option<MatchBuild>> {
    let doc = Html::parse_fragment(fragment);
    let kda_sel = selector(NAME, "div.kda")?;
    let items_sel = selector(NAME, "div.items")?;
    let item_sel = selector(NAME, "img.tooltip")?;

    let Some(kda_div) = doc.select(&kda_sel).next() else {
        return Ok(None);
    };

    let stat = |class: &str| -> Result<Option<u32>> {
        let sel = selector(NAME, &format!("span.{}", class))?;
        Ok(kda_div
            .select(&sel)
            .next()
            .and_then(|span| text_of(span).parse().ok()))
    };

    let (Some(kills), Some(deaths), Some(assists)) = (stat("green")?, stat("red")?, stat("gold")?)
    else {
        return Ok(None);
    };

    let kda = f64::from(kills + assists) / f64::from(deaths.max(1));

    let mut items = doc
        .select(&items_sel)
        .next()
        .map(|div| collect_attr(div, &item_sel, "data-id"))
        .unwrap_or_default();
    // 最後はトリンケット
    items.pop();

    Ok(Some(MatchBuild { items, kda }))
}

/// ビルド順の先頭からスターターアイテムを抽出（トリンケットは除く）
fn parse_starters(build_order: &str) -> Result<Vec<String>> {
    let doc = Html::parse_fragment(build_order);
    let list_sel = selector(NAME, "div.build-list")?;

    let Some(first) = doc
        .select(&list_sel)
        .next()
        .and_then(|list| child_elements(list).next())
    else {
        return Ok(Vec::new());
    };

    let nested = child_elements(first).next();
    let slots = std::iter::once(first)
        .chain(nested)
        .chain(nested.and_then(next_element))
        .take(STARTER_SLOTS);

    Ok(slots
        .filter_map(|el| el.value().attr("data-id"))
        .filter(|id| *id != TRINKET_ID)
        .map(str::to_string)
        .collect())
}

/// 詳細ページの人気アイテムを抽出
fn parse_popular_items(details: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(details);
    let section_sel = selector(NAME, "div.popular-section")?;
    let data_sel = selector(NAME, "div.bigData")?;
    let tooltip_sel = selector(NAME, "div.tooltip")?;

    let Some(section) = doc.select(&section_sel).next() else {
        return Ok(Vec::new());
    };

    Ok(section
        .select(&data_sel)
        .filter_map(|data| {
            data.select(&tooltip_sel)
                .next()
                .and_then(|t| t.value().attr("data-id"))
                .map(str::to_string)
        })
        .collect())
}

#[cfg(test)]
#[path = "probuilds_test.rs"]
mod tests;
