//! champion.gg ソース実装
//!
//! ロール別ページからビルドとスキル順を、トップページからチャンピオン一覧と
//! パッチ番号を取得する。

use super::html::{child_elements, collect_attr, has_class, next_element, selector, text_of};
use super::{Fetched, Source, SourceFuture};
use crate::champion::Champion;
use crate::config::HttpConfig;
use crate::error::{LbError, Result};
use crate::http;
use crate::item_set::{Build, ItemBuild, Skill, SkillOrder};
use reqwest::Client;
use scraper::Html;

const BASE_URL: &str = "https://champion.gg";
const NAME: &str = "championgg";
const SITE: &str = "champion.gg";

/// スキル表の行の並び（先頭行はレベル番号）
const SKILL_ROWS: [Skill; 4] = [Skill::Q, Skill::W, Skill::E, Skill::R];

/// champion.gg ソース
pub struct ChampionggSource {
    http: Client,
}

impl ChampionggSource {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            http: config.build_client(),
        }
    }

    /// チャンピオンページURL（ロール省略時は最も使われているロール）
    pub(super) fn champion_url(champion_name: &str, role: Option<&str>) -> String {
        match role {
            Some(role) => format!("{}/champion/{}/{}", BASE_URL, champion_name, role),
            None => format!("{}/champion/{}", BASE_URL, champion_name),
        }
    }
}

impl Source for ChampionggSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "champion.gg"
    }

    fn supports_roles(&self) -> bool {
        true
    }

    fn fetch_champions(&self) -> SourceFuture<'_, Vec<Champion>> {
        Box::pin(async move {
            let body = http::fetch_text(&self.http, BASE_URL, SITE).await?;
            parse_champions(&body)
        })
    }

    fn fetch_items<'a>(
        &'a self,
        champion: &'a Champion,
        role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<ItemBuild>> {
        Box::pin(async move {
            let url = Self::champion_url(&champion.name, role);
            let body = http::fetch_text(&self.http, &url, SITE).await?;
            parse_items(&body)
        })
    }

    fn fetch_skill_order<'a>(
        &'a self,
        champion: &'a Champion,
        role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<SkillOrder>> {
        Box::pin(async move {
            let url = Self::champion_url(&champion.name, role);
            let body = http::fetch_text(&self.http, &url, SITE).await?;
            parse_skill_order(&body)
        })
    }

    fn fetch_version(&self) -> SourceFuture<'_, String> {
        Box::pin(async move {
            let body = http::fetch_text(&self.http, BASE_URL, SITE).await?;
            parse_version(&body)
        })
    }
}

/// トップページからチャンピオン一覧を抽出
///
/// ロールは表示されているリンク順（ゲーム内での優先度順）に並ぶ。
pub(crate) fn parse_champions(body: &str) -> Result<Vec<Champion>> {
    let doc = Html::parse_document(body);
    let card_sel = selector(NAME, "div.champ-height")?;
    let img_sel = selector(NAME, "div.champ-index-img")?;
    let name_sel = selector(NAME, "span.champion-name")?;
    let tooltip_sel = selector(NAME, "div.tsm-tooltip")?;
    let role_sel = selector(NAME, "a")?;

    let mut champions = Vec::new();

    for card in doc.select(&card_sel) {
        // クラスの2番目がスラッグ（例: "champ-index-img Ahri"）
        let Some(slug) = card
            .select(&img_sel)
            .next()
            .and_then(|img| img.value().attr("class"))
            .and_then(|class| class.split_whitespace().nth(1))
        else {
            continue;
        };

        let display_name = card
            .select(&name_sel)
            .next()
            .map(text_of)
            .unwrap_or_else(|| slug.to_string());

        let id = card
            .select(&tooltip_sel)
            .next()
            .and_then(|t| t.value().attr("data-id"))
            .unwrap_or_default();

        let roles: Vec<String> = card
            .select(&role_sel)
            .filter(|a| a.value().attr("style") == Some("display:block"))
            .map(text_of)
            .filter(|role| !role.is_empty())
            .collect();

        champions.push(Champion::new(slug, &display_name, id).with_roles(roles));
    }

    if champions.is_empty() {
        return Err(LbError::scrape(NAME, "no champions found on the index page"));
    }

    Ok(champions)
}

/// ビルドの見出し
const FREQUENT_FULL: &str = "Most Frequent Completed Build";
const FREQUENT_STARTERS: &str = "Most Frequent Starters";
const HIGHEST_FULL: &str = "Highest Win % Completed Build";
const HIGHEST_STARTERS: &str = "Highest Win % Starters";

/// ロール別ページからアイテムビルドを抽出
///
/// 各ビルドは見出し `h2` の次の `div` に並ぶ画像の `data-id`。
pub(crate) fn parse_items(body: &str) -> Result<Fetched<ItemBuild>> {
    let doc = Html::parse_document(body);
    let h2_sel = selector(NAME, "h2")?;
    let img_sel = selector(NAME, "a img")?;

    let mut missing = Vec::new();
    let mut section = |caption: &str| -> Vec<String> {
        let block = doc
            .select(&h2_sel)
            .find(|h2| text_of(*h2) == caption)
            .and_then(next_element)
            .filter(|el| el.value().name() == "div");

        match block {
            Some(div) => collect_attr(div, &img_sel, "data-id"),
            None => {
                missing.push(caption.to_string());
                Vec::new()
            }
        }
    };

    let items = ItemBuild {
        frequent: Build {
            full: section(FREQUENT_FULL),
            starters: section(FREQUENT_STARTERS),
        },
        highest: Build {
            full: section(HIGHEST_FULL),
            starters: section(HIGHEST_STARTERS),
        },
    };

    if missing.is_empty() {
        Ok(Fetched::Found(items))
    } else {
        Ok(Fetched::not_found(
            items,
            format!("missing {}", missing.join(", ")),
        ))
    }
}

/// スキル表からスキル順を抽出
///
/// `div.skill-order` が2つあり、1つ目が最頻出、2つ目が最高勝率。
/// 各表は レベル行 + Q/W/E/R 行で、各行の `div.skill-selections` 配下の
/// 18個のセルのうち `selected` なものがそのレベルで上げるスキル。
/// probuilds.net もロール指定なしのページでこの表を使う。
pub(crate) fn parse_skill_order(body: &str) -> Result<Fetched<SkillOrder>> {
    let doc = Html::parse_document(body);
    let table_sel = selector(NAME, "div.skill-order")?;
    let selections_sel = selector(NAME, "div.skill-selections")?;

    let mut orders: Vec<Vec<Skill>> = Vec::new();

    for table in doc.select(&table_sel).take(2) {
        let rows: Vec<Vec<bool>> = child_elements(table)
            .filter(|row| has_class(*row, "skill"))
            .skip(1)
            .take(SKILL_ROWS.len())
            .map(|row| {
                row.select(&selections_sel)
                    .next()
                    .map(|cells| {
                        child_elements(cells)
                            .map(|cell| has_class(cell, "selected"))
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect();

        let levels = rows.iter().map(Vec::len).max().unwrap_or(0);
        let order = (0..levels)
            .filter_map(|level| {
                rows.iter()
                    .position(|cells| cells.get(level).copied().unwrap_or(false))
                    .map(|row| SKILL_ROWS[row])
            })
            .collect();

        orders.push(order);
    }

    let mut orders = orders.into_iter();
    let skill_order = SkillOrder {
        frequent: orders.next().unwrap_or_default(),
        highest: orders.next().unwrap_or_default(),
    };

    if skill_order.frequent.is_empty() || skill_order.highest.is_empty() {
        Ok(Fetched::not_found(skill_order, "skill order table not found"))
    } else {
        Ok(Fetched::Found(skill_order))
    }
}

/// トップページの最初の `<strong>` がパッチ番号
pub(crate) fn parse_version(body: &str) -> Result<String> {
    let doc = Html::parse_document(body);
    let strong_sel = selector(NAME, "strong")?;

    doc.select(&strong_sel)
        .next()
        .map(text_of)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LbError::scrape(NAME, "patch version not found"))
}

#[cfg(test)]
#[path = "championgg_test.rs"]
mod tests;
