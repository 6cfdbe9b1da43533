//! HTML抽出ヘルパー
//!
//! 各ソースのパーサーで共通して使う小さな関数群。

use crate::error::{LbError, Result};
use scraper::{ElementRef, Selector};

/// CSSセレクタをコンパイル
pub fn selector(source_name: &str, css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| LbError::scrape(source_name, format!("invalid selector '{}': {:?}", css, e)))
}

/// 要素内のテキストを連結して前後の空白を除去
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 要素がクラスを持つか
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// 直下の子要素
pub fn child_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap)
}

/// 次の兄弟要素
pub fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// 配下の要素から属性値を順に集める
pub fn collect_attr(element: ElementRef<'_>, selector: &Selector, attr: &str) -> Vec<String> {
    element
        .select(selector)
        .filter_map(|e| e.value().attr(attr))
        .map(str::to_string)
        .collect()
}
