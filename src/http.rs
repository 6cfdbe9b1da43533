//! 共通HTTPヘルパー

use crate::error::{LbError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// GETしてレスポンスを返す（2xx以外は `SiteApi` エラー）
async fn get_checked(client: &Client, url: &str, site: &str) -> Result<reqwest::Response> {
    tracing::debug!(%url, "GET");

    let response = client.get(url).send().await?;
    let status = response.status().as_u16();

    if !response.status().is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(LbError::SiteApi {
            site: site.to_string(),
            status,
            message: truncate(&message, 200),
        });
    }

    Ok(response)
}

/// ページ本文をテキストで取得
pub async fn fetch_text(client: &Client, url: &str, site: &str) -> Result<String> {
    let response = get_checked(client, url, site).await?;
    Ok(response.text().await?)
}

/// JSONレスポンスを取得してデシリアライズ
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str, site: &str) -> Result<T> {
    let response = get_checked(client, url, site).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// エラーメッセージ用にHTML本文を切り詰める
fn truncate(message: &str, max_chars: usize) -> String {
    match message.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &message[..idx]),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_message() {
        assert_eq!(truncate("Not Found", 200), "Not Found");
    }

    #[test]
    fn test_truncate_long_message() {
        let long = "a".repeat(300);
        let result = truncate(&long, 200);
        assert_eq!(result.len(), 203);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte() {
        // 文字境界で切ることを確認
        assert_eq!(truncate("ééé", 2), "éé...");
    }
}
