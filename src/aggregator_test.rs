//! aggregator のユニットテスト

use super::*;
use crate::error::LbError;
use crate::fs::mock::MockFs;
use crate::item_set::{Build, Skill};
use crate::source::SourceFuture;
use crate::store::ConfigStore;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const INSTALL: &str = "/games/League of Legends";

/// 固定データを返すテスト用ソース
struct FakeSource {
    roles: bool,
    champions: Vec<Champion>,
    fail_champions: bool,
    fail_version: bool,
    items_missing: bool,
    skill_error: bool,
    /// 取得要求の記録（チャンピオン名, ロール）
    requests: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeSource {
    fn new(roles: bool, champions: Vec<Champion>) -> Self {
        Self {
            roles,
            champions,
            fail_champions: false,
            fail_version: false,
            items_missing: false,
            skill_error: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn items() -> ItemBuild {
        ItemBuild {
            frequent: Build {
                full: vec!["3031".to_string()],
                starters: vec!["1055".to_string()],
            },
            highest: Build {
                full: vec!["3087".to_string()],
                starters: vec!["1036".to_string()],
            },
        }
    }
}

impl Source for FakeSource {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn display_name(&self) -> &'static str {
        "fake.gg"
    }

    fn supports_roles(&self) -> bool {
        self.roles
    }

    fn fetch_champions(&self) -> SourceFuture<'_, Vec<Champion>> {
        Box::pin(async move {
            if self.fail_champions {
                return Err(LbError::scrape("fake", "markup changed"));
            }
            Ok(self.champions.clone())
        })
    }

    fn fetch_items<'a>(
        &'a self,
        champion: &'a Champion,
        role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<ItemBuild>> {
        Box::pin(async move {
            self.requests
                .lock()
                .unwrap()
                .push((champion.name.clone(), role.map(str::to_string)));
            if self.items_missing {
                let mut partial = ItemBuild::default();
                partial.frequent.full = vec!["3031".to_string()];
                return Ok(Fetched::not_found(partial, "missing starters"));
            }
            Ok(Fetched::Found(Self::items()))
        })
    }

    fn fetch_skill_order<'a>(
        &'a self,
        _champion: &'a Champion,
        _role: Option<&'a str>,
    ) -> SourceFuture<'a, Fetched<SkillOrder>> {
        Box::pin(async move {
            if self.skill_error {
                return Err(LbError::SiteApi {
                    site: "fake.gg".to_string(),
                    status: 500,
                    message: "Internal Server Error".to_string(),
                });
            }
            Ok(Fetched::Found(SkillOrder {
                frequent: vec![Skill::Q, Skill::W],
                highest: vec![Skill::E],
            }))
        })
    }

    fn fetch_version(&self) -> SourceFuture<'_, String> {
        Box::pin(async move {
            if self.fail_version {
                return Err(LbError::SiteApi {
                    site: "fake.gg".to_string(),
                    status: 503,
                    message: "Service Unavailable".to_string(),
                });
            }
            Ok("10.14".to_string())
        })
    }
}

fn ahri() -> Champion {
    Champion::new("ahri", "Ahri", "103").with_roles(["Middle", "Support"])
}

fn setup() -> (TempDir, SharedConfigStore, Arc<MockFs>, ItemSetWriter) {
    let temp_dir = TempDir::new().unwrap();
    let store = ConfigStore::with_path(temp_dir.path().join("config.json")).into_shared();
    let fs = Arc::new(MockFs::new());
    let writer = ItemSetWriter::new(INSTALL, fs.clone());
    (temp_dir, store, fs, writer)
}

#[tokio::test]
async fn test_item_sets_per_role_with_sort_rank() {
    let source = FakeSource::new(true, vec![]);
    let item_sets = item_sets_for(&source, &ahri()).await;

    assert_eq!(item_sets.len(), 2);
    assert_eq!(item_sets[0].role.as_deref(), Some("Middle"));
    assert_eq!(item_sets[0].sort_rank, Some(10));
    assert_eq!(item_sets[1].role.as_deref(), Some("Support"));
    assert_eq!(item_sets[1].sort_rank, Some(9));
    assert_eq!(item_sets[0].frequent.full, vec!["3031"]);
    assert_eq!(item_sets[0].frequent.skill_order, vec![Skill::Q, Skill::W]);
    assert_eq!(item_sets[0].highest.skill_order, vec![Skill::E]);

    let requests = source.requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![
            ("ahri".to_string(), Some("Middle".to_string())),
            ("ahri".to_string(), Some("Support".to_string())),
        ]
    );
}

#[tokio::test]
async fn test_single_item_set_without_roles() {
    let source = FakeSource::new(false, vec![]);
    let item_sets = item_sets_for(&source, &ahri()).await;

    assert_eq!(item_sets.len(), 1);
    assert!(item_sets[0].role.is_none());
    assert!(item_sets[0].sort_rank.is_none());
    assert_eq!(source.requests.lock().unwrap()[0].1, None);
}

#[tokio::test]
async fn test_not_found_keeps_partial_and_error_falls_back_to_empty() {
    let mut source = FakeSource::new(true, vec![]);
    source.items_missing = true;
    source.skill_error = true;

    let item_sets = item_sets_for(&source, &ahri()).await;

    assert_eq!(item_sets.len(), 2);
    assert_eq!(item_sets[0].frequent.full, vec!["3031"]);
    assert!(item_sets[0].frequent.starters.is_empty());
    assert!(item_sets[0].frequent.skill_order.is_empty());
    assert!(item_sets[0].highest.skill_order.is_empty());
}

#[tokio::test]
async fn test_import_replaces_old_files_and_saves_version() {
    let (_temp_dir, store, fs, writer) = setup();
    let dir = format!("{}/Config/Champions/ahri/Recommended", INSTALL);
    fs.add_file(&format!("{}/fake_Top.json", dir), "{}");
    fs.add_file(&format!("{}/championgg_Middle.json", dir), "{}");

    let source = FakeSource::new(true, vec![ahri()]);
    let report = import_item_sets(&source, &store, &writer, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(report.champions, 1);
    assert_eq!(report.written, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.version, "10.14");

    assert_eq!(
        fs.file_names_in(&dir),
        vec!["championgg_Middle.json", "fake_Middle.json", "fake_Support.json"]
    );

    let content = fs
        .read_to_string(Path::new(&format!("{}/fake_Middle.json", dir)))
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["title"], "Fake Middle 10.14");
    assert_eq!(json["sortrank"], 10);

    assert_eq!(
        store::lock(&store).imported_version("fake").unwrap(),
        Some("10.14".to_string())
    );
}

#[tokio::test]
async fn test_import_fails_when_version_fails() {
    let (_temp_dir, store, fs, writer) = setup();
    let dir = format!("{}/Config/Champions/ahri/Recommended", INSTALL);
    fs.add_file(&format!("{}/fake_Top.json", dir), "{}");
    let mut source = FakeSource::new(true, vec![ahri()]);
    source.fail_version = true;

    let result = import_item_sets(&source, &store, &writer, &ProgressBar::hidden()).await;

    assert!(matches!(result, Err(LbError::SiteApi { status: 503, .. })));
    assert_eq!(store::lock(&store).imported_version("fake").unwrap(), None);
    // 古いファイルは削除されず、新しいファイルも書かれない
    assert_eq!(fs.file_names_in(&dir), vec!["fake_Top.json"]);
    assert!(source.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_import_fails_when_champion_list_fails() {
    let (_temp_dir, store, fs, writer) = setup();
    let mut source = FakeSource::new(true, vec![ahri()]);
    source.fail_champions = true;

    let result = import_item_sets(&source, &store, &writer, &ProgressBar::hidden()).await;

    assert!(matches!(result, Err(LbError::Scrape { .. })));
    assert_eq!(store::lock(&store).imported_version("fake").unwrap(), None);
    assert!(fs
        .file_names_in(&format!("{}/Config/Champions/ahri/Recommended", INSTALL))
        .is_empty());
}
