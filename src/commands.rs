//! lolbuilds のメイン処理
//!
//! インストールフォルダの解決 → バージョン表示 → モード選択 → 取り込み/削除。

use crate::cli::Cli;
use crate::config::HttpConfig;
use crate::fs::RealFs;
use crate::install_path::Platform;
use crate::orchestrator::{self, Orchestrator, Outcome};
use crate::output;
use crate::prompt::StdinPrompter;
use crate::source::all_sources;
use crate::store::ConfigStore;
use crate::version;
use indicatif::MultiProgress;
use std::sync::Arc;

pub async fn dispatch(cli: Cli, progress: MultiProgress) -> Result<(), String> {
    let http = HttpConfig::default();
    let store = ConfigStore::new().map_err(|e| e.to_string())?.into_shared();
    let mut prompter = StdinPrompter;

    let mut app = Orchestrator {
        sources: all_sources(&http),
        store,
        fs: Arc::new(RealFs),
        platform: Platform::current(),
        path_flag: cli.path,
        prompter: &mut prompter,
        progress,
    };

    let install_path = app.resolve_path().map_err(|e| e.to_string())?;
    println!("League of Legends folder: {}", install_path.display());

    match app.check_versions(&http.build_client()).await {
        Ok((lol_version, statuses)) => {
            println!("{}", version::render_table(&lol_version, &statuses));
        }
        Err(e) => tracing::warn!("ERROR: could not check versions: {}", e),
    }

    let mode = orchestrator::select_mode(app.prompter).map_err(|e| e.to_string())?;

    match app.execute(install_path, mode).await {
        Outcome::Imported(outcomes) => {
            output::print_import_summary(&outcomes);
            if outcomes.iter().any(|o| o.result.is_err()) {
                return Err("Some sources failed to import".to_string());
            }
        }
        Outcome::Deleted(outcomes) => {
            output::print_delete_summary(&outcomes);
            if let Some(failed) = outcomes.iter().find_map(|o| o.result.as_ref().err()) {
                return Err(failed.clone());
            }
        }
    }

    Ok(())
}
