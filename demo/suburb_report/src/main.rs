mod config;
mod text;

use burbs_core::{DashboardController, HttpBackend, ModuleKind, UiEvent, UiUpdate};
use config::ReportConfig;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging / tracing
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,burbs_core=info,suburb_report=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // Load configuration (defaults + env + optional TOML overlay)
    let cfg = ReportConfig::load();
    info!(
        target: "suburb_report",
        suburb = %cfg.suburb,
        base_url = %cfg.client.base_url,
        "Starting suburb report"
    );

    let backend = Arc::new(HttpBackend::new(cfg.client.clone())?);
    let mut controller = DashboardController::new(backend, cfg.client.property_type.clone());

    // 1) Load and render
    let update = controller
        .handle(UiEvent::Load {
            suburb: cfg.suburb.clone(),
            modules: cfg.modules.clone(),
        })
        .await;
    match update {
        Ok(UiUpdate::Rendered(views)) => {
            for view in &views {
                println!("{}", text::view_text(view));
            }
        }
        Ok(_) => {}
        Err(e) => {
            error!(target: "suburb_report", error = %e, "Failed to load suburb data");
            return Err(e.into());
        }
    }

    // 2) Export listings in their current order
    let has_properties = controller
        .store()
        .dataset()
        .is_some_and(|d| d.contains(ModuleKind::Properties));
    if let (Some(dir), true) = (&cfg.export_dir, has_properties) {
        let date = chrono::Local::now().date_naive();
        if let Ok(UiUpdate::Exported(file)) = controller.handle(UiEvent::Export { date }).await {
            let path = dir.join(&file.filename);
            tokio::fs::write(&path, file.content.as_bytes()).await?;
            info!(target: "suburb_report", path = %path.display(), "Wrote listing export");
        }
    }

    // 3) Ask the assistant
    for question in &cfg.questions {
        if let Err(e) = controller
            .handle(UiEvent::SendChat {
                text: question.clone(),
            })
            .await
        {
            warn!(target: "suburb_report", error = %e, "Question not sent");
        }
    }
    if !cfg.questions.is_empty() {
        let transcript = controller.chat().transcript();
        println!("{}", text::transcript_text(&transcript));
    }

    Ok(())
}
