use anyhow::Result;
use folio::config::Config;
use folio::engine::contributions::ContributionGraph;
use folio::engine::theme::{FilePreferenceStore, ThemeToggle};
use folio::engine::typing::Typewriter;
use folio::feed::github::GithubFeed;
use folio::tui::state::AppState;
use folio::tui::{self, TuiCommand};
use folio::{browser, pipeline};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = std::fs::File::create("folio.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")))
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = Config::path_from_args(&args);
    let config = Config::load(&config_path)?;
    tracing::info!(path = %config_path.display(), "config loaded");

    // Preference store is created once here and owned by the toggle.
    let store = FilePreferenceStore::new(config.preferences.path.clone());
    let mut theme = ThemeToggle::new(Box::new(store), config.ui.default_theme);

    let today = chrono::Local::now().date_naive();
    let graph = ContributionGraph::generate(today, &mut rand::thread_rng());

    let (state_tx, state_rx) = watch::channel(AppState::new(
        config.profile.clone(),
        theme.current(),
        graph,
    ));
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<TuiCommand>(16);

    // --- Project feed: fetch once, fall back, render ---
    let feed = GithubFeed::new(&config.github)?;
    let state_tx_feed = state_tx.clone();
    tokio::spawn(async move {
        pipeline::run(&feed, &state_tx_feed).await;
    });

    // --- Hero typing animation ---
    let mut typewriter = Typewriter::new(config.profile.phrases.clone());
    let state_tx_typing = state_tx.clone();
    tokio::spawn(async move {
        loop {
            let delay = typewriter.step();
            let text = typewriter.text();
            state_tx_typing.send_modify(|s| s.hero_text = text);
            tokio::time::sleep(delay).await;
        }
    });

    // --- Commands from the TUI ---
    let state_tx_cmd = state_tx.clone();
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                TuiCommand::Quit => return,
                TuiCommand::ToggleTheme => {
                    let result = theme.toggle();
                    let current = theme.current();
                    state_tx_cmd.send_modify(|s| {
                        s.theme = current;
                        match &result {
                            Ok(_) => s.push_log("INFO", format!("theme: {}", current)),
                            Err(e) => s.push_log("WARN", format!("theme not saved: {:#}", e)),
                        }
                    });
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "failed to save theme preference");
                    }
                }
                TuiCommand::OpenProject(url) => {
                    tracing::info!(%url, "opening project");
                    if let Err(e) = browser::open_url(&url) {
                        tracing::warn!(error = %e, "failed to open project");
                        state_tx_cmd.send_modify(|s| s.push_log("WARN", format!("{:#}", e)));
                    }
                }
            }
        }
    });

    // --- Run TUI (blocks until quit) ---
    tui::run_tui(state_rx, cmd_tx, config.ui.clone()).await?;

    tracing::debug!("shutting down");
    Ok(())
}
