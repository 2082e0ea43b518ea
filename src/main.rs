mod core;
mod inference;
#[cfg(test)]
mod test_support;
mod tui;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::core::chat::ChatSession;
use crate::core::config::{self, CliOverrides, LabeldeskConfig};
use crate::core::export;
use crate::core::state::{App, Page};
use crate::inference::{CompletionProvider, GeminiProvider};

#[derive(Parser)]
#[command(name = "labeldesk", about = "Operations dashboard for the Digital Record Label agent system")]
struct Args {
    /// Gemini model for the assistant (overrides config and LABELDESK_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Page to open on start
    #[arg(short, long, default_value_t, value_enum)]
    page: Page,

    /// Ground assistant replies in Google Search and list their sources
    #[arg(short, long)]
    grounding: bool,

    /// Write the assistant transcript as HTML to this path on exit
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Log file
    #[arg(long, value_name = "PATH", default_value = "labeldesk.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("labeldesk: ignoring config file: {e}");
            log::warn!("Config load failed, using defaults: {}", e);
            LabeldeskConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            model: args.model.clone(),
            grounding: args.grounding,
        },
    );
    log::info!("labeldesk starting up: {:?}", resolved);

    let base_url = resolved.base_url.clone();
    let chat = ChatSession::initialize(resolved.api_key.as_deref(), resolved.chat, |key| {
        GeminiProvider::new(key, Some(base_url))
            .map(|provider| Arc::new(provider) as Arc<dyn CompletionProvider>)
    });

    let mut app = App::new(chat);
    app.page = args.page;

    let app = tui::run(app)?;

    if let Some(path) = args.export {
        let turns = app.chat.current_transcript();
        match export::write_transcript(&path, "labeldesk assistant transcript", turns) {
            Ok(()) => println!("Transcript written to {}", path.display()),
            Err(e) => {
                log::warn!("Export to {} failed: {}", path.display(), e);
                eprintln!("labeldesk: could not write {}: {e}", path.display());
            }
        }
    }

    log::info!("labeldesk shut down");
    Ok(())
}
