pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod render;
pub mod sheets;
pub mod transcript;

use std::error::Error;
use std::sync::Arc;

use log::{ info, warn };
use tokio::io::AsyncBufReadExt;

use agent::ChatAgent;
use cli::Args;
use render::ConsoleRenderer;
use sheets::SheetsConfig;
use transcript::Transcript;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Chat Endpoint URL: {}", display_or_unset(&args.chat_api_url));
    info!("Chat Timeout: {}s", args.chat_timeout_secs);
    info!("Context Override: {}", args.context_path.as_deref().unwrap_or("<built-in>"));
    info!("Spreadsheet ID: {}", display_or_unset(&args.spreadsheet_id));
    info!("Sheets Token Cache: {}", args.sheets_token_cache);
    info!("-------------------------");

    let context = config::load_context(args.context_path.as_deref())?;
    let agent = ChatAgent::new(&args);

    // Independent of the chat flow; failures end up in the log and nowhere else.
    sheets::spawn_bootstrap(SheetsConfig::from_args(&args));

    let mut transcript = Transcript::new(&context);
    transcript.set_observer(Arc::new(ConsoleRenderer::new()));

    println!("Hey there! How can I help you today?");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        // Submissions are awaited to resolution, so a rejection here only
        // happens if a caller bypasses this loop.
        if let Err(e) = agent.send_message(&mut transcript, message).await {
            warn!("Submission rejected: {}", e);
        }
    }

    Ok(())
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "<unset>" } else { value }
}
