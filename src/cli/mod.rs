use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Chat Endpoint Args ---
    /// Full URL of the chat generate endpoint.
    #[arg(long, env = "CHAT_API_URL", default_value = "")]
    pub chat_api_url: String,

    /// API key sent as a bearer token to the chat endpoint.
    #[arg(long, env = "CHAT_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Seconds to wait for the chat endpoint before resolving the pending
    /// turn with a timeout error.
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value = "30")]
    pub chat_timeout_secs: u64,

    /// Optional file overriding the built-in hidden context preamble.
    #[arg(long, env = "CONTEXT_PATH")]
    pub context_path: Option<String>,

    // --- Sheets Bootstrap Args ---
    /// Path to the OAuth client secret JSON used for the startup spreadsheet read.
    #[arg(long, env = "SHEETS_CLIENT_SECRET_PATH", default_value = "")]
    pub sheets_client_secret_path: String,

    /// API key appended to the spreadsheet read request.
    #[arg(long, env = "SHEETS_API_KEY", default_value = "")]
    pub sheets_api_key: String,

    /// Identifier of the spreadsheet read once at startup.
    #[arg(long, env = "SPREADSHEET_ID", default_value = "")]
    pub spreadsheet_id: String,

    /// Where the sign-in flow persists its tokens between runs.
    #[arg(long, env = "SHEETS_TOKEN_CACHE", default_value = "sheets_tokens.json")]
    pub sheets_token_cache: String,
}
