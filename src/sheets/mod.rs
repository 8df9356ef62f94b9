use std::error::Error;
use std::fmt;
use std::path::Path;

use log::{ info, error };
use reqwest::header::{ AUTHORIZATION, ACCEPT };
use serde::Deserialize;
use serde_json::Value as JsonValue;
use yup_oauth2::{ InstalledFlowAuthenticator, InstalledFlowReturnMethod, read_application_secret };

use crate::cli::Args;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// Fixed rectangular region read once at startup.
const READ_RANGE: &str = "Sheet1!A1:D10";

#[derive(Debug)]
pub enum SheetsError {
    /// Client secret could not be loaded or the authenticator could not be built.
    Init(String),
    /// Sign-in flow failed or yielded no usable token.
    Auth(String),
    /// The spreadsheet read itself failed.
    Read(String),
}

impl fmt::Display for SheetsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetsError::Init(msg) => write!(f, "Sheets client initialization error: {}", msg),
            SheetsError::Auth(msg) => write!(f, "Sheets sign-in error: {}", msg),
            SheetsError::Read(msg) => write!(f, "Sheets read error: {}", msg),
        }
    }
}

impl Error for SheetsError {}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub client_secret_path: String,
    pub api_key: String,
    pub spreadsheet_id: String,
    pub token_cache_path: String,
}

impl SheetsConfig {
    pub fn from_args(args: &Args) -> Self {
        SheetsConfig {
            client_secret_path: args.sheets_client_secret_path.clone(),
            api_key: args.sheets_api_key.clone(),
            spreadsheet_id: args.spreadsheet_id.clone(),
            token_cache_path: args.sheets_token_cache.clone(),
        }
    }
}

/// Values payload of a `spreadsheets.values.get` call.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

fn read_url(config: &SheetsConfig) -> String {
    let mut url = format!(
        "{}/{}/values/{}",
        SHEETS_API_BASE,
        config.spreadsheet_id,
        READ_RANGE
    );
    if !config.api_key.is_empty() {
        url.push_str(&format!("?key={}", config.api_key));
    }
    url
}

async fn obtain_access_token(config: &SheetsConfig) -> Result<String, SheetsError> {
    let secret = read_application_secret(Path::new(&config.client_secret_path)).await.map_err(|e|
        SheetsError::Init(
            format!("failed to load client secret from {}: {}", config.client_secret_path, e)
        )
    )?;

    // A cached token makes this silent; otherwise the interactive sign-in
    // flow runs and the token lands in the cache for next time.
    let auth = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
        .persist_tokens_to_disk(&config.token_cache_path)
        .build().await
        .map_err(|e| SheetsError::Init(e.to_string()))?;

    let token = auth
        .token(&[SHEETS_SCOPE]).await
        .map_err(|e| SheetsError::Auth(e.to_string()))?;

    token
        .token()
        .ok_or_else(|| SheetsError::Auth("OAuth token was None".to_string()))
        .map(|t| t.to_string())
}

async fn fetch_values(config: &SheetsConfig, access_token: &str) -> Result<ValueRange, SheetsError> {
    let client = reqwest::Client::new();
    let resp = client
        .get(read_url(config))
        .header(AUTHORIZATION, format!("Bearer {}", access_token))
        .header(ACCEPT, "application/json")
        .send().await
        .map_err(|e| SheetsError::Read(e.to_string()))?;

    match resp.status() {
        reqwest::StatusCode::OK =>
            resp
                .json::<ValueRange>().await
                .map_err(|e| SheetsError::Read(format!("invalid values payload: {}", e))),
        s => {
            let err_body = resp.text().await.unwrap_or_default();
            Err(SheetsError::Read(format!("unexpected status {}: {}", s, err_body)))
        }
    }
}

/// One-shot read of the fixed range; the retrieved values only reach the log.
pub async fn bootstrap(config: SheetsConfig) -> Result<(), SheetsError> {
    let access_token = obtain_access_token(&config).await?;
    let value_range = fetch_values(&config, &access_token).await?;
    info!("Google Sheets data: {:?}", value_range.values);
    Ok(())
}

/// Spawns the bootstrap on its own task. The flow shares nothing with the
/// chat path; any failure is logged and swallowed.
pub fn spawn_bootstrap(config: SheetsConfig) {
    tokio::spawn(async move {
        if let Err(e) = bootstrap(config).await {
            error!("{}", e);
        }
    });
}
