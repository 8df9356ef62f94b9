use std::error::Error;
use std::fmt;
use std::fs;

use log::info;

/// Built-in context preamble seeded into the hidden initialization turn when
/// no override file is configured. The remote model sees this on every call;
/// the renderer never does.
pub const DEFAULT_CONTEXT: &str = "\
You are the assistant for Aroma Beans Coffee, a specialty coffee brand.\n\
Answer questions about the brand only: our single-origin beans and seasonal \
blends, brewing guides for pour-over, espresso, and cold brew, store hours \
(Mon-Fri 7:00-19:00, Sat-Sun 8:00-17:00), and our loyalty program. Keep \
answers short, friendly, and in plain prose. If a question is unrelated to \
the brand, politely steer the conversation back to coffee.";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Context file IO error: {}", e),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

/// Loads the hidden-turn context, preferring the configured override file.
pub fn load_context(path: Option<&str>) -> Result<String, ConfigError> {
    match path {
        Some(p) => {
            info!("Loading chat context from: {}", p);
            let text = fs::read_to_string(p)?;
            Ok(text.trim().to_string())
        }
        None => Ok(DEFAULT_CONTEXT.to_string()),
    }
}
