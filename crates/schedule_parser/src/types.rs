/// Shared application state
use crate::config::ServerConfig;
use crate::parser::ScheduleParser;

/// State handed to every request handler.
pub struct AppState {
    pub config: ServerConfig,
    pub parser: ScheduleParser,
}

impl AppState {
    /// Creates state with a parser on the system clock.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_parser(config, ScheduleParser::new())
    }

    pub fn with_parser(config: ServerConfig, parser: ScheduleParser) -> Self {
        Self { config, parser }
    }
}
