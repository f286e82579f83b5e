use serde::{Deserialize, Serialize};

/// Настройки логирования.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Директива фильтра: `info`, `beson=debug` и т.п.
    pub level: String,
    /// Печатать ли target события.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: true,
        }
    }
}
