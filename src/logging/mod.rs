//! Инициализация логирования на базе `tracing-subscriber`.
//!
//! Библиотека только испускает события `tracing`; подписчика
//! устанавливает приложение, например через [`init_logging`].

pub mod config;

pub use config::LoggingConfig;
use tracing_subscriber::EnvFilter;

use beson_error::{BesonError, BesonResult};

/// Устанавливает глобальный fmt-подписчик.
///
/// Уровень берётся из `RUST_LOG`, если переменная задана, иначе из
/// конфигурации. Повторная инициализация возвращает ошибку.
pub fn init_logging(config: &LoggingConfig) -> BesonResult<()> {
    let filter = build_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| BesonError::Config(format!("Failed to initialize logging: {e}")))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        "Logging system initialized"
    );
    Ok(())
}

fn build_filter(config: &LoggingConfig) -> BesonResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| BesonError::Config(format!("Invalid log level {:?}: {e}", config.level))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_builds() {
        assert!(build_filter(&LoggingConfig::default()).is_ok());
    }

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let cfg = LoggingConfig::default();
        // Первый вызов может проиграть другому тесту, второй обязан вернуть
        // ошибку.
        let _ = init_logging(&cfg);
        assert!(init_logging(&cfg).is_err());
    }
}
