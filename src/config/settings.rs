use beson_error::{BesonError, BesonResult};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};

/// Максимальная длина короткой строки (ключа словаря): 2-байтовый префикс.
pub const MAX_SHORT_STRING_LEN: usize = u16::MAX as usize;
/// Максимальная вложенность массивов и словарей по умолчанию.
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Жёсткий потолок вложенности. Рекурсия такой глубины помещается в стек
/// потока 2 MiB и в отладочной сборке.
pub const MAX_DEPTH_CEILING: usize = 256;

/// Ограничения кодека.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Сколько уровней составных значений допускается при кодировании и
    /// декодировании.
    pub max_depth: usize,
    /// Лимит длины ключа словаря в байтах, не больше `MAX_SHORT_STRING_LEN`.
    pub max_key_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_key_len: MAX_SHORT_STRING_LEN,
        }
    }
}

impl CodecConfig {
    /// Загружает конфигурацию: значения по умолчанию, поверх них
    /// переменные окружения с префиксом `BESON_` (например, `BESON_MAX_DEPTH`).
    pub fn load() -> BesonResult<Self> {
        Self::load_from(Environment::with_prefix("BESON").try_parsing(true))
    }

    fn load_from(env: Environment) -> BesonResult<Self> {
        let defaults = Self::default();
        let cfg = Config::builder()
            .set_default("max_depth", defaults.max_depth as i64)
            .and_then(|b| b.set_default("max_key_len", defaults.max_key_len as i64))
            .map_err(|e| BesonError::Config(e.to_string()))?
            .add_source(env)
            .build()
            .map_err(|e| BesonError::Config(e.to_string()))?;

        let loaded: Self = cfg
            .try_deserialize()
            .map_err(|e| BesonError::Config(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Проверяет, что лимиты согласованы с форматом.
    pub fn validate(&self) -> BesonResult<()> {
        if self.max_depth == 0 {
            return Err(BesonError::Config("max_depth must be at least 1".to_string()));
        }
        if self.max_depth > MAX_DEPTH_CEILING {
            return Err(BesonError::Config(format!(
                "max_depth {} exceeds ceiling {MAX_DEPTH_CEILING}",
                self.max_depth
            )));
        }
        if self.max_key_len > MAX_SHORT_STRING_LEN {
            return Err(BesonError::Config(format!(
                "max_key_len {} exceeds short string limit {MAX_SHORT_STRING_LEN}",
                self.max_key_len
            )));
        }
        Ok(())
    }

    /// Лимит вложенности, который реально применяют кодировщик и
    /// декодировщик: настроенное значение, но не выше [`MAX_DEPTH_CEILING`].
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_CEILING)
    }

    pub fn with_max_depth(
        mut self,
        max_depth: usize,
    ) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_key_len(
        mut self,
        max_key_len: usize,
    ) -> Self {
        self.max_key_len = max_key_len;
        self
    }
}
