use std::str::Utf8Error;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Основная ошибка кодека BESON и 128-битной арифметики.
///
/// Каждый вариант несёт контекст, достаточный для диагностики: смещение в
/// буфере, объявленные и фактические длины, исходный текст литерала.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BesonError {
    /// Чтение вышло бы за границу буфера.
    #[error("Buffer truncated at offset {offset}: need {needed} bytes, {available} available")]
    BufferTruncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Заголовок типа отсутствует в реестре.
    #[error("Unknown type header [0x{:02X}, 0x{:02X}] at offset {offset}", .header[0], .header[1])]
    UnknownTypeHeader { header: [u8; 2], offset: usize },

    /// Объявленная длина составного значения не совпала с прочитанной.
    #[error("Length mismatch in {what} at offset {offset}: declared {declared} bytes, consumed {consumed}")]
    LengthMismatch {
        what: &'static str,
        declared: usize,
        consumed: usize,
        offset: usize,
    },

    /// Строка не является корректным UTF-8.
    #[error("Invalid UTF-8 at offset {offset}: {source}")]
    Utf8Decode {
        offset: usize,
        #[source]
        source: Utf8Error,
    },

    /// Некорректный десятичный литерал для 128-битного числа.
    #[error("Invalid decimal string {input:?}: {reason}")]
    InvalidDecimalString { input: String, reason: &'static str },

    /// Деление 128-битного числа на ноль.
    #[error("Division by zero")]
    DivisionByZero,

    /// Ключ встретился в словаре повторно.
    #[error("Duplicate map key {key:?} at offset {offset}")]
    DuplicateMapKey { key: String, offset: usize },

    /// Ключ словаря длиннее лимита короткой строки.
    #[error("Map key of {len} bytes exceeds limit of {limit} bytes")]
    KeyTooLong { len: usize, limit: usize },

    /// Вложенность глубже настроенного лимита.
    #[error("Nesting depth {depth} exceeds limit {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    /// Размер полезной нагрузки не помещается в 4-байтовый префикс длины.
    #[error("{what} payload of {len} bytes does not fit a 32-bit length prefix")]
    PayloadTooLarge { what: &'static str, len: usize },

    /// Таблица реестра нарушает биекцию тег <-> заголовок.
    #[error("Registry conflict: {reason}")]
    RegistryConflict { reason: String },

    /// Ошибка загрузки или проверки конфигурации.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BesonError {
    /// Смещение в буфере, к которому относится ошибка (если известно).
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::BufferTruncated { offset, .. }
            | Self::UnknownTypeHeader { offset, .. }
            | Self::LengthMismatch { offset, .. }
            | Self::Utf8Decode { offset, .. }
            | Self::DuplicateMapKey { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Ошибка возникла при разборе входного буфера.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::BufferTruncated { .. }
                | Self::UnknownTypeHeader { .. }
                | Self::LengthMismatch { .. }
                | Self::Utf8Decode { .. }
                | Self::DuplicateMapKey { .. }
        )
    }
}

impl ErrorExt for BesonError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BufferTruncated { .. } => StatusCode::UnexpectedEof,
            Self::UnknownTypeHeader { .. } => StatusCode::UnknownType,
            Self::LengthMismatch { .. } => StatusCode::LengthMismatch,
            Self::Utf8Decode { .. } => StatusCode::InvalidUtf8,
            Self::InvalidDecimalString { .. } => StatusCode::InvalidInteger,
            Self::DivisionByZero => StatusCode::DivisionByZero,
            Self::DuplicateMapKey { .. } | Self::KeyTooLong { .. } => StatusCode::InvalidKey,
            Self::DepthLimitExceeded { .. } => StatusCode::DepthLimit,
            Self::PayloadTooLarge { .. } => StatusCode::SizeLimit,
            Self::RegistryConflict { .. } => StatusCode::InvalidConfig,
            Self::Config(_) => StatusCode::InvalidConfig,
        }
    }

    fn metrics_tags(&self) -> Vec<(&'static str, String)> {
        let mut tags = vec![
            ("error_type", self.type_name()),
            ("status_code", self.status_code().to_string()),
        ];

        match self {
            Self::UnknownTypeHeader { header, .. } => {
                tags.push(("header", format!("0x{:02X}{:02X}", header[0], header[1])));
            }
            Self::LengthMismatch { what, .. } => {
                tags.push(("structure", what.to_string()));
            }
            _ => {}
        }

        tags
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
