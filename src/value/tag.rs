//! Замкнутое перечисление тегов типов.

use strum_macros::{AsRefStr, Display, EnumCount, EnumIter};

/// Тег типа значения. Каждому тегу реестр сопоставляет ровно один
/// двухбайтовый заголовок.
///
/// `Bool` представлен двумя тегами, `True` и `False`: значение целиком
/// содержится в заголовке.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, AsRefStr, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum TypeTag {
    Null,
    False,
    True,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    Float32,
    Float64,
    String,
    Binary,
    Array,
    Map,
}

impl TypeTag {
    /// Ширина полезной нагрузки для тегов фиксированного размера.
    ///
    /// `None` для строк, бинарных данных и составных типов, у которых
    /// длина записана префиксом.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Null | Self::False | Self::True => Some(0),
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Int64 | Self::UInt64 | Self::Float64 => Some(8),
            Self::Int128 | Self::UInt128 => Some(16),
            Self::String | Self::Binary | Self::Array | Self::Map => None,
        }
    }

    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Array | Self::Map)
    }
}
