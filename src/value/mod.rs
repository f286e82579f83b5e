//! Дерево значений, которое кодирует и декодирует кодек.

pub mod tag;

use indexmap::IndexMap;

pub use tag::TypeTag;

use crate::{Int128, UInt128};

/// Словарь со строковыми ключами. Порядок обхода совпадает с порядком
/// вставки, поэтому кодирование детерминировано.
pub type Map = IndexMap<String, Value>;

/// Значение с тегом типа. Активный вариант определяет и представление в
/// памяти, и заголовок на проводе.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(Int128),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(UInt128),
    Float32(f32),
    Float64(f64),
    String(String),
    Binary(Vec<u8>),
    Array(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Тег, под которым значение будет записано.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Bool(true) => TypeTag::True,
            Value::Bool(false) => TypeTag::False,
            Value::Int8(_) => TypeTag::Int8,
            Value::Int16(_) => TypeTag::Int16,
            Value::Int32(_) => TypeTag::Int32,
            Value::Int64(_) => TypeTag::Int64,
            Value::Int128(_) => TypeTag::Int128,
            Value::UInt8(_) => TypeTag::UInt8,
            Value::UInt16(_) => TypeTag::UInt16,
            Value::UInt32(_) => TypeTag::UInt32,
            Value::UInt64(_) => TypeTag::UInt64,
            Value::UInt128(_) => TypeTag::UInt128,
            Value::Float32(_) => TypeTag::Float32,
            Value::Float64(_) => TypeTag::Float64,
            Value::String(_) => TypeTag::String,
            Value::Binary(_) => TypeTag::Binary,
            Value::Array(_) => TypeTag::Array,
            Value::Map(_) => TypeTag::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Глубина вложенности составных значений; скаляр имеет глубину 0.
    pub fn depth(&self) -> usize {
        match self {
            Value::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Value::Map(map) => 1 + map.values().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    Int128 => Int128,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    UInt128 => UInt128,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<u8> => Binary,
    Vec<Value> => Array,
    Map => Map,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_maps_to_two_tags() {
        assert_eq!(Value::Bool(true).tag(), TypeTag::True);
        assert_eq!(Value::Bool(false).tag(), TypeTag::False);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42u64), Value::UInt64(42));
        assert_eq!(Value::from("hi"), Value::String("hi".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(-1i8)), Value::Int8(-1));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Binary(vec![1, 2]));
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let mut map = Map::new();
        map.insert("z".to_string(), Value::from(1u8));
        map.insert("a".to_string(), Value::from(2u8));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_depth() {
        let nested = Value::Array(vec![
            Value::from(1u8),
            Value::Array(vec![Value::Array(vec![])]),
        ]);
        assert_eq!(Value::Null.depth(), 0);
        assert_eq!(Value::Array(vec![]).depth(), 1);
        assert_eq!(nested.depth(), 3);
    }

    #[test]
    fn test_accessors() {
        let v = Value::from(vec![Value::from("x")]);
        assert_eq!(v.as_array().map(|a| a.len()), Some(1));
        assert_eq!(v.as_array().unwrap()[0].as_str(), Some("x"));
        assert!(v.as_map().is_none());
        assert!(Value::Null.is_null());
    }
}
