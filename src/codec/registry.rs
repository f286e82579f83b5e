//! Реестр типов: биекция между [`TypeTag`] и двухбайтовым заголовком.
//!
//! Кодек не знает конкретных байтов заголовков и обращается к реестру через
//! трейт [`TypeRegistry`], поэтому таблицу можно подменить целиком.

use std::collections::HashMap;

use beson_error::{BesonError, BesonResult};
use once_cell::sync::Lazy;
use strum::{EnumCount, IntoEnumIterator};

use crate::TypeTag;

/// Двухбайтовый заголовок типа: `[major, minor]`.
pub type Header = [u8; 2];

/// Стандартная таблица заголовков.
pub const STANDARD_HEADERS: [(TypeTag, Header); TypeTag::COUNT] = [
    (TypeTag::Null, [0x00, 0x00]),
    (TypeTag::False, [0x01, 0x00]),
    (TypeTag::True, [0x01, 0x01]),
    (TypeTag::Int8, [0x02, 0x00]),
    (TypeTag::Int16, [0x02, 0x01]),
    (TypeTag::Int32, [0x02, 0x02]),
    (TypeTag::Int64, [0x02, 0x03]),
    (TypeTag::Int128, [0x02, 0x04]),
    (TypeTag::UInt8, [0x03, 0x00]),
    (TypeTag::UInt16, [0x03, 0x01]),
    (TypeTag::UInt32, [0x03, 0x02]),
    (TypeTag::UInt64, [0x03, 0x03]),
    (TypeTag::UInt128, [0x03, 0x04]),
    (TypeTag::Float32, [0x04, 0x00]),
    (TypeTag::Float64, [0x04, 0x01]),
    (TypeTag::String, [0x05, 0x00]),
    (TypeTag::Binary, [0x08, 0x00]),
    (TypeTag::Array, [0x06, 0x00]),
    (TypeTag::Map, [0x07, 0x00]),
];

static STANDARD_BY_HEADER: Lazy<HashMap<Header, TypeTag>> = Lazy::new(|| {
    STANDARD_HEADERS
        .iter()
        .map(|&(tag, header)| (header, tag))
        .collect()
});

/// Стандартный реестр, общий для всего процесса.
pub static STANDARD: StandardRegistry = StandardRegistry;

/// Отображение тег <-> заголовок.
///
/// Реализация обязана быть биекцией: каждый тег имеет ровно один заголовок,
/// и каждый известный заголовок указывает ровно на один тег.
pub trait TypeRegistry: Send + Sync {
    fn header_for(
        &self,
        tag: TypeTag,
    ) -> Header;

    /// `None` для заголовка, которого нет в таблице.
    fn tag_for(
        &self,
        header: Header,
    ) -> Option<TypeTag>;
}

/// Реестр со стандартной таблицей [`STANDARD_HEADERS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRegistry;

impl TypeRegistry for StandardRegistry {
    fn header_for(
        &self,
        tag: TypeTag,
    ) -> Header {
        STANDARD_HEADERS[tag as usize].1
    }

    fn tag_for(
        &self,
        header: Header,
    ) -> Option<TypeTag> {
        STANDARD_BY_HEADER.get(&header).copied()
    }
}

/// Реестр с произвольной таблицей, проверенной на биекцию при создании.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    by_tag: [Header; TypeTag::COUNT],
    by_header: HashMap<Header, TypeTag>,
}

impl TableRegistry {
    /// Строит реестр из пар `(тег, заголовок)`.
    ///
    /// # Errors
    ///
    /// [`BesonError::RegistryConflict`], если тег встречается дважды, два
    /// тега делят один заголовок или какой-то тег не покрыт.
    pub fn from_entries<I>(entries: I) -> BesonResult<Self>
    where
        I: IntoIterator<Item = (TypeTag, Header)>,
    {
        let mut by_tag: [Option<Header>; TypeTag::COUNT] = [None; TypeTag::COUNT];
        let mut by_header = HashMap::with_capacity(TypeTag::COUNT);

        for (tag, header) in entries {
            let slot = &mut by_tag[tag as usize];
            if slot.is_some() {
                return Err(conflict(format!("tag {tag} is listed twice")));
            }
            if let Some(other) = by_header.insert(header, tag) {
                return Err(conflict(format!(
                    "header [0x{:02X}, 0x{:02X}] is shared by {other} and {tag}",
                    header[0], header[1]
                )));
            }
            *slot = Some(header);
        }

        let mut table = [[0u8; 2]; TypeTag::COUNT];
        for tag in TypeTag::iter() {
            table[tag as usize] = by_tag[tag as usize]
                .ok_or_else(|| conflict(format!("tag {tag} has no header")))?;
        }

        Ok(Self {
            by_tag: table,
            by_header,
        })
    }

    /// Копия стандартной таблицы, удобная как основа для изменений.
    pub fn standard() -> Self {
        Self {
            by_tag: STANDARD_HEADERS.map(|(_, header)| header),
            by_header: (*STANDARD_BY_HEADER).clone(),
        }
    }
}

impl TypeRegistry for TableRegistry {
    fn header_for(
        &self,
        tag: TypeTag,
    ) -> Header {
        self.by_tag[tag as usize]
    }

    fn tag_for(
        &self,
        header: Header,
    ) -> Option<TypeTag> {
        self.by_header.get(&header).copied()
    }
}

fn conflict(reason: String) -> BesonError {
    BesonError::RegistryConflict { reason }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
