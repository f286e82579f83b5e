//! 128-битные целые на двух 64-битных словах.
//!
//! [`UInt128`] хранит пару `(high, low)` и трактует её как
//! `high * 2^64 + low`. [`Int128`] использует тот же битовый шаблон в
//! дополнительном коде, знак хранится в старшем бите `high`.
//!
//! Вся арифметика выполняется по модулю 2^128 и никогда не паникует на
//! переполнении. Отказать может только деление на ноль.
//!
//! ## Модули
//!
//! - [`uint128`]: беззнаковое ядро;
//! - [`int128`]: знаковая обёртка поверх того же шаблона;
//! - [`decimal`]: операции над десятичными строками.

pub mod decimal;
pub mod int128;
pub mod uint128;

pub use int128::Int128;
pub use uint128::UInt128;
