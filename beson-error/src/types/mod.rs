pub mod beson_error;

// Публичный экспорт всех типов ошибок из вложенных модулей.
pub use beson_error::*;
