//! Текстовое оформление: таблицы каталога, схема зала, чек и билеты.
//! Всё пишется в `impl Write`, чтобы вывод можно было проверить в тестах.

pub mod receipt;
pub mod tables;

pub const RULE: &str = "=============================================";
pub const THIN_RULE: &str = "---------------------------------------------";
