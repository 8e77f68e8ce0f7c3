//! Terminal presentation helpers: row action menus and CSV export.

pub mod export;
pub mod menu;
