//! Page-level helpers around the carousel: the persisted theme flag and list pagination.

pub mod pagination;
pub mod theme;

pub use pagination::Paginator;
pub use theme::{ThemeMode, ThemeStore};
