// Pure view-building helpers: no IO, unit-testable in isolation.

pub mod i18n;
pub mod lookup;
pub mod pagination;
pub mod price;
pub mod seo;
pub mod text;
