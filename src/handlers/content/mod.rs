pub mod advisors;
pub mod articles;
pub mod contact;
pub mod homepage;
pub mod properties;
pub mod testimonials;

use crate::config::config;

pub(crate) fn lang_or_default(lang: Option<&str>) -> String {
    lang.map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(&config().content.default_language)
        .to_string()
}
