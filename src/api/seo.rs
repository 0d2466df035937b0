use serde::Serialize;

/// SEO metadata block attached to every content page view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoBlock {
    pub title: String,
    pub description: String,
    pub canonical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SeoBlock {
    pub fn new(
        site_name: &str,
        domain: &str,
        title: impl Into<String>,
        description: impl Into<String>,
        path: &str,
    ) -> Self {
        let title = title.into();
        let description: String = description.into();

        Self {
            title: format!("{} | {}", title, site_name),
            description: truncate_description(&description),
            canonical: format!("https://{}{}", domain, path),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

// Search engines truncate around 160 characters; cut on a word boundary.
fn truncate_description(text: &str) -> String {
    const MAX: usize = 160;

    if text.chars().count() <= MAX {
        return text.to_string();
    }

    let cut: String = text.chars().take(MAX).collect();
    match cut.rfind(' ') {
        Some(idx) => format!("{}…", &cut[..idx]),
        None => cut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_title_and_canonical() {
        let seo = SeoBlock::new(
            "CLIC Inmobiliaria",
            "clicinmobiliaria.com",
            "Casa en Punta Cana",
            "Hermosa casa frente al mar",
            "/propiedades/casa-punta-cana",
        );
        assert_eq!(seo.title, "Casa en Punta Cana | CLIC Inmobiliaria");
        assert_eq!(
            seo.canonical,
            "https://clicinmobiliaria.com/propiedades/casa-punta-cana"
        );
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let long = "palabra ".repeat(60);
        let seo = SeoBlock::new("Site", "example.com", "T", long, "/x");
        assert!(seo.description.chars().count() <= 161);
        assert!(seo.description.ends_with('…'));
    }
}
