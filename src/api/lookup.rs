/// Outcome of a slug lookup on a content route.
///
/// Missing slugs do not produce an HTTP 404: indexed URLs keep returning a
/// success-shaped page carrying `notFound: true` plus substitute content,
/// so crawlers never drop them. The variant makes that policy explicit at
/// the type level instead of overloading the success payload.
#[derive(Debug)]
pub enum ContentLookup<T, F = T> {
    Found(T),
    NotFoundWithFallback(Vec<F>),
}

impl<T, F> ContentLookup<T, F> {
    pub fn is_found(&self) -> bool {
        matches!(self, ContentLookup::Found(_))
    }

    pub fn from_optional(item: Option<T>, fallback: Vec<F>) -> Self {
        match item {
            Some(item) => ContentLookup::Found(item),
            None => ContentLookup::NotFoundWithFallback(fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_when_item_present() {
        let lookup: ContentLookup<i32> = ContentLookup::from_optional(Some(7), vec![1, 2]);
        assert!(lookup.is_found());
    }

    #[test]
    fn fallback_when_missing() {
        let lookup: ContentLookup<i32> = ContentLookup::from_optional(None, vec![1, 2]);
        assert!(!lookup.is_found());
        match lookup {
            ContentLookup::NotFoundWithFallback(items) => assert_eq!(items, vec![1, 2]),
            _ => unreachable!(),
        }
    }
}
