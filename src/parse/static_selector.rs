use std::{ops::Deref, sync::OnceLock};

use scraper::Selector;

/// A CSS selector parsed on first use. Only meant for string literals, an
/// invalid selector panics.
#[derive(Debug)]
pub struct StaticSelector<'a> {
    css: &'a str,
    parsed: OnceLock<Selector>,
}

impl<'a> StaticSelector<'a> {
    pub const fn new(css: &'a str) -> Self {
        Self {
            css,
            parsed: OnceLock::new(),
        }
    }

    fn parse(&self) -> Selector {
        Selector::parse(self.css)
            .unwrap_or_else(|e| panic!("selector literal `{}` does not parse: {e:?}", self.css))
    }
}

impl Deref for StaticSelector<'_> {
    type Target = Selector;

    fn deref(&self) -> &Selector {
        self.parsed.get_or_init(|| self.parse())
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    #[test]
    fn test_selects_after_lazy_parse() {
        static_selector!(HEADLINE <- "h3.menuItem__headline");
        let html = Html::parse_fragment(r#"<h3 class="menuItem__headline">Suppe</h3>"#);
        assert_eq!(html.select(&HEADLINE).count(), 1);
        // second deref reuses the cached selector
        assert_eq!(html.select(&HEADLINE).count(), 1);
    }

    #[test]
    #[should_panic(expected = "selector literal `div[` does not parse")]
    fn test_invalid_literal_panics() {
        static_selector!(BROKEN <- "div[");
        let _ = &*BROKEN;
    }
}
