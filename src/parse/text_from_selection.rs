use super::{remove_excess_whitespace, Error};
use scraper::{ElementRef, Selector};

/// Normalized text of the first element matching `selector`.
/// Fails with a missing element error when nothing matches.
pub fn text_from_selection(
    selector: &Selector,
    element: ElementRef<'_>,
    parent_label: &str,
    child_label: &str,
) -> Result<String, Error> {
    let child = element.select(selector).next().ok_or_else(|| {
        Error::MissingElement(format!(
            "Every {parent_label} element should have a {child_label}."
        ))
    })?;
    Ok(get_inner_text(child))
}

/// Like [`text_from_selection`] but an absent element is not an error.
pub fn optional_text_from_selection(
    selector: &Selector,
    element: ElementRef<'_>,
) -> Option<String> {
    element.select(selector).next().map(get_inner_text)
}

/// All descendant text of `element`, whitespace collapsed.
pub fn get_inner_text(element: ElementRef<'_>) -> String {
    let text = element.text().collect::<String>();
    remove_excess_whitespace(&text).into_owned()
}
