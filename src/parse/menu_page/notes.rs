use scraper::ElementRef;

use crate::parse::text_from_selection::optional_text_from_selection;
use crate::parse::{remove_excess_whitespace, Error};
use crate::static_selector;

static_selector!(CO2_SELECTOR <- "span.menuItem__co2__value");
static_selector!(ADDITIVES_SELECTOR <- "div.menuItem__additives");
static_selector!(ALLERGENS_SELECTOR <- "div.menuItem__allergens");
static_selector!(BADGE_SELECTOR <- "span.custombadge");

/// Notes found in a detail fragment: the CO2 footprint first, then additive
/// badges, then allergen badges, each in document order. Every part is optional.
pub fn notes_from_details(details: ElementRef<'_>) -> Result<Vec<String>, Error> {
    let mut notes = Vec::new();
    if let Some(co2) = optional_text_from_selection(&CO2_SELECTOR, details) {
        notes.push(format!("CO2: {co2}"));
    }
    for group_selector in [&ADDITIVES_SELECTOR, &ALLERGENS_SELECTOR] {
        let Some(group) = details.select(group_selector).next() else {
            continue;
        };
        for badge in group.select(&BADGE_SELECTOR) {
            notes.push(badge_note(badge)?);
        }
    }
    Ok(notes)
}

/// Turns a badge into `"{code}) {description}"`. The first non-blank child node
/// holds the code, the second one the description.
pub fn badge_note(badge: ElementRef<'_>) -> Result<String, Error> {
    let mut parts = badge.children().filter_map(|node| {
        let text = match node.value().as_text() {
            Some(text) => remove_excess_whitespace(text).into_owned(),
            None => {
                let text = ElementRef::wrap(node)?.text().collect::<String>();
                remove_excess_whitespace(&text).into_owned()
            }
        };
        (!text.is_empty()).then_some(text)
    });
    let (Some(code), Some(description)) = (parts.next(), parts.next()) else {
        return Err(Error::malformed_badge_error(
            "badge should have a code and a description",
        ));
    };
    Ok(format!("{code}) {description}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    static_selector!(FIRST_BADGE <- "span.custombadge");

    fn first_badge_note(html: &str) -> Result<String, Error> {
        let html = Html::parse_fragment(html);
        let badge = html.select(&FIRST_BADGE).next().expect("fixture has a badge");
        badge_note(badge)
    }

    #[test]
    fn test_badge_note() {
        let note =
            first_badge_note(r#"<span class="custombadge"><span>A</span>contains gluten</span>"#);
        assert_eq!(note.unwrap(), "A) contains gluten");
    }

    #[test]
    fn test_badge_note_normalizes_and_skips_blank_nodes() {
        let note = first_badge_note(
            "<span class=\"custombadge\">\n  <b> 3 </b>\n  mit   Konservierungsstoff\n</span>",
        );
        assert_eq!(note.unwrap(), "3) mit Konservierungsstoff");
    }

    #[test]
    fn test_badge_with_one_child_is_malformed() {
        let err = first_badge_note(r#"<span class="custombadge"><span>A</span></span>"#);
        assert!(matches!(err, Err(Error::MalformedBadge(_))));
    }

    #[test]
    fn test_details_order() {
        let html = Html::parse_fragment(
            r#"<div class="menuItem__allergens">
                 <span class="custombadge"><span>G</span>Gluten</span>
                 <span class="custombadge"><span>I</span>Milch</span>
               </div>
               <div class="menuItem__additives">
                 <span class="custombadge"><span>2</span>mit Konservierungsstoff</span>
               </div>
               <span class="menuItem__co2__value"> 1,2 kg </span>"#,
        );
        let notes = notes_from_details(html.root_element()).unwrap();
        assert_eq!(
            notes,
            [
                "CO2: 1,2 kg",
                "2) mit Konservierungsstoff",
                "G) Gluten",
                "I) Milch"
            ]
        );
    }

    #[test]
    fn test_empty_details() {
        let html = Html::parse_fragment("<p>Keine Angaben</p>");
        assert!(notes_from_details(html.root_element()).unwrap().is_empty());
    }
}
