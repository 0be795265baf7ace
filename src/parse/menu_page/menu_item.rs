use chrono::NaiveDate;
use scraper::{ElementRef, Html};

use super::meal::MealRecord;
use super::notes::notes_from_details;
use super::price::{extract_group_prices, extract_prices};
use crate::parse::text_from_selection::{optional_text_from_selection, text_from_selection};
use crate::parse::Error;
use crate::static_selector;

const SIDE_DISH_GROUP_CLASS: &str = "menuItem--sidedish";

static_selector!(HEADLINE_SELECTOR <- "h3.menuItem__headline");
static_selector!(LINE_SELECTOR <- "span.menuItem__line");
static_selector!(TEXT_SELECTOR <- "p.menuItem__text");
static_selector!(SIDE_DISH_SELECTOR <- "li.menuItem__sidedish");
static_selector!(SIDE_DISH_LABEL_SELECTOR <- "strong.menuItem__sidedish__label");
static_selector!(DETAILS_SELECTOR <- "a.button-outline");

/// A `div.menuItem`, decided once by its class list.
#[derive(Debug, Clone, Copy)]
pub enum MenuItem<'a> {
    /// Names itself in the headline and its category in the line label.
    RegularDish(ElementRef<'a>),
    /// The headline is the category shared by every nested side dish.
    SideDishGroup(ElementRef<'a>),
}

impl<'a> MenuItem<'a> {
    pub fn classify(element: ElementRef<'a>) -> Self {
        if element
            .value()
            .classes()
            .any(|class| class == SIDE_DISH_GROUP_CLASS)
        {
            Self::SideDishGroup(element)
        } else {
            Self::RegularDish(element)
        }
    }

    /// Zero or one record for a regular dish, one per side dish for a group.
    pub fn meals(self, date: NaiveDate) -> Result<Vec<MealRecord>, Error> {
        match self {
            Self::RegularDish(element) => Ok(regular_dish(element, date)?.into_iter().collect()),
            Self::SideDishGroup(element) => side_dishes(element, date),
        }
    }
}

fn regular_dish(element: ElementRef<'_>, date: NaiveDate) -> Result<Option<MealRecord>, Error> {
    let name = text_from_selection(&HEADLINE_SELECTOR, element, "menuItem", "headline")?;
    let prices = extract_prices(element)?;
    // informational rows share the markup but have no price
    if prices.is_empty() {
        log::debug!("skipping priceless menu item `{name}` on {date}");
        return Ok(None);
    }
    let category = text_from_selection(&LINE_SELECTOR, element, "menuItem", "line label")?;

    let mut notes: Vec<String> = optional_text_from_selection(&TEXT_SELECTOR, element)
        .filter(|text| !text.is_empty())
        .into_iter()
        .collect();
    notes.extend(notes_from_details(element)?);

    Ok(Some(MealRecord {
        date,
        category,
        name,
        prices,
        notes,
    }))
}

fn side_dishes(group: ElementRef<'_>, date: NaiveDate) -> Result<Vec<MealRecord>, Error> {
    let category = text_from_selection(&HEADLINE_SELECTOR, group, "side dish group", "headline")?;
    let group_prices = extract_group_prices(group)?;

    group
        .select(&SIDE_DISH_SELECTOR)
        .map(|side_dish| {
            let name =
                text_from_selection(&SIDE_DISH_LABEL_SELECTOR, side_dish, "side dish", "label")?;
            let notes = match side_dish.select(&DETAILS_SELECTOR).next() {
                Some(details) => popover_notes(details)?,
                None => Vec::new(),
            };
            let mut prices = group_prices.clone();
            prices.extend(extract_prices(side_dish)?);
            Ok(MealRecord {
                date,
                category: category.clone(),
                name,
                prices,
                notes,
            })
        })
        .collect()
}

/// The "Details" button keeps its popover markup in an attribute.
fn popover_notes(details: ElementRef<'_>) -> Result<Vec<String>, Error> {
    let content = details.value().attr("data-bs-content").ok_or_else(|| {
        Error::missing_element_error("Details button should carry its popover content")
    })?;
    let fragment = Html::parse_fragment(content);
    notes_from_details(fragment.root_element())
}
