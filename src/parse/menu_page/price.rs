use scraper::{ElementRef, Selector};

use super::meal::{PriceTier, Prices};
use crate::parse::{text_from_selection::get_inner_text, Error};
use crate::static_selector;

static_selector!(STUDENT_PRICE_SELECTOR <- "p.menuItem__price__one");
static_selector!(EMPLOYEE_PRICE_SELECTOR <- "p.menuItem__price__two");
static_selector!(OTHER_PRICE_SELECTOR <- "p.menuItem__price__three");
static_selector!(PRICE_VALUE_SELECTOR <- r#"span[type="button"]"#);

impl PriceTier {
    fn selector(self) -> &'static Selector {
        match self {
            Self::Student => &STUDENT_PRICE_SELECTOR,
            Self::Employee => &EMPLOYEE_PRICE_SELECTOR,
            Self::Other => &OTHER_PRICE_SELECTOR,
        }
    }
}

/// Reads every price tier found below `element`. An absent tier adds no entry,
/// a tier without its value node is malformed.
pub fn extract_prices(element: ElementRef<'_>) -> Result<Prices, Error> {
    collect_prices(element, |_| true)
}

/// Tiers a side-dish group declares for itself, ignoring the ones that belong
/// to its nested side dishes.
pub fn extract_group_prices(group: ElementRef<'_>) -> Result<Prices, Error> {
    collect_prices(group, |price| !is_inside_side_dish(price, group))
}

fn collect_prices<'a>(
    element: ElementRef<'a>,
    keep: impl Fn(ElementRef<'a>) -> bool,
) -> Result<Prices, Error> {
    let mut prices = Prices::new();
    for tier in PriceTier::ALL {
        let Some(tier_element) = element.select(tier.selector()).find(|e| keep(*e)) else {
            continue;
        };
        prices.insert(tier, price_value(tier_element, tier)?);
    }
    Ok(prices)
}

fn price_value(tier_element: ElementRef<'_>, tier: PriceTier) -> Result<String, Error> {
    let value = tier_element
        .select(&PRICE_VALUE_SELECTOR)
        .next()
        .ok_or_else(|| Error::MalformedPrice(format!("{tier} price has no value node")))?;
    let value = get_inner_text(value);
    if value.is_empty() {
        return Err(Error::MalformedPrice(format!("{tier} price value is empty")));
    }
    Ok(value)
}

fn is_inside_side_dish(element: ElementRef<'_>, group: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .take_while(|node| node.id() != group.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().classes().any(|c| c == "menuItem__sidedish"))
}
