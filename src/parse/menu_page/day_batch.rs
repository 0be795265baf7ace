use chrono::NaiveDate;
use scraper::ElementRef;

use super::meal::MealRecord;
use super::menu_item::MenuItem;
use crate::parse::Error;
use crate::static_selector;

/// The meals of one `div.menuDay` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBatch {
    date: NaiveDate,
    meals: Vec<MealRecord>,
}

impl DayBatch {
    pub fn from_html_element(element: ElementRef<'_>) -> Result<Self, Error> {
        static_selector!(MENU_ITEM_SELECTOR <- "div.menuItem");
        let date_str = element.value().attr("data-selector").ok_or_else(|| {
            Error::missing_element_error("Every menuDay should have a data-selector date")
        })?;
        let date = parse_day_date(date_str)?;

        let mut meals = Vec::new();
        for item in element.select(&MENU_ITEM_SELECTOR) {
            meals.extend(MenuItem::classify(item).meals(date)?);
        }
        Ok(Self { date, meals })
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn meals(&self) -> &[MealRecord] {
        &self.meals
    }

    pub fn into_meals(self) -> Vec<MealRecord> {
        self.meals
    }
}

/// Day sections carry their date as `YYYYMMDD`, e.g. `20230401`.
pub fn parse_day_date(date_str: &str) -> Result<NaiveDate, Error> {
    if date_str.len() != 8 || !date_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::date_format_error(date_str));
    }
    NaiveDate::parse_from_str(date_str, "%Y%m%d").map_err(|_| Error::date_format_error(date_str))
}
