use scraper::{ElementRef, Html};

use super::day_batch::DayBatch;
use super::meal::MealRecord;
use crate::parse::Error;
use crate::static_selector;

/// Every day batch scraped from a canteen's week page(s).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekCatalog {
    days: Vec<DayBatch>,
}

impl WeekCatalog {
    /// Parses a raw week page.
    pub fn from_page(page: &str) -> Result<Self, Error> {
        let html = Html::parse_document(page);
        Self::from_html_element(html.root_element())
    }

    pub fn from_html_element(element: ElementRef<'_>) -> Result<Self, Error> {
        static_selector!(DAY_SELECTOR <- "div.menuDay");
        let days = element
            .select(&DAY_SELECTOR)
            .map(DayBatch::from_html_element)
            .collect::<Result<_, Error>>()?;
        Ok(Self { days })
    }

    /// Appends the days of another page.
    pub fn extend(&mut self, other: Self) {
        self.days.extend(other.days);
    }

    pub fn days(&self) -> &[DayBatch] {
        &self.days
    }

    #[cfg(test)]
    pub fn meals(&self) -> impl Iterator<Item = &MealRecord> {
        self.days.iter().flat_map(DayBatch::meals)
    }

    pub fn into_meals(self) -> impl Iterator<Item = MealRecord> {
        self.days.into_iter().flat_map(DayBatch::into_meals)
    }
}
