//! Collects meals per day and category and renders them as an OpenMensa v2 feed.
mod price;
mod xml;

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::NaiveDate;

use crate::parse::{MealRecord, PriceTier, Prices};
use price::Cents;

/// Longest meal name the feed schema accepts.
pub const MAX_NAME_LEN: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Price(String),
    EmptyName { date: NaiveDate, category: String },
    Xml(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Price(price) => write!(f, "No amount in price `{price}`"),
            Self::EmptyName { date, category } => {
                write!(f, "Meal without a name in {category} on {date}")
            }
            Self::Xml(msg) => write!(f, "XML Error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Meal {
    name: String,
    notes: Vec<String>,
    prices: BTreeMap<PriceTier, Cents>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Category {
    name: String,
    meals: Vec<Meal>,
}

/// One canteen's meals, grouped by date and then by category in the order the
/// categories were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Canteen {
    days: BTreeMap<NaiveDate, Vec<Category>>,
}

impl Canteen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_meals(meals: impl IntoIterator<Item = MealRecord>) -> Result<Self, Error> {
        let mut canteen = Self::new();
        for meal in meals {
            canteen.add_meal(meal.date, &meal.category, &meal.name, &meal.prices, meal.notes)?;
        }
        Ok(canteen)
    }

    pub fn add_meal(
        &mut self,
        date: NaiveDate,
        category: &str,
        name: &str,
        prices: &Prices,
        notes: Vec<String>,
    ) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::EmptyName {
                date,
                category: category.to_owned(),
            });
        }
        let prices = prices
            .iter()
            .map(|(tier, price)| Ok((*tier, Cents::from_price_str(price)?)))
            .collect::<Result<_, Error>>()?;
        let (name, overflow) = split_long_name(name);
        let notes = overflow.into_iter().chain(notes).collect();

        let categories = self.days.entry(date).or_default();
        let index = match categories.iter().position(|c| c.name == category) {
            Some(index) => index,
            None => {
                categories.push(Category {
                    name: category.to_owned(),
                    meals: Vec::new(),
                });
                categories.len() - 1
            }
        };
        categories[index].meals.push(Meal {
            name,
            notes,
            prices,
        });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn meal_count(&self) -> usize {
        self.days
            .values()
            .flatten()
            .map(|category| category.meals.len())
            .sum()
    }

    pub fn to_xml(&self) -> Result<String, Error> {
        xml::render(self)
    }
}

/// Cuts names the schema would reject, preferably at a `", "` or a space. The
/// cut-off part is returned so it can become a note.
fn split_long_name(name: &str) -> (String, Option<String>) {
    let Some((limit, _)) = name.char_indices().nth(MAX_NAME_LEN) else {
        return (name.to_owned(), None);
    };
    let head = &name[..limit];
    let (cut, skip) = head
        .rfind(", ")
        .map(|i| (i, 2))
        .or_else(|| head.rfind(' ').map(|i| (i, 1)))
        .filter(|(i, _)| *i > 0)
        .unwrap_or((limit, 0));
    let rest = name[cut + skip..].trim();
    (
        name[..cut].trim_end().to_owned(),
        (!rest.is_empty()).then(|| rest.to_owned()),
    )
}
