mod day_batch;
mod meal;
mod menu_item;
mod notes;
mod price;
mod week_catalog;

pub use meal::{MealRecord, PriceTier, Prices};
pub use week_catalog::WeekCatalog;
