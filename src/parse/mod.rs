mod error;
mod menu_page;
pub use error::Error;
mod remove_excess_whitespace;
mod static_selector;
mod text_from_selection;

pub use menu_page::{MealRecord, PriceTier, Prices, WeekCatalog};
pub use remove_excess_whitespace::remove_excess_whitespace;
