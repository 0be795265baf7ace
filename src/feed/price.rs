use std::{fmt::Display, sync::OnceLock};

use regex::Regex;

use super::Error;

/// An amount in cents, rendered as `3.50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cents(u32);

impl Cents {
    /// Reads the first amount in a price string like `"3,50 €"` or `"€ 3.5"`.
    pub fn from_price_str(price: &str) -> Result<Self, Error> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(\d+)(?:[,.](\d{1,2}))?").expect("regex should be valid")
        });
        let invalid = || Error::Price(price.to_owned());
        let captures = re.captures(price).ok_or_else(invalid)?;
        let euros: u32 = captures[1].parse().map_err(|_| invalid())?;
        let cents: u32 = match captures.get(2).map(|m| m.as_str()) {
            Some(c) if c.len() == 1 => c.parse::<u32>().map_err(|_| invalid())? * 10,
            Some(c) => c.parse().map_err(|_| invalid())?,
            None => 0,
        };
        euros
            .checked_mul(100)
            .and_then(|e| e.checked_add(cents))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
