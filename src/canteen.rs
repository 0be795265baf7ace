//! Scrapes one canteen: the current week is required, next week is a bonus.
use crate::{
    config::Source,
    error::Result,
    fetch::{next_week_url, Fetcher},
    parse::WeekCatalog,
};

/// Current week plus, when the site already has it, next week. Any failure on
/// the current week is returned as is, failures on next week are only logged.
pub async fn load_weeks<F: Fetcher>(fetcher: &F, source: &Source) -> Result<WeekCatalog> {
    let mut catalog = load_week(fetcher, source.url()).await?;

    let next_url = next_week_url(source.url());
    match load_week(fetcher, &next_url).await {
        Ok(next_week) => catalog.extend(next_week),
        Err(e) => log::warn!(
            "Could not load next week data for {}: {e}",
            source.id()
        ),
    }
    Ok(catalog)
}

async fn load_week<F: Fetcher>(fetcher: &F, url: &str) -> Result<WeekCatalog> {
    let page = fetcher.fetch(url).await?;
    let page = String::from_utf8_lossy(&page);
    let catalog = WeekCatalog::from_page(&page)?;
    for day in catalog.days() {
        log::debug!("{url}: {} meals on {}", day.meals().len(), day.date());
    }
    Ok(catalog)
}
