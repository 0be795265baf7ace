//! Turns every configured canteen into a feed file and writes the index.
use futures::{stream, StreamExt};

use crate::{
    canteen,
    config::{Config, Source},
    error::{Error, Result},
    feed::Canteen,
    fetch::Fetcher,
    store::{FeedStore, Index},
};

/// Scrapes all sources and publishes their feeds. A source that fails, while
/// scraping or while writing its feed, gets no index entry; the others are
/// unaffected. With `halt_on_network_error` a network
/// failure on a current week stops the run.
pub async fn run<F: Fetcher>(config: &Config, fetcher: &F) -> Result<Index> {
    let store = FeedStore::open(config.feed_dir()).await?;
    let mut index = Index::new();

    let mut feeds = stream::iter(config.sources())
        .map(|source| async move { (source, build_feed(fetcher, source).await) })
        .buffered(config.concurrency());

    while let Some((source, feed)) = feeds.next().await {
        match feed {
            Ok(xml) => match publish(config, &store, source, &xml).await {
                Ok(url) => {
                    index.insert(source.id().to_owned(), url);
                }
                Err(e) => log::error!("Could not write feed {}: {e}", source.id()),
            },
            Err(Error::Fetch(e)) if config.halt_on_network_error() => {
                log::error!("Network error for {}, stopping: {e}", source.id());
                return Err(Error::Fetch(e));
            }
            Err(e) => log::error!("Could not generate feed {}: {e}", source.id()),
        }
    }

    store.save_index(&index).await?;
    Ok(index)
}

async fn publish(config: &Config, store: &FeedStore, source: &Source, xml: &str) -> Result<String> {
    let url = config.feed_url(source.id())?;
    let path = store.save_feed(source.id(), xml).await?;
    log::info!("Created feed {} at {}", source.id(), path.display());
    Ok(url)
}

async fn build_feed<F: Fetcher>(fetcher: &F, source: &Source) -> Result<String> {
    let catalog = canteen::load_weeks(fetcher, source).await?;
    let canteen = Canteen::from_meals(catalog.into_meals())?;
    if canteen.is_empty() {
        log::warn!("No meals found for {}", source.id());
    } else {
        log::debug!("{} meals for {}", canteen.meal_count(), source.id());
    }
    Ok(canteen.to_xml()?)
}
