#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod canteen;
mod config;
mod error;
mod feed;
mod fetch;
mod parse;
mod scrape_menus;
mod store;

use crate::{
    config::Config,
    error::Error,
    fetch::{make_client, HttpFetcher},
};

pub use error::Result;

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let config = Config::from_env()?;
    log::info!(
        "Scraping {} canteens into {}",
        config.sources().len(),
        config.feed_dir().display()
    );

    let client = make_client(config.fetch_timeout())
        .map_err(|e| Error::Config(format!("could not build http client: {e}")))?;
    let fetcher = HttpFetcher::new(client);
    let index = scrape_menus::run(&config, &fetcher).await?;

    log::info!(
        "Published {} of {} feeds",
        index.len(),
        config.sources().len()
    );
    Ok(())
}
