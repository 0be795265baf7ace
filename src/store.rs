use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::Config;

pub const INDEX_FILE: &str = "index.json";

/// Source id to published feed url, successful sources only.
pub type Index = BTreeMap<String, String>;

/// Directory the feeds and their index are written to.
#[derive(Debug)]
pub struct FeedStore(PathBuf);

impl FeedStore {
    pub async fn open(p: impl AsRef<Path>) -> crate::Result<Self> {
        let p = p.as_ref();
        fs::create_dir_all(p).await?;
        Ok(Self(p.to_owned()))
    }

    pub async fn save_feed(&self, id: &str, xml: &str) -> crate::Result<PathBuf> {
        let path = self.0.join(Config::feed_file_name(id));
        fs::write(&path, xml).await?;
        Ok(path)
    }

    pub async fn save_index(&self, index: &Index) -> crate::Result<PathBuf> {
        let path = self.0.join(INDEX_FILE);
        let json = serde_json::to_string_pretty(index)?;
        fs::write(&path, json).await?;
        Ok(path)
    }
}
