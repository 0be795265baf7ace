use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use url::Url;

use crate::error::{Error, Result};

/// Canteens of the Studierendenwerk Bielefeld, used when `SOURCES` is unset.
const DEFAULT_SOURCES: [(&str, &str); 6] = [
    (
        "bielefeld_mensa-x",
        "https://www.studierendenwerk-bielefeld.de/essen-trinken/speiseplan/bielefeld/mensa-x/",
    ),
    (
        "detmold_mensa-hfm",
        "https://www.studierendenwerk-bielefeld.de/essen-trinken/speiseplan/detmold/mensa-hfm/",
    ),
    (
        "detmold_mensa-th-owl",
        "https://www.studierendenwerk-bielefeld.de/essen-trinken/speiseplan/mensa-th-owl/",
    ),
    (
        "hoexter_mensa-th-owl",
        "https://www.studierendenwerk-bielefeld.de/essen-trinken/speiseplan/hoexter/mensa-th-owl/",
    ),
    (
        "lemgo_mensa-th-owl",
        "https://www.studierendenwerk-bielefeld.de/essen-trinken/speiseplan/lemgo/mensa-th-owl/",
    ),
    (
        "minden_mensa-hsbi",
        "https://www.studierendenwerk-bielefeld.de/essen-trinken/speiseplan/minden/mensa-hsbi/",
    ),
];

/// One canteen: its feed id and the url of its current-week page. The url is
/// kept as written, parsing it only validates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Source {
    id: String,
    url: String,
}

impl Source {
    pub fn new(id: &str, url: &str) -> Result<Self> {
        let source = Self {
            id: id.to_owned(),
            url: url.to_owned(),
        };
        source.validate()?;
        Ok(source)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    // the id doubles as a file name
    fn validate(&self) -> Result<()> {
        let valid_id = !self.id.is_empty()
            && self
                .id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_id {
            return Err(Error::Config(format!("invalid source id `{}`", self.id)));
        }
        let url = Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("source {}: {e}", self.id)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "source {} must use http(s), got {}",
                self.id, self.url
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    sources: Vec<Source>,
    feed_dir: PathBuf,
    feed_base_url: Option<Url>,
    fetch_timeout: Option<Duration>,
    concurrency: usize,
    halt_on_network_error: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from a variable lookup, `from_env` passes the process
    /// environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let sources = match var("SOURCES") {
            Some(path) => load_sources(Path::new(&path))?,
            None => default_sources()?,
        };
        let feed_dir = var("FEED_DIR").map_or_else(|| PathBuf::from("feeds"), PathBuf::from);
        let feed_base_url = var("FEED_BASE_URL")
            .map(|base| parse_base_url(&base))
            .transpose()?;
        let fetch_timeout = var("FETCH_TIMEOUT_SECS")
            .map(|secs| parse_number::<u64>("FETCH_TIMEOUT_SECS", &secs))
            .transpose()?
            .map(Duration::from_secs);
        let concurrency = var("CONCURRENCY")
            .map(|n| parse_number::<usize>("CONCURRENCY", &n))
            .transpose()?
            .unwrap_or(1)
            .max(1);
        let halt_on_network_error = var("HALT_ON_NETWORK_ERROR")
            .map(|flag| parse_flag("HALT_ON_NETWORK_ERROR", &flag))
            .transpose()?
            .unwrap_or(false);

        Ok(Self {
            sources,
            feed_dir,
            feed_base_url,
            fetch_timeout,
            concurrency,
            halt_on_network_error,
        })
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn feed_dir(&self) -> &Path {
        &self.feed_dir
    }

    pub const fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout
    }

    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub const fn halt_on_network_error(&self) -> bool {
        self.halt_on_network_error
    }

    pub fn feed_file_name(id: &str) -> String {
        format!("{id}.xml")
    }

    /// Where the feed of `id` gets published. Without a base url this is the
    /// file name relative to the index.
    pub fn feed_url(&self, id: &str) -> Result<String> {
        let file_name = Self::feed_file_name(id);
        match &self.feed_base_url {
            Some(base) => base
                .join(&file_name)
                .map(String::from)
                .map_err(|e| Error::Config(format!("feed url for {id}: {e}"))),
            None => Ok(file_name),
        }
    }
}

fn default_sources() -> Result<Vec<Source>> {
    DEFAULT_SOURCES
        .iter()
        .map(|(id, url)| Source::new(id, url))
        .collect()
}

fn load_sources(path: &Path) -> Result<Vec<Source>> {
    let json = fs::read_to_string(path)?;
    let sources: Vec<Source> = serde_json::from_str(&json)?;
    for source in &sources {
        source.validate()?;
    }
    if sources.is_empty() {
        return Err(Error::Config(format!("{} lists no sources", path.display())));
    }
    Ok(sources)
}

// a base without trailing slash would lose its last path segment on join
fn parse_base_url(base: &str) -> Result<Url> {
    let base = if base.ends_with('/') {
        base.to_owned()
    } else {
        format!("{base}/")
    };
    Url::parse(&base).map_err(|e| Error::Config(format!("FEED_BASE_URL: {e}")))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} should be a number, got `{value}`")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!(
            "{key} should be true or false, got `{value}`"
        ))),
    }
}
