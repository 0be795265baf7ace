use std::{fmt::Display, num::NonZeroU32, sync::OnceLock, time::Duration};

use governor::{
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::InMemoryState,
};
use reqwest::{Client, StatusCode};
use tracing::{instrument, Level};

#[cfg(test)]
pub mod memory;

/// Path segment of a canteen's next-week page. The `ä` has to stay encoded
/// exactly like this, the origin is only known to accept this form.
pub const NEXT_WEEK_SEGMENT: &str = "n%c3%a4chste-woche/";

/// Network failure while fetching a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The server answered with a non-success status.
    Status { url: String, status: StatusCode },
    /// Anything below HTTP: dns, connect, tls, timeouts, broken bodies.
    Transport { url: String, message: String },
}

impl Error {
    fn transport(url: &str, e: &reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_owned(),
            message: e.to_string(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { url, status } => write!(f, "HTTP {status} from {url}"),
            Self::Transport { url, message } => write!(f, "Could not fetch {url}: {message}"),
        }
    }
}

impl std::error::Error for Error {}

/// Where week pages come from.
// only ever awaited on the current thread, so no `Send` bound on the future
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error>;
}

pub fn make_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().gzip(true);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

static RATE_LIMIT: u32 = 10;
static DELAY_JITTER_MS: u64 = 500;
static RATE_LIMITER: OnceLock<
    governor::RateLimiter<
        governor::state::NotKeyed,
        InMemoryState,
        QuantaClock,
        NoOpMiddleware<QuantaInstant>,
    >,
> = OnceLock::new();

/// Fetches pages over HTTP, sharing one rate limit across all sources.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(skip(self), level = Level::TRACE)]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        let rate_limiter = RATE_LIMITER.get_or_init(|| {
            governor::RateLimiter::direct(governor::Quota::per_second(
                NonZeroU32::new(RATE_LIMIT).unwrap_or(NonZeroU32::MIN),
            ))
        });
        let jitter = governor::Jitter::new(Duration::ZERO, Duration::from_millis(DELAY_JITTER_MS));
        rate_limiter.until_ready_with_jitter(jitter).await;

        let start = std::time::Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(url, &e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_owned(),
                status,
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(url, &e))?;
        log::trace!("Fetched {url} in \t {:?}", start.elapsed());
        Ok(body.to_vec())
    }
}

/// `url` with exactly one trailing slash, followed by [`NEXT_WEEK_SEGMENT`].
pub fn next_week_url(url: &str) -> String {
    format!("{}/{NEXT_WEEK_SEGMENT}", url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Answers a single request with `response` and returns the url to hit.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/speiseplan/mensa-x/")
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(make_client(Some(Duration::from_secs(5))).unwrap())
    }

    #[test]
    fn test_next_week_url() {
        assert_eq!(
            next_week_url("https://example.org/speiseplan/mensa-x/"),
            "https://example.org/speiseplan/mensa-x/n%c3%a4chste-woche/"
        );
        assert_eq!(
            next_week_url("https://example.org/speiseplan/mensa-x"),
            "https://example.org/speiseplan/mensa-x/n%c3%a4chste-woche/"
        );
        assert_eq!(
            next_week_url("https://example.org/speiseplan/mensa-x//"),
            "https://example.org/speiseplan/mensa-x/n%c3%a4chste-woche/"
        );
    }

    #[tokio::test]
    async fn test_fetch_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: 12\r\nconnection: close\r\n\r\n<p>Menü</p>",
        )
        .await;
        let body = fetcher().fetch(&url).await.unwrap();
        assert_eq!(String::from_utf8(body).unwrap(), "<p>Menü</p>");
    }

    #[tokio::test]
    async fn test_status_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert_eq!(
            err,
            Error::Status {
                url,
                status: StatusCode::NOT_FOUND
            }
        );
    }

    #[tokio::test]
    async fn test_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = fetcher().fetch(&format!("http://{addr}/")).await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }
}
