use std::{cell::RefCell, collections::HashMap};

use reqwest::StatusCode;

use super::{Error, Fetcher};

/// Serves canned pages and errors, remembering every requested url.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, Result<String, Error>>,
    requested: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn with_page(mut self, url: &str, page: impl Into<String>) -> Self {
        self.responses.insert(url.to_owned(), Ok(page.into()));
        self
    }

    pub fn with_error(mut self, url: &str, error: Error) -> Self {
        self.responses.insert(url.to_owned(), Err(error));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.requested.borrow_mut().push(url.to_owned());
        match self.responses.get(url) {
            Some(Ok(page)) => Ok(page.clone().into_bytes()),
            Some(Err(e)) => Err(e.clone()),
            None => Err(Error::Status {
                url: url.to_owned(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}
