use amplify_derive::Display;
use std::env;
use thiserror::Error;

const API_KEY_VARIABLE: &str = "YOUTUBE_API_KEY";
const ACCESS_TOKEN_VARIABLE: &str = "YOUTUBE_ACCESS_TOKEN";
const SEARCH_MAX_RESULTS_VARIABLE: &str = "YOUTUBE_SEARCH_MAX_RESULTS";
const DEFAULT_SEARCH_MAX_RESULTS: u32 = 5;

#[derive(Error, Display, Debug, PartialEq, Eq)]
#[display(Debug)]
pub enum Error {
    InvalidSearchMaxResults(String),
}

/// Provider credentials supplied by the host. Either one is enough to search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    access_token: Option<String>,
}

impl Credentials {
    pub fn new(api_key: Option<String>, access_token: Option<String>) -> Self {
        Self {
            api_key,
            access_token,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|api_key| !api_key.is_empty())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|access_token| !access_token.is_empty())
    }

    pub fn set_access_token(&mut self, access_token: String) {
        self.access_token = Some(access_token);
    }

    pub fn is_present(&self) -> bool {
        self.api_key().is_some() || self.access_token().is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub credentials: Credentials,
    pub search_max_results: u32,
}

impl Config {
    /// Reads the process environment. Call `dotenv()` beforehand to pick up `.env`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let search_max_results = match lookup(SEARCH_MAX_RESULTS_VARIABLE) {
            None => DEFAULT_SEARCH_MAX_RESULTS,
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|max_results| *max_results > 0)
                .ok_or(Error::InvalidSearchMaxResults(value))?,
        };

        Ok(Self {
            credentials: Credentials::new(
                lookup(API_KEY_VARIABLE),
                lookup(ACCESS_TOKEN_VARIABLE),
            ),
            search_max_results,
        })
    }
}
