use crate::pagination::PageSize;
use anyhow::Context;
use std::str::FromStr;

const DATABASE_URL_KEY: &str = "DATABASE_URL";
const PAGE_SIZE_KEY: &str = "AUTHORS_PAGE_SIZE";

#[derive(Debug, Clone)]
pub struct Config {
    database_url: String,
    page_size: PageSize,
}

impl Config {
    #[must_use]
    pub fn new(database_url: &str, page_size: PageSize) -> Self {
        Self {
            database_url: database_url.into(),
            page_size,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = load_env(DATABASE_URL_KEY)?;
        let page_size = load_env_or(PAGE_SIZE_KEY, PageSize::default())?;
        Ok(Self {
            database_url,
            page_size,
        })
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }
}

fn load_env<T>(key: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let val =
        std::env::var(key).with_context(|| format!("Failed to load environment variable {key}"))?;
    parse_env(key, &val)
}

fn load_env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(val) => parse_env(key, &val),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to load environment variable {key}"))
        }
    }
}

fn parse_env<T>(key: &str, val: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    val.parse::<T>()
        .with_context(|| format!("Failed to parse environment variable {key}"))
}
