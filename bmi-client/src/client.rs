use async_trait::async_trait;
use bmi_model::record::Record;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
}

type Result<T> = std::result::Result<T, Error>;

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    async fn insert_record(&self, table: &str, record: &Record) -> Result<()>;
}

pub struct ClientImpl {
    url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ClientImpl {
    fn new(url: String, api_key: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key).map_err(|_| Error::RequestError)?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| Error::RequestError)?,
        );
        headers.insert("prefer", HeaderValue::from_static("return=minimal"));
        Ok(headers)
    }

    // The REST endpoint takes a batch, so a single record goes as a
    // one-element array.
    fn insert_request(&self, table: &str, record: &Record) -> Result<reqwest::Request> {
        self.client
            .post(self.table_url(table))
            .headers(self.headers()?)
            .json(&[record])
            .build()
            .map_err(|_| Error::RequestError)
    }
}

pub fn create(config: Config) -> impl Client {
    ClientImpl::new(config.url, config.api_key)
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_client_error() {
        Err(Error::RequestError)
    } else if resp.status().is_server_error() {
        Err(Error::InternalServerError)
    } else {
        Ok(resp)
    }
}

#[async_trait]
impl Client for ClientImpl {
    async fn insert_record(&self, table: &str, record: &Record) -> Result<()> {
        debug!("Inserting record into {}: {:?}", table, record);
        let request = self.insert_request(table, record)?;
        self.client
            .execute(request)
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?;
        Ok(())
    }
}
