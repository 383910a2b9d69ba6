use crate::client::payload::Form;
use crate::{Result, ScribensError};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;

/// Sends a form to the service and returns the response body.
pub trait Transport {
    fn post_form(&self, url: &str, user_agent: &str, form: &Form) -> Result<String>;
}

/// Blocking HTTP transport backed by reqwest
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, user_agent: &str, form: &Form) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header(USER_AGENT, user_agent)
            .form(form)
            .send()?;

        log::debug!("response headers: {:?}", response.headers());

        let status = response.status();
        if !status.is_success() {
            return Err(ScribensError::RequestFailed(format!("HTTP {}", status)));
        }

        Ok(response.text()?)
    }
}
