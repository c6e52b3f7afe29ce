//! Cookie-bearing session for one GET-then-POST round trip.

use std::time::Duration;

use url::Url;

use crate::{tokens::TokenBundle, user_agent::get_user_agent, Error};

/// A short-lived HTTP session that keeps the portal's cookies between the
/// form GET and its POST.
///
/// Open one per attempt and let it drop when the attempt ends; dropping the
/// session closes its pooled connections and forgets the cookies, on success
/// and error paths alike.
pub struct FormSession {
    http: reqwest::Client,
    user_agent: &'static str,
}

impl FormSession {
    /// Opens a fresh session with its own cookie jar and a per-request timeout.
    pub fn open(timeout: Duration) -> Result<Self, Error> {
        let user_agent = get_user_agent();
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, user_agent })
    }

    /// The user agent this session presents, fixed for its lifetime.
    pub fn user_agent(&self) -> &'static str {
        self.user_agent
    }

    /// GETs the form page and pulls its state tokens out of the markup.
    pub async fn fetch_tokens(&self, url: &Url) -> Result<TokenBundle, Error> {
        tracing::debug!(%url, "Fetching form page");
        let resp = self
            .http
            .get(url.clone())
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await?;
        let body = read_success_body(resp).await?;
        TokenBundle::from_html(&body)
    }

    /// POSTs the tokens followed by `fields` back to the form page and
    /// returns the response markup. No retries are attempted here.
    pub async fn submit(
        &self,
        url: &Url,
        tokens: &TokenBundle,
        fields: &[(String, String)],
    ) -> Result<String, Error> {
        let mut payload = tokens.to_fields();
        payload.extend(fields.iter().cloned());

        tracing::debug!(%url, fields = payload.len(), "Submitting form");
        let resp = self
            .http
            .post(url.clone())
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .header("referer", url.as_str())
            .form(&payload)
            .send()
            .await?;
        read_success_body(resp).await
    }
}

async fn read_success_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        let snippet = truncate_body(&body);
        tracing::error!("Request failed with status {}: {}", status, snippet);
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            body: snippet,
        });
    }
    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
