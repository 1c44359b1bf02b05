//! HTTP session transport using reqwest
//!
//! One [`JwxtClient`] owns one cookie jar. The portal authenticates purely by
//! session cookie, so every request that must see the login has to go through
//! the same client.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::interface::{HttpClient, RequestApi};
use crate::model::dtos::{FreeClassroomQuery, LoginParams};
use reqwest::Client;
use std::time::Duration;

pub const LOGIN_PATH: &str = "/loginExt.action";
pub const FREE_CLASSROOM_SEARCH_PATH: &str = "/classroom/apply/free!search.action";

/// Cookie-backed client bound to the portal's base URL
#[derive(Debug, Clone)]
pub struct JwxtClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient for JwxtClient {
    fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua.as_str());
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

impl JwxtClient {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl RequestApi for JwxtClient {
    fn request_delay(&self) -> Duration {
        self.config.request_delay
    }

    async fn get_login_page(&self) -> Result<String> {
        let url = self.config.url(LOGIN_PATH);
        tracing::debug!(%url, "fetching login page");

        let resp = self.client.get(&url).send().await?;
        Ok(resp.text().await?)
    }

    async fn send_login_request(&self, params: LoginParams) -> Result<String> {
        let url = self.config.url(LOGIN_PATH);
        tracing::debug!(%url, username = %params.username, "posting credentials");

        let resp = self.client.post(&url).form(&params.to_form()).send().await?;
        let final_url = resp.url().to_string();
        tracing::debug!(%final_url, status = %resp.status(), "login redirect chain finished");

        Ok(final_url)
    }

    async fn search_free_classroom(&self, query: &FreeClassroomQuery) -> Result<String> {
        let url = self.config.url(FREE_CLASSROOM_SEARCH_PATH);
        tracing::debug!(%url, begin = query.time_begin, end = query.time_end, "searching free classrooms");

        let resp = self.client.post(&url).form(&query.to_form()).send().await?;
        Ok(resp.text().await?)
    }
}

// Free-function entry points over a shared client, mirroring the trait
pub fn create_client(config: ClientConfig) -> Result<JwxtClient> {
    JwxtClient::new(config)
}

pub async fn get_login_page(client: &JwxtClient) -> Result<String> {
    client.get_login_page().await
}

pub async fn send_login_request(
    client: &JwxtClient,
    username: &str,
    hashed_password: &str,
) -> Result<String> {
    let params = LoginParams {
        username: username.to_string(),
        hashed_password: hashed_password.to_string(),
    };
    client.send_login_request(params).await
}

pub async fn search_free_classroom(
    client: &JwxtClient,
    query: &FreeClassroomQuery,
) -> Result<String> {
    client.search_free_classroom(query).await
}
