use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::models::*;
use crate::{debug_api_call, v_debug, LikeResult};

/// Remote likes service as seen by the indicator controller.
#[async_trait]
pub trait LikesApi: Send + Sync {
    /// `GET {base}/likes?cafe_id={id}`
    async fn fetch_like_status(&self, cafe_id: &EntityId) -> LikeResult<LikeStatus>;

    /// `POST {base}/like` or `POST {base}/unlike` with `{"cafe_id": id}`.
    ///
    /// Returns the HTTP status code; the body is ignored. Only transport
    /// failures are errors here, callers decide what a non-2xx means.
    async fn send_toggle(&self, action: LikeAction, cafe_id: &EntityId) -> LikeResult<u16>;
}

#[derive(Clone)]
pub struct CafeLikesClient {
    client: reqwest::Client,
    base_url: String,
    api_logging: bool,
    api_log_path: String,
}

impl CafeLikesClient {
    pub fn new(base_url: &str) -> LikeResult<Self> {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    pub fn from_config(config: &ApiConfig) -> LikeResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(CafeLikesClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_logging: config.api_logging,
            api_log_path: config.api_log_path.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn likes_url(&self) -> String {
        format!("{}/likes", self.base_url)
    }

    pub fn toggle_url(&self, action: LikeAction) -> String {
        format!("{}/{}", self.base_url, action.path())
    }

    /// Appends one call to the API log when logging is on. Write failures
    /// never fail the request.
    fn log_api_call(&self, call: ApiCall<'_>) {
        if !self.api_logging {
            return;
        }

        let entry = format!(
            "[{}] {} {} -> {}\n  Method: {}\n  Request Body: {}\n  Response Status: {}\n  Response Body: {}\n",
            chrono::Utc::now().to_rfc3339(),
            call.method,
            call.url,
            call.status,
            call.method,
            call.request_body.unwrap_or("-"),
            call.status,
            call.response_body.unwrap_or("-"),
        );

        match OpenOptions::new().create(true).append(true).open(&self.api_log_path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(entry.as_bytes()) {
                    v_debug!("⚠️ Could not write API log {}: {}", self.api_log_path, e);
                }
            }
            Err(e) => v_debug!("⚠️ Could not open API log {}: {}", self.api_log_path, e),
        }
    }
}

struct ApiCall<'a> {
    method: &'a str,
    url: &'a str,
    request_body: Option<&'a str>,
    status: u16,
    response_body: Option<&'a str>,
}

#[async_trait]
impl LikesApi for CafeLikesClient {
    // The status code is not checked: a JSON error body such as
    // {"error": "Not logged in"} reads as "not liked". Only a body that is
    // not JSON at all is an error.
    async fn fetch_like_status(&self, cafe_id: &EntityId) -> LikeResult<LikeStatus> {
        let url = self.likes_url();
        let logged_url = format!("{}?cafe_id={}", url, cafe_id);
        debug_api_call!("GET", &logged_url);

        let response = self
            .client
            .get(&url)
            .query(&[("cafe_id", cafe_id.as_str())])
            .send()
            .await?;
        let status = response.status().as_u16();
        let response_text = response.text().await?;
        self.log_api_call(ApiCall {
            method: "GET",
            url: &logged_url,
            request_body: None,
            status,
            response_body: Some(&response_text),
        });

        let likes_response: LikesResponse = serde_json::from_str(&response_text)
            .map_err(|e| format!("Like status request returned HTTP {} with a non-JSON body: {}", status, e))?;
        v_debug!("⭐ Cafe {} liked: {} (HTTP {})", cafe_id, likes_response.likes, status);
        Ok(likes_response.likes)
    }

    async fn send_toggle(&self, action: LikeAction, cafe_id: &EntityId) -> LikeResult<u16> {
        let url = self.toggle_url(action);
        let payload = ToggleRequest { cafe_id };
        let body = serde_json::to_string(&payload)?;
        debug_api_call!("POST", &url, &body);

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status().as_u16();

        if self.api_logging {
            let response_body = response.text().await.ok();
            self.log_api_call(ApiCall {
                method: "POST",
                url: &url,
                request_body: Some(&body),
                status,
                response_body: response_body.as_deref(),
            });
        }

        v_debug!("⭐ {} cafe {} -> HTTP {}", action, cafe_id, status);
        Ok(status)
    }
}
