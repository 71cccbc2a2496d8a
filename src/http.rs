use crate::error::{BotError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::JsValue;
use worker::{Fetch, Headers, Method, Request, RequestInit, Response, Url};

/// Sends a GET request and fails on any non-2xx status.
pub async fn get(service: &'static str, url: Url) -> Result<Response> {
    let response = Fetch::Url(url)
        .send()
        .await
        .map_err(|source| BotError::Transport { service, source })?;
    check_status(service, response).await
}

/// POSTs `body` as JSON with Yandex Cloud `Api-Key` authorization and decodes the reply.
pub async fn post_json<B, T>(
    service: &'static str,
    url: &str,
    api_key: &str,
    body: &B,
) -> Result<T>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let mut headers = Headers::new();
    headers.set("Authorization", &format!("Api-Key {}", api_key))?;
    headers.set("Content-Type", "application/json")?;

    let payload = serde_json::to_string(body).map_err(|e| BotError::malformed(service, e))?;

    let mut init = RequestInit::new();
    init.with_method(Method::Post)
        .with_headers(headers)
        .with_body(Some(JsValue::from_str(&payload)));

    let request = Request::new_with_init(url, &init)?;
    let response = Fetch::Request(request)
        .send()
        .await
        .map_err(|source| BotError::Transport { service, source })?;

    let mut response = check_status(service, response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| BotError::malformed(service, e))
}

async fn check_status(service: &'static str, mut response: Response) -> Result<Response> {
    let status = response.status_code();
    if !(200..300).contains(&status) {
        let error_text = response.text().await.unwrap_or_default();
        debug!(service, status, body = %error_text, "request rejected");
        return Err(BotError::Status { service, status });
    }
    Ok(response)
}
