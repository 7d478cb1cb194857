//! JSON over HTTP. Browser fetch on wasm32, reqwest on the host target.
//!
//! Both sides map failures onto [`FetchError`] the same way: anything that
//! keeps a body from arriving or parsing is `Transport`, a non-2xx status is
//! `BadStatus`.

use serde::Serialize;
use serde_json::Value;

use super::FetchError;

/// `GET url` and parse the body as JSON. Non-2xx statuses are errors.
pub async fn get_json(url: &str) -> Result<Value, FetchError> {
    let (status, body) = imp::get(url).await?;
    if !(200..300).contains(&status) {
        return Err(FetchError::BadStatus(status));
    }
    body
}

/// `POST url` with a JSON body. The response body is parsed whatever the
/// status, since action endpoints report failures as `{success, message}`.
pub async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<(u16, Value), FetchError> {
    let payload = serde_json::to_string(body).map_err(|err| FetchError::Transport(err.to_string()))?;
    let (status, body) = imp::post(url, payload).await?;
    Ok((status, body?))
}

type Response = (u16, Result<Value, FetchError>);

#[cfg(target_arch = "wasm32")]
mod imp {
    use gloo_net::http::Request;

    use super::{FetchError, Response};

    fn transport(err: gloo_net::Error) -> FetchError {
        FetchError::Transport(err.to_string())
    }

    pub(super) async fn get(url: &str) -> Result<Response, FetchError> {
        let resp = Request::get(url).send().await.map_err(transport)?;
        let status = resp.status();
        Ok((status, resp.json().await.map_err(transport)))
    }

    pub(super) async fn post(url: &str, payload: String) -> Result<Response, FetchError> {
        let resp = Request::post(url)
            .header("Content-Type", "application/json")
            .body(payload)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        Ok((status, resp.json().await.map_err(transport)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use std::sync::OnceLock;

    use super::{FetchError, Response};

    fn client() -> &'static reqwest::Client {
        static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
        CLIENT.get_or_init(reqwest::Client::new)
    }

    fn transport(err: reqwest::Error) -> FetchError {
        FetchError::Transport(err.to_string())
    }

    pub(super) async fn get(url: &str) -> Result<Response, FetchError> {
        let resp = client().get(url).send().await.map_err(transport)?;
        let status = resp.status().as_u16();
        Ok((status, resp.json().await.map_err(transport)))
    }

    pub(super) async fn post(url: &str, payload: String) -> Result<Response, FetchError> {
        let resp = client()
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status().as_u16();
        Ok((status, resp.json().await.map_err(transport)))
    }
}
