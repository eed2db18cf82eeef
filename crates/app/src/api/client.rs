//! Authenticated JSON client.

use std::{fmt, sync::Arc, time::Duration};

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    api::{
        ApiError,
        records::{RefreshRecord, RefreshRequest},
    },
    auth::{CredentialStore, Credentials},
};

/// Token refresh endpoint, relative to the API root.
pub const REFRESH_PATH: &str = "auth/token/refresh/";

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// JSON client for the ShopSmart API.
///
/// Requests carry the stored access token. A `401` triggers one token refresh and one retry of
/// the original request; anything after that is [`ApiError::Unauthorized`].
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
    credentials: Arc<dyn CredentialStore>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL does not parse or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)
            .map_err(|error| ApiError::InvalidUrl(format!("{base_url}: {error}")))?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base,
            http,
            credentials,
        })
    }

    /// Credential store backing this client.
    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// `GET` a path relative to the API root.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, None).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an undecodable body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;

        self.send(Method::POST, path, Some(body)).await
    }

    /// `POST` without a body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an undecodable body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::POST, path, None).await
    }

    /// `DELETE` with a JSON body. Any response body is discarded, so `204 No Content` succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;

        self.dispatch(Method::DELETE, path, Some(body)).await?;

        Ok(())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        self.dispatch(method, path, body)
            .await?
            .json()
            .await
            .map_err(ApiError::Decode)
    }

    #[tracing::instrument(name = "api.send", skip(self, body), err)]
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path)?;
        let credentials = self.credentials.load().await?;

        let mut response = self
            .execute(&method, &url, body.as_ref(), credentials.as_ref())
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let Some(refreshed) = self.refresh(credentials.as_ref()).await? else {
                return Err(ApiError::Unauthorized);
            };

            response = self
                .execute(&method, &url, body.as_ref(), Some(&refreshed))
                .await?;

            if response.status() == StatusCode::UNAUTHORIZED {
                warn!("request still unauthorised after token refresh");

                return Err(ApiError::Unauthorized);
            }
        }

        check_status(response).await
    }

    async fn execute(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&Value>,
        credentials: Option<&Credentials>,
    ) -> Result<Response, ApiError> {
        let request_id = Uuid::now_v7();

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(REQUEST_ID_HEADER, request_id.to_string());

        if let Some(credentials) = credentials {
            request = request.bearer_auth(credentials.access());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        debug!(%request_id, status = response.status().as_u16(), "received response");

        Ok(response)
    }

    /// Exchange the stored refresh token for new credentials. `None` when there is nothing to
    /// refresh with or the server rejects the token.
    async fn refresh(
        &self,
        current: Option<&Credentials>,
    ) -> Result<Option<Credentials>, ApiError> {
        let Some(refresh) = current.and_then(Credentials::refresh) else {
            debug!("no refresh token stored");

            return Ok(None);
        };

        let response = self
            .http
            .post(self.url(REFRESH_PATH)?)
            .header(REQUEST_ID_HEADER, Uuid::now_v7().to_string())
            .json(&RefreshRequest { refresh })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "token refresh rejected");

            return Ok(None);
        }

        let record: RefreshRecord = response.json().await.map_err(ApiError::Decode)?;
        let refreshed = record.into_credentials(refresh);

        self.credentials.save(&refreshed).await?;

        debug!("access token refreshed");

        Ok(Some(refreshed))
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|error| ApiError::InvalidUrl(format!("{path}: {error}")))
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;
    use testresult::TestResult;

    use crate::auth::InMemoryCredentialStore;

    use super::*;

    fn client(
        server: &MockServer,
        credentials: Option<Credentials>,
    ) -> Result<(ApiClient, Arc<InMemoryCredentialStore>), ApiError> {
        let store = Arc::new(InMemoryCredentialStore::new(credentials));
        let client = ApiClient::new(&server.url("/api"), Duration::from_secs(5), store.clone())?;

        Ok((client, store))
    }

    #[tokio::test]
    async fn sends_bearer_token_and_request_id() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/orders/cart/")
                    .header("authorization", "Bearer access-1")
                    .header_exists(REQUEST_ID_HEADER);
                then.status(200).json_body(json!({ "items": [] }));
            })
            .await;

        let (client, _) = client(&server, Some(Credentials::new("access-1", None)))?;

        let body: Value = client.get("orders/cart/").await?;

        mock.assert_async().await;
        assert_eq!(body, json!({ "items": [] }));

        Ok(())
    }

    #[tokio::test]
    async fn unauthorised_request_is_refreshed_and_retried_once() -> TestResult {
        let server = MockServer::start_async().await;

        let stale = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/orders/cart/")
                    .header("authorization", "Bearer stale");
                then.status(401);
            })
            .await;

        let refresh = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/token/refresh/")
                    .json_body(json!({ "refresh": "refresh-1" }));
                then.status(200).json_body(json!({ "access": "fresh" }));
            })
            .await;

        let fresh = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/orders/cart/")
                    .header("authorization", "Bearer fresh");
                then.status(200).json_body(json!({ "items": [] }));
            })
            .await;

        let (client, store) = client(
            &server,
            Some(Credentials::new("stale", Some("refresh-1".to_string()))),
        )?;

        let _body: Value = client.get("orders/cart/").await?;

        stale.assert_hits_async(1).await;
        refresh.assert_hits_async(1).await;
        fresh.assert_hits_async(1).await;

        assert_eq!(
            store.load().await?,
            Some(Credentials::new("fresh", Some("refresh-1".to_string())))
        );

        Ok(())
    }

    #[tokio::test]
    async fn second_unauthorised_response_is_not_retried_again() -> TestResult {
        let server = MockServer::start_async().await;

        let rejected = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/orders/cart/");
                then.status(401);
            })
            .await;

        let refresh = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/token/refresh/");
                then.status(200)
                    .json_body(json!({ "access": "fresh", "refresh": "refresh-2" }));
            })
            .await;

        let (client, _) = client(
            &server,
            Some(Credentials::new("stale", Some("refresh-1".to_string()))),
        )?;

        let result = client.get::<Value>("orders/cart/").await;

        assert!(
            matches!(result, Err(ApiError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
        rejected.assert_hits_async(2).await;
        refresh.assert_hits_async(1).await;

        Ok(())
    }

    #[tokio::test]
    async fn unauthorised_without_refresh_token_fails_immediately() -> TestResult {
        let server = MockServer::start_async().await;

        let rejected = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/orders/cart/");
                then.status(401);
            })
            .await;

        let refresh = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/token/refresh/");
                then.status(200).json_body(json!({ "access": "fresh" }));
            })
            .await;

        let (client, _) = client(&server, Some(Credentials::new("stale", None)))?;

        let result = client.get::<Value>("orders/cart/").await;

        assert!(
            matches!(result, Err(ApiError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
        rejected.assert_hits_async(1).await;
        refresh.assert_hits_async(0).await;

        Ok(())
    }

    #[tokio::test]
    async fn error_status_carries_response_body() -> TestResult {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/orders/create/");
                then.status(400).body("shipping_address is required");
            })
            .await;

        let (client, _) = client(&server, None)?;

        let result = client
            .post::<_, Value>("orders/create/", &json!({ "shop_id": 1 }))
            .await;

        assert!(
            matches!(
                &result,
                Err(ApiError::Status { status: 400, body }) if body == "shipping_address is required"
            ),
            "expected a 400 carrying the body, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_accepts_no_content() -> TestResult {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/api/orders/cart/")
                    .json_body(json!({ "product_id": 5 }));
                then.status(204);
            })
            .await;

        let (client, _) = client(&server, Some(Credentials::new("access-1", None)))?;

        client
            .delete("orders/cart/", &json!({ "product_id": 5 }))
            .await?;

        mock.assert_async().await;

        Ok(())
    }

    #[test]
    fn base_url_without_trailing_slash_keeps_its_path() -> TestResult {
        let client = ApiClient::new(
            "http://localhost:8000/api",
            Duration::from_secs(1),
            Arc::new(InMemoryCredentialStore::default()),
        )?;

        assert_eq!(
            client.url("/orders/cart/")?.as_str(),
            "http://localhost:8000/api/orders/cart/"
        );

        Ok(())
    }
}
