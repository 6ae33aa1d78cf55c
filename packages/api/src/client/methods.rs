//! HTTP verb entry points
//!
//! Each call builds a fresh request and runs it through the executor: GET
//! carries `params` in the query string, the other verbs URL-encode them into
//! the body.

use greq_client::http::{HttpResponse, OutboundRequest, Params};
use greq_client::Result;
use http::Method;

use crate::client::core::Client;

impl Client {
    /// # Errors
    ///
    /// Builder errors for a malformed URL or invalid stored headers,
    /// otherwise timeout, connect, request and body errors.
    pub async fn get(&self, url: &str, params: Option<&Params>) -> Result<HttpResponse> {
        self.dispatch(Method::GET, url, params).await
    }

    /// # Errors
    ///
    /// See [`Client::get`].
    pub async fn post(&self, url: &str, params: Option<&Params>) -> Result<HttpResponse> {
        self.dispatch(Method::POST, url, params).await
    }

    /// # Errors
    ///
    /// See [`Client::get`].
    pub async fn put(&self, url: &str, params: Option<&Params>) -> Result<HttpResponse> {
        self.dispatch(Method::PUT, url, params).await
    }

    /// # Errors
    ///
    /// See [`Client::get`].
    pub async fn delete(&self, url: &str, params: Option<&Params>) -> Result<HttpResponse> {
        self.dispatch(Method::DELETE, url, params).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        params: Option<&Params>,
    ) -> Result<HttpResponse> {
        let request = OutboundRequest::new(method, url, params);
        self.executor.resolve(request).await
    }
}
