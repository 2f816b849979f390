// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::BOOKMARK;
use crate::credential::Credential;
use crate::sign_request::RequestSigner;
use crate::Config;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, StatusCode};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use valence_core::{Context, Error, Result};

/// ApiRequest describes one call to the Valence API.
///
/// It only names the resource: method, path, extra query parameters and an
/// optional body. Signing and the host are added by [`Client`] when the
/// request is sent, so the same descriptor can be re-sent (for example with
/// a different bookmark) and gets fresh signatures every time.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

/// Body attached to an [`ApiRequest`].
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Serialized JSON, sent as `application/json`.
    Json(Bytes),
    /// Key/value pairs, sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl ApiRequest {
    /// Create a request for the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        let bs = serde_json::to_vec(value).map_err(|e| {
            Error::request_invalid(format!("failed to serialize body for {}", self.path))
                .with_source(e)
        })?;
        self.body = RequestBody::Json(Bytes::from(bs));
        Ok(self)
    }

    /// Attach a form body.
    pub fn with_form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path, without host and query.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extra query parameters, in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Request body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Copy this request, replacing any bookmark parameter.
    pub(crate) fn with_bookmark(&self, bookmark: &str) -> Self {
        let mut req = self.clone();
        req.query.retain(|(k, _)| k != BOOKMARK);
        req.query.push((BOOKMARK.to_string(), bookmark.to_string()));
        req
    }
}

/// Client sends signed requests to one Brightspace tenant.
///
/// Every call goes through [`Client::send`], which signs the request,
/// sends it through the context's [`valence_core::HttpSend`] and turns any
/// failure into a [`valence_core::Error`]. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    signer: RequestSigner,
    config: Arc<Config>,
}

impl Client {
    /// Create a new client, building the credential set from config.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let credential = Credential::from_config(&config)?;
        Ok(Self::with_credential(ctx, config, credential))
    }

    /// Create a new client with an explicit credential set.
    ///
    /// Credential fields in `config` are ignored.
    pub fn with_credential(ctx: Context, config: Config, credential: Credential) -> Self {
        Self {
            ctx,
            signer: RequestSigner::new(credential),
            config: Arc::new(config),
        }
    }

    /// The context this client sends requests with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The signer this client signs requests with.
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// The config this client was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a learning platform path: `/d2l/api/lp/{version}/{suffix}`.
    pub fn lp_path(&self, suffix: &str) -> String {
        format!(
            "/d2l/api/lp/{}/{}",
            self.config.lp_version,
            suffix.trim_start_matches('/')
        )
    }

    /// Build a learning environment path: `/d2l/api/le/{version}/{suffix}`.
    pub fn le_path(&self, suffix: &str) -> String {
        format!(
            "/d2l/api/le/{}/{}",
            self.config.le_version,
            suffix.trim_start_matches('/')
        )
    }

    /// Build the signed http request for a descriptor.
    ///
    /// Signed parameters come first, followed by the descriptor's own query.
    pub fn build_request(&self, req: &ApiRequest) -> Result<http::Request<Bytes>> {
        let signed = self
            .signer
            .signed_query_parameters(&self.ctx, &req.path, &req.method);

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(signed.iter())
            .extend_pairs(req.query.iter())
            .finish();
        let uri = format!("{}{}?{}", self.signer.credential().host, req.path, query);

        let builder = http::Request::builder().method(req.method.clone()).uri(uri);
        let req = match &req.body {
            RequestBody::Empty => builder.body(Bytes::new())?,
            RequestBody::Json(bs) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(bs.clone())?,
            RequestBody::Form(pairs) => {
                let form = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs.iter())
                    .finish();
                builder
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Bytes::from(form))?
            }
        };

        Ok(req)
    }

    /// Send a request and return the response body.
    pub async fn send(&self, req: &ApiRequest) -> Result<String> {
        let http_req = self.build_request(req)?;
        debug!("valence request: {} {}", req.method, req.path);

        let resp = self
            .ctx
            .http_send_as_string(http_req)
            .await
            .map_err(|e| normalize_transport_error(req, e))?;

        let status = resp.status();
        let body = resp.into_body();
        if !status.is_success() {
            return Err(normalize_response_error(req, status, body));
        }

        debug!("valence response: {} {} -> {}", req.method, req.path, status);
        Ok(body)
    }

    /// Send a request and decode the JSON response.
    pub async fn send_json<T: DeserializeOwned>(&self, req: &ApiRequest) -> Result<T> {
        let body = self.send(req).await?;
        serde_json::from_str(&body).map_err(|e| {
            Error::response_invalid(format!(
                "failed to decode response of {} {}: {e}",
                req.method, req.path
            ))
            .with_source(e)
        })
    }
}

/// Wrap a failure that happened before any response arrived.
///
/// Kind and status of the underlying error are kept, it becomes the source.
fn normalize_transport_error(req: &ApiRequest, err: Error) -> Error {
    Error::new(
        err.kind(),
        format!("{} {} failed: {}", req.method, req.path, err.message()),
    )
    .with_status(err.status())
    .with_source(err)
}

/// Turn a non-2xx response into an error carrying its status and body.
fn normalize_response_error(req: &ApiRequest, status: StatusCode, body: String) -> Error {
    let body = body.trim();
    let message = if body.is_empty() {
        format!("{} {} returned {status}", req.method, req.path)
    } else {
        format!("{} {} returned {status}: {body}", req.method, req.path)
    };
    Error::rejected(status, message)
}
