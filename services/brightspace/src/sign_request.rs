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

use crate::constants::*;
use crate::credential::Credential;
use http::{Method, Uri};
use percent_encoding::percent_decode_str;
use valence_core::hash::base64_url_hmac_sha256;
use valence_core::{Context, Result};

/// The five query parameters that authenticate one Valence request.
///
/// Pairs are kept in protocol order: `x_a`, `x_b`, `x_c`, `x_d`, `x_t`.
/// The server accepts any order, but a fixed one keeps output reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParameters(Vec<(&'static str, String)>);

impl SignedParameters {
    /// Get the value of a parameter by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate the parameters in protocol order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Serialize as `x_a=..&x_b=..&x_c=..&x_d=..&x_t=..` without the leading `?`.
    pub fn to_query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// RequestSigner builds signed query strings for the Valence ID/key scheme.
///
/// Each call reads the time from the context's clock and signs
///
/// ```text
/// UPPERCASE(method) & urldecode(lowercase(path)) & unix_seconds
/// ```
///
/// once with the app key and once with the user key.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
}

impl RequestSigner {
    /// Create a new signer for the given credential set.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    /// The credential set this signer uses.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Build the signed query string, including the leading `?`.
    pub fn signed_query_string(&self, ctx: &Context, path: &str, method: &Method) -> String {
        format!("?{}", self.signed_query_parameters(ctx, path, method).to_query())
    }

    /// Build the signed parameters so callers can merge in their own query.
    pub fn signed_query_parameters(
        &self,
        ctx: &Context,
        path: &str,
        method: &Method,
    ) -> SignedParameters {
        let timestamp = ctx.now().timestamp();
        let string_to_sign = string_to_sign(method, path, timestamp);

        let cred = &self.credential;
        let app_signature =
            base64_url_hmac_sha256(cred.app_key.as_bytes(), string_to_sign.as_bytes());
        let user_signature =
            base64_url_hmac_sha256(cred.user_key.as_bytes(), string_to_sign.as_bytes());

        SignedParameters(vec![
            (X_APP_ID, cred.app_id.clone()),
            (X_USER_ID, cred.user_id.clone()),
            (X_APP_SIGNATURE, app_signature),
            (X_USER_SIGNATURE, user_signature),
            (X_TIMESTAMP, timestamp.to_string()),
        ])
    }

    /// Sign a full or path-only url.
    ///
    /// The result is `host + path + signed query`, followed by `&` and the
    /// url's original query when it had one. The host always comes from the
    /// credential set, whatever authority `url` carries.
    pub fn authenticated_uri(&self, ctx: &Context, url: &str, method: &Method) -> Result<String> {
        let uri: Uri = url.parse()?;
        let path = uri.path();

        let mut s = format!(
            "{}{}{}",
            self.credential.host,
            path,
            self.signed_query_string(ctx, path, method)
        );
        if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
            s.push('&');
            s.push_str(query);
        }

        Ok(s)
    }
}

/// Build the message both signatures are computed over.
///
/// The path is lowercased first and then url-decoded, `+` included.
fn string_to_sign(method: &Method, path: &str, timestamp: i64) -> String {
    let lowered = path.to_lowercase().replace('+', " ");
    let decoded = percent_decode_str(&lowered).decode_utf8_lossy();

    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        decoded,
        timestamp
    )
}
