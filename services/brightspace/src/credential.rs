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

use crate::Config;
use std::fmt::{Debug, Formatter};
use valence_core::utils::Redact;
use valence_core::{Error, Result};

/// Credential is the ID/key set every Valence request is signed with.
///
/// The application pair identifies the registered app, the user pair the
/// user context the app acts for. Keys are secrets and are redacted from
/// `Debug` output.
#[derive(Clone)]
pub struct Credential {
    /// Scheme and authority of the tenant, without a trailing slash.
    pub host: String,
    /// Application id, sent as `x_a`.
    pub app_id: String,
    /// Application key, used to compute `x_c`.
    pub app_key: String,
    /// User id, sent as `x_b`.
    pub user_id: String,
    /// User key, used to compute `x_d`.
    pub user_key: String,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("host", &self.host)
            .field("app_id", &self.app_id)
            .field("app_key", &Redact::from(&self.app_key))
            .field("user_id", &self.user_id)
            .field("user_key", &Redact::from(&self.user_key))
            .finish()
    }
}

impl Credential {
    /// Create a new credential set.
    pub fn new(host: &str, app_id: &str, app_key: &str, user_id: &str, user_key: &str) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
            user_id: user_id.to_string(),
            user_key: user_key.to_string(),
        }
    }

    /// Build a credential set from config, failing on the first missing field.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        fn required<'a>(v: &'a Option<String>, name: &str) -> Result<&'a str> {
            match v.as_deref() {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(Error::config_invalid(format!("{name} is required"))),
            }
        }

        let host = required(&cfg.host, "host")?;
        if !host.starts_with("https://") && !host.starts_with("http://") {
            return Err(Error::config_invalid(format!(
                "host must start with http:// or https://, got {host}"
            )));
        }

        Ok(Self::new(
            host,
            required(&cfg.app_id, "app_id")?,
            required(&cfg.app_key, "app_key")?,
            required(&cfg.user_id, "user_id")?,
            required(&cfg.user_key, "user_key")?,
        ))
    }
}
