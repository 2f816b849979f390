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
use std::fmt::{Debug, Formatter};
use valence_core::utils::Redact;
use valence_core::Context;

/// Config carries all the configuration for a Valence client.
#[derive(Clone)]
pub struct Config {
    /// `host` is the scheme and authority of the Brightspace tenant,
    /// for example `https://school.brightspace.com`. It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VALENCE_HOST`]
    pub host: Option<String>,
    /// `app_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VALENCE_APP_ID`]
    pub app_id: Option<String>,
    /// `app_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VALENCE_APP_KEY`]
    pub app_key: Option<String>,
    /// `user_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VALENCE_USER_ID`]
    pub user_id: Option<String>,
    /// `user_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`VALENCE_USER_KEY`]
    pub user_key: Option<String>,
    /// Version of the learning platform (`lp`) API.
    ///
    /// - default to `1.30`
    /// - env value: [`VALENCE_LP_VERSION`]
    pub lp_version: String,
    /// Version of the learning environment (`le`) API.
    ///
    /// - default to `1.50`
    /// - env value: [`VALENCE_LE_VERSION`]
    pub le_version: String,
    /// Organization id sent to the legacy GUID service.
    ///
    /// - env value: [`VALENCE_ORG_ID`]
    pub org_id: Option<String>,
    /// Install code sent to the legacy GUID service.
    ///
    /// - env value: [`VALENCE_INSTALL_CODE`]
    pub install_code: Option<String>,
    /// Shared secret sent to the legacy GUID service.
    ///
    /// - env value: [`VALENCE_GUID_KEY`]
    pub guid_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            app_id: None,
            app_key: None,
            user_id: None,
            user_key: None,
            lp_version: DEFAULT_LP_VERSION.to_string(),
            le_version: DEFAULT_LE_VERSION.to_string(),
            org_id: None,
            install_code: None,
            guid_key: None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("app_id", &self.app_id)
            .field("app_key", &Redact::from(&self.app_key))
            .field("user_id", &self.user_id)
            .field("user_key", &Redact::from(&self.user_key))
            .field("lp_version", &self.lp_version)
            .field("le_version", &self.le_version)
            .field("org_id", &self.org_id)
            .field("install_code", &Redact::from(&self.install_code))
            .field("guid_key", &Redact::from(&self.guid_key))
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields already set are kept, env values only fill the gaps.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(VALENCE_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VALENCE_APP_ID) {
            self.app_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VALENCE_APP_KEY) {
            self.app_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VALENCE_USER_ID) {
            self.user_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VALENCE_USER_KEY) {
            self.user_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VALENCE_LP_VERSION) {
            self.lp_version = v;
        }
        if let Some(v) = ctx.env_var(VALENCE_LE_VERSION) {
            self.le_version = v;
        }
        if let Some(v) = ctx.env_var(VALENCE_ORG_ID) {
            self.org_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VALENCE_INSTALL_CODE) {
            self.install_code.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(VALENCE_GUID_KEY) {
            self.guid_key.get_or_insert(v);
        }

        self
    }
}
