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

use crate::client::{ApiRequest, Client};
use crate::pagination::PagedResultSet;
use serde::{Deserialize, Serialize};
use valence_core::time::DateTime;
use valence_core::Result;

/// The user the client's user id/key pair belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WhoAmIUser {
    pub identifier: String,
    pub first_name: String,
    pub last_name: String,
    pub unique_name: String,
    pub profile_identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Activation {
    pub is_active: bool,
}

/// A user record as returned by the user management endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserData {
    pub org_id: i64,
    pub user_id: i64,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub user_name: String,
    #[serde(default)]
    pub external_email: Option<String>,
    #[serde(default)]
    pub org_defined_id: Option<String>,
    #[serde(default)]
    pub unique_identifier: Option<String>,
    #[serde(default)]
    pub activation: Activation,
    #[serde(default)]
    pub last_accessed_date: Option<DateTime>,
}

/// Body of a create user call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUserData {
    pub org_defined_id: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub external_email: Option<String>,
    pub user_name: String,
    pub role_id: i64,
    pub is_active: bool,
    pub send_creation_email: bool,
}

/// Body of an update user call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUserData {
    pub org_defined_id: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub external_email: Option<String>,
    pub user_name: String,
    pub activation: Activation,
}

impl Client {
    /// Get the user the client acts as.
    pub async fn whoami(&self) -> Result<WhoAmIUser> {
        self.send_json(&ApiRequest::get(self.lp_path("users/whoami")))
            .await
    }

    /// Get one user by id.
    pub async fn get_user(&self, user_id: i64) -> Result<UserData> {
        self.send_json(&ApiRequest::get(self.lp_path(&format!("users/{user_id}"))))
            .await
    }

    /// Get one page of users, starting after `bookmark` if given.
    pub async fn get_users(&self, bookmark: Option<&str>) -> Result<PagedResultSet<UserData>> {
        let mut req = ApiRequest::get(self.lp_path("users/"));
        if let Some(bookmark) = bookmark {
            req = req.with_bookmark(bookmark);
        }
        self.send_json(&req).await
    }

    /// Get every user, page by page.
    pub async fn get_all_users(&self) -> Result<Vec<UserData>> {
        self.fetch_all_paged(&ApiRequest::get(self.lp_path("users/")))
            .await
    }

    /// Get every user, stopping quietly at the first failed page.
    ///
    /// See [`Client::fetch_all_paged_best_effort`]: a failure, including an
    /// authorization failure on the very first page, yields a short or empty
    /// list instead of an error.
    pub async fn get_all_users_best_effort(&self) -> Vec<UserData> {
        self.fetch_all_paged_best_effort(&ApiRequest::get(self.lp_path("users/")))
            .await
    }

    /// Get the user with the given org defined id.
    ///
    /// The endpoint answers with a list; an empty list means no such user.
    pub async fn find_users_by_org_defined_id(&self, org_defined_id: &str) -> Result<Vec<UserData>> {
        let req = ApiRequest::get(self.lp_path("users/")).with_query("orgDefinedId", org_defined_id);
        self.send_json(&req).await
    }

    /// Create a user.
    pub async fn create_user(&self, user: &CreateUserData) -> Result<UserData> {
        let req = ApiRequest::post(self.lp_path("users/")).with_json(user)?;
        self.send_json(&req).await
    }

    /// Update a user.
    pub async fn update_user(&self, user_id: i64, user: &UpdateUserData) -> Result<UserData> {
        let req = ApiRequest::put(self.lp_path(&format!("users/{user_id}"))).with_json(user)?;
        self.send_json(&req).await
    }
}
