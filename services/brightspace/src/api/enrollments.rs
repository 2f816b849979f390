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
use serde::Deserialize;
use valence_core::time::DateTime;
use valence_core::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrgUnitTypeInfo {
    pub id: i64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrgUnitInfo {
    pub id: i64,
    #[serde(rename = "Type")]
    pub kind: OrgUnitTypeInfo,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessInfo {
    pub is_active: bool,
    #[serde(default)]
    pub start_date: Option<DateTime>,
    #[serde(default)]
    pub end_date: Option<DateTime>,
    pub can_access: bool,
    #[serde(default)]
    pub classlist_role_name: Option<String>,
    #[serde(default)]
    pub last_accessed: Option<DateTime>,
}

/// An org unit the calling user is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MyOrgUnitInfo {
    pub org_unit: OrgUnitInfo,
    pub access: AccessInfo,
}

impl Client {
    /// Get every org unit the calling user is enrolled in.
    pub async fn get_my_enrollments(&self) -> Result<Vec<MyOrgUnitInfo>> {
        self.fetch_all_paged(&ApiRequest::get(self.lp_path("enrollments/myenrollments/")))
            .await
    }
}
