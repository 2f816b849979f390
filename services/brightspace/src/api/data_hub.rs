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

use super::null_as_default;
use crate::client::{ApiRequest, Client};
use serde::Deserialize;
use valence_core::time::DateTime;
use valence_core::Result;

/// An extract of a Brightspace Data Set.
///
/// Each extract owns the extracts that preceded it, which own theirs in
/// turn. The chain is as deep as the payload is nested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSetReportInfo {
    pub plugin_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime>,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub download_size: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub previous_data_sets: Vec<DataSetReportInfo>,
}

impl DataSetReportInfo {
    /// This extract followed by every earlier one, depth first.
    pub fn history(&self) -> Vec<&DataSetReportInfo> {
        let mut out = vec![self];
        for prev in &self.previous_data_sets {
            out.extend(prev.history());
        }
        out
    }
}

impl Client {
    /// List the available data set extracts.
    pub async fn get_data_sets(&self) -> Result<Vec<DataSetReportInfo>> {
        self.fetch_all_pages(&ApiRequest::get(self.lp_path("dataExport/bds")))
            .await
    }

    /// List the available data set extracts, stopping quietly at the first failed page.
    ///
    /// See [`Client::fetch_all_pages_best_effort`]: failures, authorization
    /// failures included, look like the end of the list.
    pub async fn get_data_sets_best_effort(&self) -> Vec<DataSetReportInfo> {
        self.fetch_all_pages_best_effort(&ApiRequest::get(self.lp_path("dataExport/bds")))
            .await
    }
}
