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
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use valence_core::time::DateTime;
use valence_core::Result;

/// Text with both a plain and an html rendition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RichText {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub html: Option<String>,
}

/// A content object: either a module holding other objects, or a topic.
///
/// The vendor tells them apart with the integer `Type` field: `0` for a
/// module and `1` for a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentObject {
    Module(ContentModule),
    Topic(ContentTopic),
}

impl ContentObject {
    /// Id shared by both variants.
    pub fn id(&self) -> i64 {
        match self {
            ContentObject::Module(m) => m.id,
            ContentObject::Topic(t) => t.id,
        }
    }

    /// Title shared by both variants.
    pub fn title(&self) -> &str {
        match self {
            ContentObject::Module(m) => &m.title,
            ContentObject::Topic(t) => &t.title,
        }
    }
}

impl<'de> Deserialize<'de> for ContentObject {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(d)?;
        let kind = value
            .get("Type")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| D::Error::missing_field("Type"))?;

        match kind {
            0 => ContentModule::deserialize(value)
                .map(ContentObject::Module)
                .map_err(D::Error::custom),
            1 => ContentTopic::deserialize(value)
                .map(ContentObject::Topic)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "unknown content object type {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentModule {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub short_title: Option<String>,
    #[serde(default)]
    pub description: RichText,
    #[serde(default)]
    pub parent_module_id: Option<i64>,
    #[serde(default)]
    pub module_start_date: Option<DateTime>,
    #[serde(default)]
    pub module_end_date: Option<DateTime>,
    #[serde(default)]
    pub module_due_date: Option<DateTime>,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_locked: bool,
    /// Objects nested in this module, owned by it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub structure: Vec<ContentObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentTopic {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub short_title: Option<String>,
    #[serde(default)]
    pub description: RichText,
    #[serde(default)]
    pub parent_module_id: Option<i64>,
    #[serde(default)]
    pub topic_type: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime>,
    #[serde(default)]
    pub end_date: Option<DateTime>,
    #[serde(default)]
    pub due_date: Option<DateTime>,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub is_locked: bool,
}

impl Client {
    /// Get the root modules of a course offering's table of contents.
    pub async fn get_content_root(&self, org_unit_id: i64) -> Result<Vec<ContentObject>> {
        self.send_json(&ApiRequest::get(
            self.le_path(&format!("{org_unit_id}/content/root/")),
        ))
        .await
    }
}
