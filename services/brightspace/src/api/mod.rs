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

//! Typed records and the endpoints that return them.
//!
//! Records mirror the vendor's JSON (PascalCase field names). Fields the
//! vendor may omit or send as `null` are optional; unknown fields are
//! ignored.

mod content;
pub use content::{ContentModule, ContentObject, ContentTopic, RichText};

mod data_hub;
pub use data_hub::DataSetReportInfo;

mod enrollments;
pub use enrollments::{AccessInfo, MyOrgUnitInfo, OrgUnitInfo, OrgUnitTypeInfo};

mod users;
pub use users::{Activation, CreateUserData, UpdateUserData, UserData, WhoAmIUser};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default, for lists the vendor sends as null.
fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
