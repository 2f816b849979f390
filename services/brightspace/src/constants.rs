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

// Env values used to configure the client.
pub const VALENCE_HOST: &str = "VALENCE_HOST";
pub const VALENCE_APP_ID: &str = "VALENCE_APP_ID";
pub const VALENCE_APP_KEY: &str = "VALENCE_APP_KEY";
pub const VALENCE_USER_ID: &str = "VALENCE_USER_ID";
pub const VALENCE_USER_KEY: &str = "VALENCE_USER_KEY";
pub const VALENCE_LP_VERSION: &str = "VALENCE_LP_VERSION";
pub const VALENCE_LE_VERSION: &str = "VALENCE_LE_VERSION";
pub const VALENCE_ORG_ID: &str = "VALENCE_ORG_ID";
pub const VALENCE_INSTALL_CODE: &str = "VALENCE_INSTALL_CODE";
pub const VALENCE_GUID_KEY: &str = "VALENCE_GUID_KEY";

pub const DEFAULT_LP_VERSION: &str = "1.30";
pub const DEFAULT_LE_VERSION: &str = "1.50";

// Query parameters carrying the ID/key signature.
pub const X_APP_ID: &str = "x_a";
pub const X_USER_ID: &str = "x_b";
pub const X_APP_SIGNATURE: &str = "x_c";
pub const X_USER_SIGNATURE: &str = "x_d";
pub const X_TIMESTAMP: &str = "x_t";

pub const BOOKMARK: &str = "bookmark";

// Legacy GUID (SSO ticket) service.
pub const GENERATE_GUID_PATH: &str = "/d2l/guids/D2L.Guid.2.asmx/GenerateExpiringGuid";
pub const VALIDATE_GUID_PATH: &str = "/d2l/guids/D2L.Guid.2.asmx/ValidateGuid";
pub const GUID_TYPE_SSO: &str = "SSO";
pub const GUID_TTL_SECONDS: u32 = 90;
