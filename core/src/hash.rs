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

//! Signature engine for the Valence ID/key scheme.

use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

/// HMAC with SHA256 hash.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// URL-safe base64 encoded HMAC with SHA256 hash.
///
/// The digest is base64 encoded with the URL-safe alphabet and without
/// padding: no `=` is emitted, `+` becomes `-` and `/` becomes `_`.
/// This is the exact form Valence expects in the `x_c` and `x_d` query
/// parameters.
///
/// Both inputs are hashed as their raw bytes. Callers holding a `&str`
/// should pass `as_bytes()` so non-ASCII text is UTF-8 encoded exactly once.
pub fn base64_url_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(hmac_sha256(key, content))
}
