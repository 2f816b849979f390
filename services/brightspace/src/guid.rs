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

//! Single sign-on tickets from the legacy GUID service.
//!
//! The service predates the JSON API: requests are form posts and responses
//! are a tiny XML document holding one scalar, e.g.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <string xmlns="http://www.desire2learn.com/">OK</string>
//! ```
//!
//! A GUID is generated once and validated once. A rejected GUID is final;
//! request a new one instead of validating the same token again.

use crate::client::{ApiRequest, Client};
use crate::constants::*;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt::{Display, Formatter};
use valence_core::{Error, Result};

/// Opaque single sign-on token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guid(String);

impl Guid {
    /// Wrap a token received out of band.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The token as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Guid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer of the `ValidateGuid` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuidStatus {
    /// The GUID is valid for the given data.
    Ok,
    /// The GUID outlived its TTL.
    Expired,
    /// The GUID is unknown or was already used.
    InvalidGuid,
    /// The service failed to check the GUID.
    Error,
    /// The request used a protocol version the service does not speak.
    UnknownVersion,
    /// The data does not match what the GUID was generated for.
    InvalidData,
    /// The service could not reach its database.
    NoDbConnection,
    /// Any other answer, kept verbatim.
    Unknown(String),
}

impl GuidStatus {
    /// Whether the GUID was accepted.
    pub fn is_ok(&self) -> bool {
        matches!(self, GuidStatus::Ok)
    }
}

impl From<&str> for GuidStatus {
    fn from(v: &str) -> Self {
        match v {
            "OK" => GuidStatus::Ok,
            "EXPIRED" => GuidStatus::Expired,
            "INVALID_GUID" => GuidStatus::InvalidGuid,
            "ERROR" => GuidStatus::Error,
            "UNKNOWN_VERSION" => GuidStatus::UnknownVersion,
            "INVALID_DATA" => GuidStatus::InvalidData,
            "NO_DB_CONNECTION" => GuidStatus::NoDbConnection,
            other => GuidStatus::Unknown(other.to_string()),
        }
    }
}

/// Generic element tree of a legacy XML response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name of the element.
    pub name: String,
    /// Text content directly inside the element, trimmed.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn new(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Default::default()
        }
    }

    /// Parse a document into its root element.
    ///
    /// Fails when the body is not well formed, has no root element, more
    /// than one root, or text outside the root. The error message carries the
    /// raw body.
    pub fn parse(body: &str) -> Result<Self> {
        let mut reader = Reader::from_str(body);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Err(e) => return Err(malformed(body, "not well formed").with_source(e)),
                Ok(Event::Start(e)) => stack.push(XmlElement::new(e.local_name().as_ref())),
                Ok(Event::Empty(e)) => {
                    attach(body, &mut stack, &mut root, XmlElement::new(e.local_name().as_ref()))?
                }
                Ok(Event::End(_)) => {
                    let el = stack
                        .pop()
                        .ok_or_else(|| malformed(body, "unbalanced end tag"))?;
                    attach(body, &mut stack, &mut root, el)?
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| malformed(body, "invalid text").with_source(err))?;
                    push_text(body, &mut stack, &text)?
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    push_text(body, &mut stack, &text)?
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions and doctypes carry no data.
                Ok(_) => {}
            }
        }

        if !stack.is_empty() {
            return Err(malformed(body, "unclosed element"));
        }
        root.ok_or_else(|| malformed(body, "no root element"))
    }

    /// The first scalar value of this element.
    ///
    /// For an element holding only text that is the text. For an element with
    /// children it is the text of the first child, provided that child has no
    /// children of its own. Empty text is not a value.
    pub fn first_scalar(&self) -> Option<&str> {
        let candidate = match self.children.first() {
            None => self,
            Some(child) if child.children.is_empty() => child,
            Some(_) => return None,
        };
        Some(candidate.text.as_str()).filter(|v| !v.is_empty())
    }
}

fn attach(
    body: &str,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    el: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(el);
    } else if root.is_some() {
        return Err(malformed(body, "more than one root element"));
    } else {
        *root = Some(el);
    }
    Ok(())
}

fn push_text(body: &str, stack: &mut [XmlElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(el) => el.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => return Err(malformed(body, "text outside of root element")),
    }
    Ok(())
}

fn malformed(body: &str, reason: &str) -> Error {
    Error::response_invalid(format!("malformed XML response ({reason}): {body}"))
}

impl Client {
    /// Generate a GUID for the user with the given org defined id.
    pub async fn generate_guid(&self, org_defined_id: &str) -> Result<Guid> {
        let req = ApiRequest::post(GENERATE_GUID_PATH).with_form(self.guid_form(org_defined_id, None)?);
        let body = self.send(&req).await?;

        let root = XmlElement::parse(&body)?;
        match root.first_scalar() {
            Some(v) => {
                debug!("generated SSO guid for {org_defined_id}");
                Ok(Guid::new(v))
            }
            None => Err(Error::response_invalid(format!(
                "unexpected GenerateExpiringGuid response: {body}"
            ))),
        }
    }

    /// Validate a GUID, returning `true` only if the service answered `OK`.
    ///
    /// A rejected GUID is an ordinary `false`, not an error. Errors are
    /// reserved for calls that failed or answered with something unreadable.
    pub async fn validate_guid(&self, guid: &Guid, org_defined_id: &str) -> Result<bool> {
        Ok(self.validate_guid_status(guid, org_defined_id).await?.is_ok())
    }

    /// Validate a GUID and return the service's verdict.
    pub async fn validate_guid_status(
        &self,
        guid: &Guid,
        org_defined_id: &str,
    ) -> Result<GuidStatus> {
        let req = ApiRequest::post(VALIDATE_GUID_PATH)
            .with_form(self.guid_form(org_defined_id, Some(guid))?);
        let body = self.send(&req).await?;

        let root = XmlElement::parse(&body)?;
        let status = GuidStatus::from(root.first_scalar().unwrap_or_default());
        debug!("validated SSO guid for {org_defined_id}: {status:?}");
        Ok(status)
    }

    fn guid_form(&self, org_defined_id: &str, guid: Option<&Guid>) -> Result<Vec<(String, String)>> {
        let cfg = self.config();
        let required = |v: &Option<String>, name: &str| {
            v.clone()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::config_invalid(format!("{name} is required for GUID requests")))
        };

        let mut form = vec![
            ("guidType".to_string(), GUID_TYPE_SSO.to_string()),
            ("orgId".to_string(), required(&cfg.org_id, "org_id")?),
            ("installCode".to_string(), required(&cfg.install_code, "install_code")?),
            ("TTL".to_string(), GUID_TTL_SECONDS.to_string()),
        ];
        if let Some(guid) = guid {
            form.push(("guid".to_string(), guid.as_str().to_string()));
        }
        form.push(("data".to_string(), org_defined_id.to_string()));
        form.push(("key".to_string(), required(&cfg.guid_key, "guid_key")?));

        Ok(form)
    }
}
