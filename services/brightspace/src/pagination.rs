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

//! Bookmark based pagination.
//!
//! Valence list endpoints come in two envelope shapes:
//!
//! - [`ObjectListPage`] carries a `Next` url; the next bookmark is the
//!   `bookmark` query parameter of that url and a null or absent `Next`
//!   ends the sequence.
//! - [`PagedResultSet`] carries explicit `PagingInfo` with a `Bookmark`
//!   and a `HasMoreItems` flag.
//!
//! Both are walked by the same sequential loop. Records are returned in the
//! order pages arrive, without reordering or deduplication.

use crate::client::{ApiRequest, Client};
use crate::constants::BOOKMARK;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use valence_core::{Error, Result};

/// Where a page says the walk should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// This was the last page.
    End,
    /// Request the next page with this bookmark.
    Next(String),
    /// The page claims there is more but gives no usable bookmark.
    Missing,
}

/// Page is one response of a paginated endpoint.
pub trait Page {
    /// Record type carried by the page.
    type Item;

    /// Split the page into its records and the cursor to continue from.
    fn into_parts(self) -> (Vec<Self::Item>, Cursor);
}

/// Page shape that links to the next page by url.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectListPage<T> {
    /// Url of the next page, null or absent on the last one.
    #[serde(default)]
    pub next: Option<String>,
    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub objects: Vec<T>,
}

impl<T> Page for ObjectListPage<T> {
    type Item = T;

    fn into_parts(self) -> (Vec<T>, Cursor) {
        let cursor = match self.next.as_deref() {
            None => Cursor::End,
            Some(next) => match bookmark_from_next_url(next) {
                Some(bookmark) => Cursor::Next(bookmark),
                None => Cursor::Missing,
            },
        };
        (self.objects, cursor)
    }
}

/// Page shape with explicit paging metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PagedResultSet<T> {
    /// Bookmark and continuation flag.
    pub paging_info: PagingInfo,
    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Paging metadata of a [`PagedResultSet`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PagingInfo {
    /// Bookmark to request the following page with, may be null on the last page.
    #[serde(default)]
    pub bookmark: Option<String>,
    /// Whether another page follows.
    #[serde(default)]
    pub has_more_items: bool,
}

impl<T> Page for PagedResultSet<T> {
    type Item = T;

    fn into_parts(self) -> (Vec<T>, Cursor) {
        let cursor = if !self.paging_info.has_more_items {
            Cursor::End
        } else {
            match self.paging_info.bookmark.filter(|b| !b.is_empty()) {
                Some(bookmark) => Cursor::Next(bookmark),
                None => Cursor::Missing,
            }
        };
        (self.items, cursor)
    }
}

/// Extract the `bookmark` query parameter from a next-page url.
///
/// Returns `None` if the url has no query or no non-empty bookmark.
pub fn bookmark_from_next_url(next: &str) -> Option<String> {
    let (_, query) = next.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == BOOKMARK)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

impl Client {
    /// Fetch every page of an endpoint that links pages by `Next` url.
    ///
    /// The first request is sent without a bookmark. Any failure is returned
    /// and the records gathered so far are dropped.
    pub async fn fetch_all_pages<T: DeserializeOwned>(&self, req: &ApiRequest) -> Result<Vec<T>> {
        match self.walk_pages::<ObjectListPage<T>>(req).await {
            (items, None) => Ok(items),
            (_, Some(err)) => Err(err),
        }
    }

    /// Best-effort variant of [`Client::fetch_all_pages`].
    ///
    /// The first failure ends the walk and the records gathered so far are
    /// returned as if the sequence had ended there. This degrades gracefully
    /// on flaky pages, but it also hides real problems: an expired user key
    /// or a permission error looks exactly like "no more data" to the caller.
    /// The swallowed error is logged at `warn` level.
    pub async fn fetch_all_pages_best_effort<T: DeserializeOwned>(&self, req: &ApiRequest) -> Vec<T> {
        let (items, err) = self.walk_pages::<ObjectListPage<T>>(req).await;
        swallow(req, items, err)
    }

    /// Fetch every page of an endpoint that returns `PagingInfo`.
    ///
    /// Requests continue while `HasMoreItems` is true, each one carrying the
    /// bookmark returned by the previous page.
    pub async fn fetch_all_paged<T: DeserializeOwned>(&self, req: &ApiRequest) -> Result<Vec<T>> {
        match self.walk_pages::<PagedResultSet<T>>(req).await {
            (items, None) => Ok(items),
            (_, Some(err)) => Err(err),
        }
    }

    /// Best-effort variant of [`Client::fetch_all_paged`].
    ///
    /// Same policy as [`Client::fetch_all_pages_best_effort`]: the first
    /// failure silently ends the walk.
    pub async fn fetch_all_paged_best_effort<T: DeserializeOwned>(&self, req: &ApiRequest) -> Vec<T> {
        let (items, err) = self.walk_pages::<PagedResultSet<T>>(req).await;
        swallow(req, items, err)
    }

    /// Walk pages until the cursor ends, returning what was gathered and the
    /// error that stopped the walk, if any.
    ///
    /// A cursor that fails to advance ends the walk, so it always terminates
    /// even if the service keeps pointing at the same page.
    pub async fn walk_pages<P>(&self, req: &ApiRequest) -> (Vec<P::Item>, Option<Error>)
    where
        P: Page + DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut bookmark: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page_req = match &bookmark {
                None => req.clone(),
                Some(bookmark) => req.with_bookmark(bookmark),
            };
            let page: P = match self.send_json(&page_req).await {
                Ok(page) => page,
                Err(err) => return (items, Some(err)),
            };
            pages += 1;

            let (records, cursor) = page.into_parts();
            items.extend(records);

            match cursor {
                Cursor::End => break,
                Cursor::Missing => {
                    warn!(
                        "{} {}: page {pages} reports more data without a bookmark, stopping",
                        req.method(),
                        req.path()
                    );
                    break;
                }
                Cursor::Next(next) if bookmark.as_deref() == Some(next.as_str()) => {
                    warn!(
                        "{} {}: bookmark did not advance after page {pages}, stopping",
                        req.method(),
                        req.path()
                    );
                    break;
                }
                Cursor::Next(next) => bookmark = Some(next),
            }
        }

        debug!(
            "{} {}: fetched {} records in {pages} pages",
            req.method(),
            req.path(),
            items.len()
        );
        (items, None)
    }
}

fn swallow<T>(req: &ApiRequest, items: Vec<T>, err: Option<Error>) -> Vec<T> {
    if let Some(err) = err {
        warn!(
            "{} {}: stopping best-effort pagination after {} records: {err}",
            req.method(),
            req.path(),
            items.len()
        );
    }
    items
}
