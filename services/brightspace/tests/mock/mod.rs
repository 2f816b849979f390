use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode, Uri};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use valence_brightspace::{Client, Config};
use valence_core::time::FixedClock;
use valence_core::{Context, Error, HttpSend, Result};

pub const TIMESTAMP: i64 = 1621814400;

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: Uri,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    /// Query parameters in order.
    pub fn query(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.uri.query().unwrap_or_default().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn query_value(&self, key: &str) -> Option<String> {
        self.query().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn form(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(&self.body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

#[derive(Debug)]
enum Reply {
    Response(StatusCode, String),
    Failure(String),
}

#[derive(Debug, Default)]
struct State {
    replies: VecDeque<Reply>,
    requests: Vec<Recorded>,
}

/// Transport that answers from a script and records what it was sent.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    state: Arc<Mutex<State>>,
}

impl MockHttpSend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn reply(self, status: StatusCode, body: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Reply::Response(status, body.into()));
        self
    }

    /// Queue a transport failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Reply::Failure(message.into()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let mut state = self.state.lock().unwrap();
        state.requests.push(Recorded {
            method: parts.method,
            uri: parts.uri,
            content_type: parts
                .headers
                .get(http::header::CONTENT_TYPE)
                .map(|v| v.to_str().unwrap().to_string()),
            body,
        });

        match state.replies.pop_front() {
            Some(Reply::Response(status, body)) => Ok(http::Response::builder()
                .status(status)
                .body(Bytes::from(body))
                .unwrap()),
            Some(Reply::Failure(message)) => Err(Error::unexpected(message)),
            None => Err(Error::unexpected("mock transport has no reply left")),
        }
    }
}

pub fn config() -> Config {
    Config {
        host: Some("https://lms.example.edu".to_string()),
        app_id: Some("foo".to_string()),
        app_key: Some("bar".to_string()),
        user_id: Some("baz".to_string()),
        user_key: Some("qux".to_string()),
        org_id: Some("6606".to_string()),
        install_code: Some("ACME-INSTALL".to_string()),
        guid_key: Some("guid-shared-secret".to_string()),
        ..Default::default()
    }
}

/// Client with a frozen clock sending through the given mock.
pub fn client(mock: &MockHttpSend) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(mock.clone())
        .with_clock(FixedClock::from_timestamp(TIMESTAMP).unwrap());
    Client::new(ctx, config()).unwrap()
}
