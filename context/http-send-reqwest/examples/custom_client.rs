use anyhow::Result;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use valence_core::Context;
use valence_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    // Timeouts and pooling belong to the transport, not to the signing core.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("valence-example/1.0")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    // The versions endpoint is one of the few that answers without signing.
    let host = std::env::var("VALENCE_HOST").unwrap_or_else(|_| "https://devcop.brightspace.com".into());
    let url = format!("{host}/d2l/api/versions/");
    println!("GET {url}");

    let req = http::Request::get(&url).body(Bytes::new())?;
    match ctx.http_send_as_string(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("{}", resp.body());
        }
        Err(e) => eprintln!("Request failed: {e}"),
    }

    Ok(())
}
