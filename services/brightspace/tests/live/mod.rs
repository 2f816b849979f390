use anyhow::Result;
use log::warn;
use reqwest::Client as HttpClient;
use std::env;
use valence_brightspace::{Client, Config};
use valence_core::{Context, OsEnv};
use valence_http_send_reqwest::ReqwestHttpSend;

fn init_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("VALENCE_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::new(HttpClient::new()))
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    Some(Client::new(ctx, config).expect("VALENCE_* credentials must be set"))
}

#[tokio::test]
async fn test_live_whoami() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("VALENCE_TEST is not set, skipped");
        return Ok(());
    };

    let me = client.whoami().await?;
    assert!(!me.identifier.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_live_enrollments() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("VALENCE_TEST is not set, skipped");
        return Ok(());
    };

    let _ = client.get_my_enrollments().await?;
    Ok(())
}

#[tokio::test]
async fn test_live_data_sets() -> Result<()> {
    let Some(client) = init_client() else {
        warn!("VALENCE_TEST is not set, skipped");
        return Ok(());
    };

    for set in client.get_data_sets().await? {
        assert!(!set.plugin_id.is_empty());
    }
    Ok(())
}
