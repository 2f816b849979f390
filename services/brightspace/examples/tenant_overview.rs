use anyhow::Result;
use reqwest::Client as HttpClient;
use valence_brightspace::{Client, Config};
use valence_core::{Context, OsEnv};
use valence_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();
    let _ = dotenv::dotenv();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::new(HttpClient::new()))
        .with_env(OsEnv);

    // Reads VALENCE_HOST, VALENCE_APP_ID, VALENCE_APP_KEY, VALENCE_USER_ID
    // and VALENCE_USER_KEY.
    let config = Config::default().from_env(&ctx);
    let client = Client::new(ctx, config)?;

    let me = client.whoami().await?;
    println!("Signed in as {} {} ({})", me.first_name, me.last_name, me.unique_name);

    println!("Enrollments:");
    for enrollment in client.get_my_enrollments().await? {
        println!("  {} {}", enrollment.org_unit.id, enrollment.org_unit.name);
    }

    // Best effort: a permission error here just shows up as an empty list.
    let data_sets = client.get_data_sets_best_effort().await;
    println!("Data sets: {}", data_sets.len());
    for ds in &data_sets {
        println!("  {} ({} extracts)", ds.name, ds.history().len());
    }

    Ok(())
}
