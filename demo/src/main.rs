use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use user_api_core::{display_users, ApiClient, CreateUser, UpdateUser, DEFAULT_BASE_URL};

async fn run(api: &ApiClient<user_api_core::ReqwestTransport>) -> anyhow::Result<()> {
    println!("Checking service health...");
    let health = api.check_health().await?;
    println!("Service status: {}", health["status"].as_str().unwrap_or("unknown"));

    println!("\nCreating users...");
    api.create_user(&CreateUser::new("alice", "alice@example.com")).await?;
    api.create_user(&CreateUser::new("bob", "bob@example.com")).await?;

    println!("\nFetching all users...");
    let users = api.get_users().await?;
    display_users(&users);

    if let Some(first) = users.first() {
        println!("\nUpdating first user...");
        let update = UpdateUser {
            username: Some("alice_updated".to_string()),
            email: None,
        };
        api.update_user(first.user_id, &update).await?;
    }

    let users = api.get_users().await?;
    display_users(&users);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let base_url =
        std::env::var("USER_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    info!(%base_url, "starting demo");

    let api = ApiClient::new(&base_url);
    run(&api).await.inspect_err(|e| error!("Error in main: {e}"))
}
