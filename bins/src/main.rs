use env::Env;
use eyre::Context;
use log::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;

    let env = Env::load().context("Failed to load environment")?;

    info!("connecting to mongo");
    let storage = storage::Storage::new(env.mongo_url())
        .await
        .context("Failed to create storage")?;

    info!("creating studio services");
    let studio = studio::Studio::new(storage);

    info!("Starting API server...");
    api::serve(studio, env.listen_addr()).await?;

    Ok(())
}
