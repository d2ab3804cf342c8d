use log::error;
use vidradar_backend::build_rocket;
use vidradar_backend::config::{create_app_state, create_cors, init_logger, load_environment};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    load_environment();
    init_logger();

    let state = create_app_state()?;
    let cors = create_cors()?;

    if let Err(e) = build_rocket(state).attach(cors).launch().await {
        error!("Rocket failed to launch: {e}");
        anyhow::bail!("server terminated: {e}");
    }
    Ok(())
}
