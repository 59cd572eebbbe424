use dotenvy::dotenv;
use hopigo::models::config::ServerConfig;
use hopigo::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    run(server_config).await
}
