use resona::{config, server};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = config::server_port();
    if let Err(e) = server::run(port).await {
        log::error!("[Server] Exited with error: {}", e);
        std::process::exit(1);
    }
}
