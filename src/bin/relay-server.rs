// Standalone relay server - run without any front end attached.
// Use: cargo run --bin relay-server

use prompt_relay::http_server::{run_http_server, AppState};
use prompt_relay::{config, ProxyConfig};

/// Try to bind to a port, returning the actual port used
async fn try_bind_port(start_port: u16) -> u16 {
    let mut port = start_port;
    for _ in 0..10 {
        match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await {
            Ok(listener) => {
                // Successfully bound, drop the listener so the server can use it
                drop(listener);
                return port;
            }
            Err(_) => {
                eprintln!("Port {} is in use, trying {}...", port, port + 1);
                port += 1;
            }
        }
    }
    // Return the last tried port, let the server fail with a clear message
    port
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = ProxyConfig::from_env();
    if !config.has_api_key() {
        eprintln!(
            "Warning: {} is not set; /api/generate will answer with a server error",
            config.provider.key_env_var()
        );
    }

    let port = try_bind_port(config::http_port()).await;

    eprintln!("Prompt Relay");
    eprintln!("Provider: {} ({})", config.provider.as_str(), config.model);
    eprintln!();
    eprintln!("Generate: http://localhost:{}/api/generate", port);
    eprintln!("Health:   http://localhost:{}/api/health", port);
    eprintln!();

    let state = AppState::from_config(config);
    run_http_server(state, port).await;
}
