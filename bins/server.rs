use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    // Load .env early so RUST_LOG takes effect in the subscriber.
    dotenv().ok();
    common::utils::logging::init_logging_default();

    let server_task = tokio::spawn(async {
        if let Err(e) = server::run().await {
            error!(error = %e, "server::run returned error");
            return Err(e);
        }
        Ok(())
    });

    tokio::select! {
        res = server_task => match res {
            Ok(Ok(())) => {
                info!("server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Ok(Err(_)) => std::process::ExitCode::FAILURE,
            Err(e) => {
                error!(error = %e, "server task join error");
                std::process::ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received, shutting down");
            std::process::ExitCode::SUCCESS
        }
    }
}
