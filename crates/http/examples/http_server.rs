use std::convert::Infallible;

use http::StatusCode;
use stream_http::handler::make_handler;
use stream_http::protocol::{Request, Response};
use stream_http::server::Server;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const PORT: u16 = 42069;

const OK_PAGE: &str = r#"<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>
"#;

const BAD_REQUEST_PAGE: &str = r#"<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>
"#;

const INTERNAL_SERVER_ERROR_PAGE: &str = r#"<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>
"#;

async fn route(request: Request) -> Result<Response, Infallible> {
    let (status, page) = match request.target() {
        "/yourproblem" => (StatusCode::BAD_REQUEST, BAD_REQUEST_PAGE),
        "/myproblem" => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_PAGE),
        _ => (StatusCode::OK, OK_PAGE),
    };

    Ok(Response::new(status).with_body(&mime::TEXT_HTML, page))
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let server = Server::builder().address(("0.0.0.0", PORT)).build().expect("server config should be valid");
    let handle = match server.serve(make_handler(route)).await {
        Ok(handle) => handle,
        Err(e) => {
            error!(cause = %e, "error starting server");
            return;
        }
    };
    info!(port = PORT, "server started");

    shutdown_signal().await;
    handle.close().await;
    info!("server gracefully stopped");
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(cause = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                error!(cause = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
