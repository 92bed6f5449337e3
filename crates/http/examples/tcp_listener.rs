use stream_http::connection::request_from_reader;
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let tcp_listener = match TcpListener::bind("0.0.0.0:42069").await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "bind listener error");
            return;
        }
    };
    info!(port = 42069, "start listening");

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };
        info!(%remote_addr, "connection accepted");

        let request = match request_from_reader(tcp_stream).await {
            Ok(request) => request,
            Err(e) => {
                error!(%remote_addr, cause = %e, "can't parse request");
                continue;
            }
        };

        let (request_line, headers, body) = request.into_parts();
        println!("Request line:");
        println!("- Method: {}", request_line.method());
        println!("- Target: {}", request_line.request_target());
        println!("- Version: {}", request_line.http_version());
        println!("Headers:");
        for (name, value) in headers.iter() {
            println!("- {name}: {value}");
        }
        println!("Body:");
        println!("{}", String::from_utf8_lossy(&body));
    }
}
