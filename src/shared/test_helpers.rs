use std::sync::Arc;

use tokio::net::TcpListener;

use crate::core::router::{api_routes, Services};
use crate::features::locations::LocationService;

/// Fresh in-memory services over the built-in location tables
pub fn services() -> Services {
    Services::new(Arc::new(
        LocationService::load(None).expect("built-in location seed"),
    ))
}

/// Serve the full API on an ephemeral port and return its base URL
pub async fn spawn_app() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    let app = api_routes(&services());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    format!("http://{}", addr)
}
