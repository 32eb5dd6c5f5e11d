// shared helpers, not every test file uses all of them
#![allow(dead_code)]

use axum::Router;
use tokio::net::TcpListener;

/// serves `router` on a random local port and returns its base url
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });

    format!("http://{}", addr)
}
