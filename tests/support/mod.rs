// Helpers for driving the invocation endpoint over real HTTP.
use cluster_probe::ProbeConfig;
use serde_json::Value;
use tokio::net::TcpListener;

// Port 1 has no listener, so every cluster connect is refused.
pub fn unreachable_store() -> ProbeConfig {
    ProbeConfig {
        endpoint: "127.0.0.1".to_string(),
        port: 1,
    }
}

// Serve the probe on an ephemeral port inside the calling test's runtime.
// The socket is bound before the server task starts, so requests queue
// instead of racing startup.
pub async fn spawn_probe(store: ProbeConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let address = listener.local_addr().expect("get local addr");
    tokio::spawn(cluster_probe::run(listener, store));
    format!("http://{address}/invoke")
}

// One invocation; returns the HTTP status and decoded JSON body.
pub async fn invoke(
    invoke_url: &str,
    request_id: Option<&str>,
    body: impl Into<reqwest::Body>,
) -> (reqwest::StatusCode, Value) {
    let client = reqwest::Client::new();
    let mut request = client
        .post(invoke_url)
        .header("content-type", "application/json")
        .body(body);
    if let Some(request_id) = request_id {
        request = request.header("x-request-id", request_id);
    }

    let res = request.send().await.expect("request should succeed");
    let status = res.status();
    let payload = res.json().await.expect("expected json payload");
    (status, payload)
}
