//! Client tests against a local one-shot HTTP server

use paperlens_llm::{ClientConfig, CompletionClient, LlmError, OpenAiTransport, QUERY_ERROR_SENTINEL};
use std::io::Write;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Serve exactly one response and hand back the raw request text
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}/v1", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);

        let Some(header_end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&data[..header_end]).to_lowercase();
        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if data.len() >= header_end + 4 + length {
            break;
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

fn client_for(endpoint: String) -> CompletionClient<OpenAiTransport> {
    let mut config = ClientConfig::for_model("gpt-4");
    config.endpoint = endpoint;
    CompletionClient::new(&config, Some("sk-test".to_string())).unwrap()
}

const OK_BODY: &str = r#"{"id":"chatcmpl-1","object":"chat.completion","choices":[{"index":0,"message":{"role":"assistant","content":"The paper is sound."},"finish_reason":"stop"}],"usage":{"prompt_tokens":40,"completion_tokens":5,"total_tokens":45}}"#;

#[tokio::test]
async fn test_send_query_round_trip() {
    let (endpoint, server) = serve_once("200 OK", OK_BODY).await;
    let client = client_for(endpoint);

    let reply = client.send_query("Review this paper.").await.unwrap();
    assert_eq!(reply, "The paper is sound.");

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with("post /v1/chat/completions"));
    assert!(request.contains("authorization: bearer sk-test"));
    assert!(request.contains(r#""model":"gpt-4""#));
    assert!(request.contains(r#""n":1"#));
    assert!(request.contains(r#""role":"system""#));
    assert!(request.contains("review this paper."));
}

#[tokio::test]
async fn test_rate_limit_is_typed_and_sentinel() {
    let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;

    let (endpoint, _server) = serve_once("429 Too Many Requests", body).await;
    let result = client_for(endpoint).send_query("q").await;
    assert!(matches!(result, Err(LlmError::RateLimited(_))));

    let (endpoint, _server) = serve_once("429 Too Many Requests", body).await;
    let reply = client_for(endpoint).send_query_or_sentinel("q").await;
    assert_eq!(reply, QUERY_ERROR_SENTINEL);
}

#[tokio::test]
async fn test_auth_failure() {
    let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
    let (endpoint, _server) = serve_once("401 Unauthorized", body).await;

    match client_for(endpoint).send_query("q").await {
        Err(LlmError::Auth(msg)) => assert!(msg.contains("Incorrect API key")),
        other => panic!("Expected Auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_body_is_invalid_response() {
    let (endpoint, _server) = serve_once("200 OK", "not json").await;
    let result = client_for(endpoint).send_query("q").await;
    assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_unreachable_endpoint_returns_sentinel() {
    let client = client_for("http://127.0.0.1:1/v1".to_string());
    assert_eq!(
        client.send_query_or_sentinel("q").await,
        "Error in processing the query."
    );
}

#[test]
fn test_key_file_credential() {
    let dir = tempfile::tempdir().unwrap();
    let key_path = dir.path().join("key.txt");
    let mut file = std::fs::File::create(&key_path).unwrap();
    writeln!(file, "sk-from-file").unwrap();

    let mut config = ClientConfig::default();
    config.key_file = key_path;
    assert!(CompletionClient::new(&config, None).is_ok());
}

#[test]
fn test_invalid_config_rejected_before_credential() {
    let mut config = ClientConfig::default();
    config.endpoint = "ftp://example.com".to_string();
    let result = CompletionClient::new(&config, Some("sk".into()));
    assert!(matches!(result, Err(LlmError::Config(msg)) if msg.contains("endpoint")));
}
