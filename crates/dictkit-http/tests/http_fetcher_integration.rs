//! HTTP fetcher tests against a local canned-response server

use dictkit_conf::DictSettings;
use dictkit_core::DictError;
use dictkit_http::HttpDictFetcher;
use dictkit_loader::{DictFetcher, DictLoader};
use rstest::*;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct CannedResponse {
	status: &'static str,
	body: &'static str,
}

/// Minimal HTTP/1.1 server answering each path with a fixed response
struct CannedServer {
	addr: SocketAddr,
	requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
	async fn start(routes: Vec<(&'static str, CannedResponse)>) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let routes: Arc<HashMap<&'static str, CannedResponse>> = Arc::new(routes.into_iter().collect());
		let requests = Arc::new(Mutex::new(Vec::new()));

		let seen = requests.clone();
		tokio::spawn(async move {
			loop {
				let Ok((mut socket, _)) = listener.accept().await else {
					break;
				};
				let routes = routes.clone();
				let seen = seen.clone();
				tokio::spawn(async move {
					let mut buffer = Vec::new();
					let mut chunk = [0u8; 1024];
					while !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
						match socket.read(&mut chunk).await {
							Ok(0) | Err(_) => return,
							Ok(n) => buffer.extend_from_slice(&chunk[..n]),
						}
					}

					let request = String::from_utf8_lossy(&buffer);
					let path = request
						.lines()
						.next()
						.and_then(|line| line.split_whitespace().nth(1))
						.unwrap_or_default()
						.to_string();
					seen.lock().unwrap().push(path.clone());

					let (status, body) = match routes.get(path.as_str()) {
						Some(canned) => (canned.status, canned.body),
						None => ("404 Not Found", ""),
					};
					let reply = format!(
						"HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
						body.len()
					);
					let _ = socket.write_all(reply.as_bytes()).await;
					let _ = socket.shutdown().await;
				});
			}
		});

		Self { addr, requests }
	}

	fn settings(&self) -> DictSettings {
		DictSettings {
			base_url: format!("http://{}", self.addr),
			..Default::default()
		}
	}

	fn fetcher(&self) -> HttpDictFetcher {
		HttpDictFetcher::from_settings(&self.settings()).unwrap()
	}

	fn requests(&self) -> Vec<String> {
		self.requests.lock().unwrap().clone()
	}
}

const GENDER_BODY: &str = r#"{"code":"0","msg":"ok","success":true,"timestamp":1700000000000,"data":[{"label":"Male","value":1},{"label":"Female","value":2}]}"#;

#[fixture]
fn routes() -> Vec<(&'static str, CannedResponse)> {
	vec![
		(
			"/common/dict/gender",
			CannedResponse {
				status: "200 OK",
				body: GENDER_BODY,
			},
		),
		(
			"/common/dict/status",
			CannedResponse {
				status: "200 OK",
				body: r#"{"code":"500","msg":"dictionary unavailable","success":false,"data":null}"#,
			},
		),
		(
			"/common/dict/broken",
			CannedResponse {
				status: "500 Internal Server Error",
				body: "upstream exploded",
			},
		),
		(
			"/common/dict/silent",
			CannedResponse {
				status: "503 Service Unavailable",
				body: "",
			},
		),
		(
			"/common/dict/garbled",
			CannedResponse {
				status: "200 OK",
				body: "<html>not json</html>",
			},
		),
		(
			"/common/dict/empty",
			CannedResponse {
				status: "200 OK",
				body: r#"{"code":"0","msg":"ok","success":true,"data":null}"#,
			},
		),
		(
			"/common/dict/notice%20type",
			CannedResponse {
				status: "200 OK",
				body: r#"{"code":"0","msg":"ok","success":true,"data":[{"label":"System","value":"sys","color":"blue"}]}"#,
			},
		),
	]
}

#[rstest]
#[tokio::test]
async fn test_fetch_success(routes: Vec<(&'static str, CannedResponse)>) {
	let server = CannedServer::start(routes).await;

	let items = server.fetcher().fetch("gender").await.unwrap();

	assert_eq!(items.len(), 2);
	assert_eq!(items[0].label, "Male");
	assert_eq!(items[1].value, serde_json::json!(2));
	assert_eq!(server.requests(), vec!["/common/dict/gender"]);
}

#[rstest]
#[tokio::test]
async fn test_unsuccessful_envelope_is_api_error(routes: Vec<(&'static str, CannedResponse)>) {
	let server = CannedServer::start(routes).await;

	match server.fetcher().fetch("status").await {
		Err(DictError::Api { code, message }) => {
			assert_eq!(code, "500");
			assert_eq!(message, "dictionary unavailable");
		}
		other => panic!("expected API error, got {other:?}"),
	}
}

#[rstest]
#[case("broken", 500, "upstream exploded")]
#[case("silent", 503, "Service Unavailable")]
#[case("missing", 404, "Not Found")]
#[tokio::test]
async fn test_error_status(
	routes: Vec<(&'static str, CannedResponse)>,
	#[case] code: &str,
	#[case] expected_status: u16,
	#[case] expected_message: &str,
) {
	let server = CannedServer::start(routes).await;

	match server.fetcher().fetch(code).await {
		Err(DictError::Status { status, message }) => {
			assert_eq!(status, expected_status);
			assert_eq!(message, expected_message);
		}
		other => panic!("expected status error, got {other:?}"),
	}
}

#[rstest]
#[tokio::test]
async fn test_invalid_json_is_decode_error(routes: Vec<(&'static str, CannedResponse)>) {
	let server = CannedServer::start(routes).await;

	let result = server.fetcher().fetch("garbled").await;

	assert!(matches!(result, Err(DictError::Decode(_))));
}

#[rstest]
#[tokio::test]
async fn test_null_data_is_empty_list(routes: Vec<(&'static str, CannedResponse)>) {
	let server = CannedServer::start(routes).await;

	let items = server.fetcher().fetch("empty").await.unwrap();

	assert!(items.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_code_is_percent_encoded(routes: Vec<(&'static str, CannedResponse)>) {
	let server = CannedServer::start(routes).await;

	let items = server.fetcher().fetch("notice type").await.unwrap();

	assert_eq!(items[0].color.as_deref(), Some("blue"));
	assert_eq!(server.requests(), vec!["/common/dict/notice%20type"]);
}

#[rstest]
#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	drop(listener);

	let settings = DictSettings {
		base_url: format!("http://{addr}"),
		..Default::default()
	};
	let result = HttpDictFetcher::from_settings(&settings)
		.unwrap()
		.fetch("gender")
		.await;

	assert!(matches!(result, Err(DictError::Transport(_))));
}

#[rstest]
#[tokio::test]
async fn test_loader_over_http(routes: Vec<(&'static str, CannedResponse)>) {
	let server = CannedServer::start(routes).await;
	let loader = DictLoader::new(server.fetcher());

	let mut refs = loader.use_dict(["gender", "status", "gender"]);
	refs.settled().await;

	assert_eq!(refs.items("gender").unwrap().len(), 2);
	assert!(refs.items("status").unwrap().is_empty());
	assert!(loader.store().contains("gender"));
	assert!(!loader.store().contains("status"));

	// Cached now; only the failed code goes back to the server.
	let mut again = loader.use_dict(["gender", "status"]);
	again.settled().await;

	let requests = server.requests();
	assert_eq!(requests.iter().filter(|p| p.ends_with("/gender")).count(), 1);
	assert_eq!(requests.iter().filter(|p| p.ends_with("/status")).count(), 2);
}
