//! HTTP collector reporting against a local one-shot server

use rstest::rstest;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use zluvo_conf::{ProjectInfo, Settings};
use zluvo_logging::{FailureLogger, FailureRecord, FailureReporter, HttpReporter, ReportError};

struct CapturedRequest {
	head: String,
	body: String,
}

/// Accept one connection, answer with `status` and return what was sent.
async fn serve_once(listener: TcpListener, status: &'static str) -> CapturedRequest {
	let (mut stream, _) = listener.accept().await.unwrap();
	let mut buf = Vec::new();
	let mut chunk = [0u8; 1024];

	let header_end = loop {
		let n = stream.read(&mut chunk).await.unwrap();
		buf.extend_from_slice(&chunk[..n]);
		if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
			break pos + 4;
		}
	};

	let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
	let content_length = head
		.lines()
		.find_map(|line| {
			let (name, value) = line.split_once(':')?;
			name.eq_ignore_ascii_case("content-length")
				.then(|| value.trim().parse::<usize>().ok())
				.flatten()
		})
		.unwrap_or(0);

	while buf.len() < header_end + content_length {
		let n = stream.read(&mut chunk).await.unwrap();
		buf.extend_from_slice(&chunk[..n]);
	}
	let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();

	let response = format!("HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n", status);
	stream.write_all(response.as_bytes()).await.unwrap();

	CapturedRequest { head, body }
}

async fn local_settings(listener: &TcpListener) -> Settings {
	let addr = listener.local_addr().unwrap();
	let url = reqwest::Url::parse(&format!("http://{}/api/record", addr)).unwrap();
	Settings::default()
		.with_access_token("collector-token")
		.with_collector_url(url)
		.with_project(ProjectInfo::new("shop", "2.0.0"))
}

#[rstest]
#[tokio::test]
async fn test_http_reporter_posts_record_with_bearer_token() {
	// Arrange
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let settings = local_settings(&listener).await;
	let reporter = HttpReporter::from_settings(&settings).unwrap();
	let record = FailureRecord::new(
		settings.project().clone(),
		"Register Form",
		vec!["Field is required".to_string()],
	);
	let server = tokio::spawn(serve_once(listener, "200 OK"));

	// Act
	let result = reporter.report(&record).await;
	let captured = server.await.unwrap();

	// Assert
	assert!(result.is_ok());
	assert!(captured.head.starts_with("POST /api/record"));
	assert!(
		captured
			.head
			.to_lowercase()
			.contains("authorization: bearer collector-token")
	);
	let sent: FailureRecord = serde_json::from_str(&captured.body).unwrap();
	assert_eq!(sent, record);
}

#[rstest]
#[tokio::test]
async fn test_http_reporter_surfaces_rejection_status() {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let settings = local_settings(&listener).await;
	let reporter = HttpReporter::from_settings(&settings).unwrap();
	let record = FailureRecord::new(ProjectInfo::default(), "Login", vec![]);
	let server = tokio::spawn(serve_once(listener, "401 Unauthorized"));

	let result = reporter.report(&record).await;
	server.await.unwrap();

	assert!(matches!(result, Err(ReportError::Rejected(401))));
}

#[rstest]
#[tokio::test]
async fn test_logger_from_settings_forwards_to_collector() {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let settings = local_settings(&listener).await;
	let logger = Arc::new(FailureLogger::from_settings(&settings));
	let server = tokio::spawn(serve_once(listener, "204 No Content"));

	let record = logger
		.record("Checkout", &["Value is not valid url".to_string()])
		.await;
	let captured = server.await.unwrap();

	let sent: FailureRecord = serde_json::from_str(&captured.body).unwrap();
	assert_eq!(sent.form, "Checkout");
	assert_eq!(sent.project.name, "shop");
	assert_eq!(sent.errors, record.errors);
}
