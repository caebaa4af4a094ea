use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stepcheck_core::{CheckConfig, FakeHost};
use stepcheck_model::{ChangedFile, RepoTag};
use stepcheck_server::{
    build_router, AppState, BadgeAnnotator, BadgeAssets, NoopAnnotator, NoopPublisher,
    NotifyError, TopicPublisher,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const STEP_YAML: &str = "title: Script\nsource:\n  git: https://github.com/org/step.git\n  commit: abc123\n";

/// Records body patches and serves canned release notes.
#[derive(Default)]
struct RecordingAnnotator {
    bodies: Mutex<Vec<(u64, String)>>,
    notes: Mutex<Option<String>>,
}

#[async_trait::async_trait]
impl BadgeAnnotator for RecordingAnnotator {
    async fn set_pull_request_body(&self, number: u64, body: &str) -> Result<(), NotifyError> {
        self.bodies
            .lock()
            .expect("bodies lock")
            .push((number, body.to_string()));
        Ok(())
    }

    async fn release_notes(&self, _git_url: &str, _tag: &str) -> Result<String, NotifyError> {
        Ok(self
            .notes
            .lock()
            .expect("notes lock")
            .clone()
            .unwrap_or_default())
    }
}

#[derive(Default)]
struct RecordingPublisher {
    topics: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait::async_trait]
impl TopicPublisher for RecordingPublisher {
    async fn publish(&self, title: &str, raw: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError("forum down".to_string()));
        }
        self.topics
            .lock()
            .expect("topics lock")
            .push((title.to_string(), raw.to_string()));
        Ok(())
    }
}

async fn spawn_app(
    host: Arc<FakeHost>,
    annotator: Arc<dyn BadgeAnnotator>,
    publisher: Arc<dyn TopicPublisher>,
) -> std::net::SocketAddr {
    let state = AppState::new(
        host,
        CheckConfig::default(),
        BadgeAssets::embedded(),
        annotator,
        publisher,
        "https://badge.example",
    );
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (name, value) in headers {
        req.push_str(&format!("{name}: {value}\r\n"));
    }
    if let Some(body) = body {
        req.push_str(&format!("content-length: {}\r\n", body.len()));
    }
    req.push_str("\r\n");
    if let Some(body) = body {
        req.push_str(body);
    }
    stream.write_all(req.as_bytes()).await.expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, body.to_string())
}

/// Spawned webhook side effects land asynchronously; poll until the
/// condition holds or give up.
async fn eventually<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

async fn seed_valid_pr(host: &FakeHost, pr: &str) {
    let path = "steps/script/1.2.3/step.yml";
    host.files.lock().await.insert(
        pr.to_string(),
        vec![ChangedFile {
            filename: path.to_string(),
            raw_url: format!("https://host/raw/{path}"),
        }],
    );
    host.contents.lock().await.insert(
        format!("https://host/raw/{path}"),
        STEP_YAML.as_bytes().to_vec(),
    );
    host.tags.lock().await.insert(
        "https://api.github.com/repos/org/step/tags".to_string(),
        vec![RepoTag::new("1.2.3", "abc123")],
    );
}

fn pull_request_payload(action: &str, number: u64, merged: bool, body: &str) -> String {
    serde_json::json!({
        "action": action,
        "number": number,
        "pull_request": {
            "merged": merged,
            "number": number,
            "body": body,
        },
    })
    .to_string()
}

#[tokio::test]
async fn non_pull_request_events_are_acknowledged_and_ignored() {
    let annotator = Arc::new(RecordingAnnotator::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let host = Arc::new(FakeHost::default());
    let addr = spawn_app(host.clone(), annotator.clone(), publisher.clone()).await;

    let (status, _body) = send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "push")],
        Some("{\"ref\":\"refs/heads/main\"}"),
    )
    .await;
    assert_eq!(status, 200);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(annotator.bodies.lock().expect("bodies lock").is_empty());
    assert!(publisher.topics.lock().expect("topics lock").is_empty());
    assert_eq!(host.file_list_calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn opened_pr_gets_the_badge_prepended_to_its_body() {
    let annotator = Arc::new(RecordingAnnotator::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let addr = spawn_app(
        Arc::new(FakeHost::default()),
        annotator.clone(),
        publisher.clone(),
    )
    .await;

    let payload = pull_request_payload("opened", 42, false, "original description");
    let (status, _body) = send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "pull_request")],
        Some(&payload),
    )
    .await;
    assert_eq!(status, 200);

    assert!(
        eventually(|| !annotator.bodies.lock().expect("bodies lock").is_empty()).await,
        "body patch never arrived"
    );
    let bodies = annotator.bodies.lock().expect("bodies lock");
    assert_eq!(bodies.len(), 1);
    let (number, body) = &bodies[0];
    assert_eq!(*number, 42);
    assert!(body.starts_with("![TagCheck](https://badge.example/tag?pr=42)"));
    assert!(body.ends_with("original description"));
}

#[tokio::test]
async fn already_badged_body_is_not_patched_again() {
    let annotator = Arc::new(RecordingAnnotator::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let addr = spawn_app(
        Arc::new(FakeHost::default()),
        annotator.clone(),
        publisher.clone(),
    )
    .await;

    let badged = "![TagCheck](https://badge.example/tag?pr=42)\r\n\r\noriginal description";
    let payload = pull_request_payload("opened", 42, false, badged);
    let (status, _body) = send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "pull_request")],
        Some(&payload),
    )
    .await;
    assert_eq!(status, 200);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(annotator.bodies.lock().expect("bodies lock").is_empty());
}

#[tokio::test]
async fn merged_pr_publishes_a_release_topic() {
    let annotator = Arc::new(RecordingAnnotator::default());
    *annotator.notes.lock().expect("notes lock") = Some("Fixed everything.".to_string());
    let publisher = Arc::new(RecordingPublisher::default());
    let host = Arc::new(FakeHost::default());
    seed_valid_pr(&host, "42").await;
    let addr = spawn_app(host, annotator.clone(), publisher.clone()).await;

    let payload = pull_request_payload("closed", 42, true, "");
    let (status, _body) = send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "pull_request")],
        Some(&payload),
    )
    .await;
    assert_eq!(status, 200);

    assert!(
        eventually(|| !publisher.topics.lock().expect("topics lock").is_empty()).await,
        "announcement never arrived"
    );
    let topics = publisher.topics.lock().expect("topics lock");
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].0, "script 1.2.3");
    assert_eq!(topics[0].1, "Fixed everything.");
}

#[tokio::test]
async fn merged_pr_without_notes_falls_back_to_a_stock_announcement() {
    let annotator = Arc::new(RecordingAnnotator::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let host = Arc::new(FakeHost::default());
    seed_valid_pr(&host, "42").await;
    let addr = spawn_app(host, annotator, publisher.clone()).await;

    let payload = pull_request_payload("closed", 42, true, "");
    send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "pull_request")],
        Some(&payload),
    )
    .await;

    assert!(
        eventually(|| !publisher.topics.lock().expect("topics lock").is_empty()).await,
        "announcement never arrived"
    );
    let topics = publisher.topics.lock().expect("topics lock");
    assert_eq!(topics[0].1, "script 1.2.3 has been released.");
}

#[tokio::test]
async fn closed_unmerged_pr_is_not_announced() {
    let annotator = Arc::new(RecordingAnnotator::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let host = Arc::new(FakeHost::default());
    seed_valid_pr(&host, "42").await;
    let addr = spawn_app(host.clone(), annotator, publisher.clone()).await;

    let payload = pull_request_payload("closed", 42, false, "");
    let (status, _body) = send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "pull_request")],
        Some(&payload),
    )
    .await;
    assert_eq!(status, 200);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(publisher.topics.lock().expect("topics lock").is_empty());
    assert_eq!(host.file_list_calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn unvalidated_merge_is_not_announced() {
    let annotator = Arc::new(RecordingAnnotator::default());
    let publisher = Arc::new(RecordingPublisher::default());
    // Nothing seeded: validation ends in a request error.
    let addr = spawn_app(Arc::new(FakeHost::default()), annotator, publisher.clone()).await;

    let payload = pull_request_payload("closed", 42, true, "");
    send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "pull_request")],
        Some(&payload),
    )
    .await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(publisher.topics.lock().expect("topics lock").is_empty());
}

#[tokio::test]
async fn malformed_payload_is_rejected() {
    let addr = spawn_app(
        Arc::new(FakeHost::default()),
        Arc::new(NoopAnnotator),
        Arc::new(NoopPublisher),
    )
    .await;

    let (status, _body) = send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "pull_request")],
        Some("{not json"),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn forum_failure_does_not_disturb_the_service() {
    let annotator = Arc::new(RecordingAnnotator::default());
    let publisher = Arc::new(RecordingPublisher {
        fail: true,
        ..RecordingPublisher::default()
    });
    let host = Arc::new(FakeHost::default());
    seed_valid_pr(&host, "42").await;
    let addr = spawn_app(host, annotator, publisher).await;

    let payload = pull_request_payload("closed", 42, true, "");
    let (status, _body) = send_raw(
        addr,
        "POST",
        "/update",
        &[("x-github-event", "pull_request")],
        Some(&payload),
    )
    .await;
    assert_eq!(status, 200);

    tokio::time::sleep(Duration::from_millis(100)).await;
    let (status, body) = send_raw(addr, "GET", "/tag?pr=42", &[], None).await;
    assert_eq!(status, 200);
    assert!(body.contains(">passed<"), "{body}");
}
