use std::fs;
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};

use async_trait::async_trait;
use chost_core::Settings;
use chost_engine::{
    ChannelNoticeSink, CohostExtractor, FailureKind, FetchError, FetchSettings, FetchOutput,
    Fetcher, FileSink, ImportError, Importer, Notice, PersistError, ReqwestFetcher, VaultWriter,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POST: &str = include_str!("fixtures/post.html");

async fn serve_post(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

fn drain(rx: &mpsc::Receiver<Notice>) -> Vec<Notice> {
    rx.try_iter().collect()
}

/// Records every create call; used to prove nothing is written.
#[derive(Default)]
struct RecordingSink {
    created: Mutex<Vec<String>>,
}

impl FileSink for RecordingSink {
    fn create(&self, filename: &str, _content: &str) -> Result<PathBuf, PersistError> {
        self.created.lock().unwrap().push(filename.to_string());
        Ok(PathBuf::from(filename))
    }
}

struct OfflineFetcher;

#[async_trait]
impl Fetcher for OfflineFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchOutput, FetchError> {
        Err(FetchError {
            kind: FailureKind::Network,
            message: "dns failure".into(),
        })
    }
}

#[tokio::test]
async fn imports_post_into_vault() {
    chost_logging::initialize_for_tests();
    let server = MockServer::start().await;
    serve_post(&server, "/alice/post/12345-hello-world", POST).await;

    let vault = TempDir::new().unwrap();
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let extractor = CohostExtractor::new();
    let writer = VaultWriter::new(vault.path().to_path_buf());
    let (tx, rx) = mpsc::channel();
    let notices = ChannelNoticeSink::new(tx);
    let importer = Importer::new(&fetcher, &extractor, &writer, &notices);

    let settings = Settings {
        import_post_tags: true,
        ..Settings::default()
    };
    let url = format!("{}/alice/post/12345-hello-world", server.uri());
    let outcome = importer.import(&url, &settings).await.unwrap();

    assert_eq!(outcome.filename, "alice - Hello World.md");
    assert_eq!(outcome.author_handle, "alice");
    let note = fs::read_to_string(&outcome.path).unwrap();
    assert!(note.starts_with("---\ntags:\n  - foo-bar\n  - baz\n---\n"));
    assert!(note.contains("First paragraph of the chost."));
    assert!(!note.contains("rc/login"));
    assert_eq!(drain(&rx), vec![Notice::Created("alice - Hello World.md".into())]);
}

#[tokio::test]
async fn second_import_of_same_post_collides() {
    chost_logging::initialize_for_tests();
    let server = MockServer::start().await;
    serve_post(&server, "/alice/post/12345-hello-world", POST).await;

    let vault = TempDir::new().unwrap();
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let extractor = CohostExtractor::new();
    let writer = VaultWriter::new(vault.path().to_path_buf());
    let (tx, rx) = mpsc::channel();
    let notices = ChannelNoticeSink::new(tx);
    let importer = Importer::new(&fetcher, &extractor, &writer, &notices);

    let url = format!("{}/alice/post/12345-hello-world", server.uri());
    let first = importer.import(&url, &Settings::default()).await.unwrap();
    let before = fs::read_to_string(&first.path).unwrap();
    drain(&rx);

    let err = importer.import(&url, &Settings::default()).await.unwrap_err();
    assert!(matches!(err, ImportError::Persist(PersistError::FileExists(_))));
    assert_eq!(fs::read_to_string(&first.path).unwrap(), before);
    assert_eq!(drain(&rx), vec![Notice::FileExists]);
}

#[tokio::test]
async fn fetch_failure_writes_nothing() {
    chost_logging::initialize_for_tests();
    let extractor = CohostExtractor::new();
    let sink = RecordingSink::default();
    let (tx, rx) = mpsc::channel();
    let notices = ChannelNoticeSink::new(tx);
    let importer = Importer::new(&OfflineFetcher, &extractor, &sink, &notices);

    let err = importer
        .import("https://cohost.org/alice/post/1", &Settings::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::Fetch(_)));
    assert!(sink.created.lock().unwrap().is_empty());
    assert_eq!(drain(&rx), vec![Notice::FetchFailed]);
}

#[tokio::test]
async fn page_without_post_is_reported_not_found() {
    chost_logging::initialize_for_tests();
    let server = MockServer::start().await;
    serve_post(&server, "/alice/post/404", "<html><body>gone</body></html>").await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let extractor = CohostExtractor::new();
    let sink = RecordingSink::default();
    let (tx, rx) = mpsc::channel();
    let notices = ChannelNoticeSink::new(tx);
    let importer = Importer::new(&fetcher, &extractor, &sink, &notices);

    let url = format!("{}/alice/post/404", server.uri());
    let err = importer.import(&url, &Settings::default()).await.unwrap_err();

    assert!(matches!(err, ImportError::Extract(_)));
    assert!(sink.created.lock().unwrap().is_empty());
    assert_eq!(drain(&rx), vec![Notice::NotFound(url)]);
}

#[tokio::test]
async fn missing_author_warns_and_still_writes() {
    chost_logging::initialize_for_tests();
    let server = MockServer::start().await;
    serve_post(
        &server,
        "/anon/post/9",
        r#"<article class="co-post-box"><p>who wrote this</p></article>"#,
    )
    .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let extractor = CohostExtractor::new();
    let sink = RecordingSink::default();
    let (tx, rx) = mpsc::channel();
    let notices = ChannelNoticeSink::new(tx);
    let importer = Importer::new(&fetcher, &extractor, &sink, &notices);

    let url = format!("{}/anon/post/9", server.uri());
    let outcome = importer.import(&url, &Settings::default()).await.unwrap();

    assert_eq!(outcome.author_handle, "not found");
    assert_eq!(sink.created.lock().unwrap().len(), 1);
    assert_eq!(
        drain(&rx),
        vec![
            Notice::NotFound("author".into()),
            Notice::Created(outcome.filename.clone()),
        ]
    );
}

#[tokio::test]
async fn page_with_invalid_byte_still_imports() {
    chost_logging::initialize_for_tests();
    let server = MockServer::start().await;
    let mut page = br#"<a rel="author">alice</a><article class="co-post-box"><p>caf"#.to_vec();
    page.push(0xFF);
    page.extend_from_slice(b"</p></article>");
    Mock::given(method("GET"))
        .and(path("/alice/post/55"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let vault = TempDir::new().unwrap();
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let extractor = CohostExtractor::new();
    let writer = VaultWriter::new(vault.path().to_path_buf());
    let (tx, rx) = mpsc::channel();
    let notices = ChannelNoticeSink::new(tx);
    let importer = Importer::new(&fetcher, &extractor, &writer, &notices);

    let url = format!("{}/alice/post/55", server.uri());
    let outcome = importer.import(&url, &Settings::default()).await.unwrap();

    let note = fs::read_to_string(&outcome.path).unwrap();
    assert!(note.contains("caf\u{FFFD}"), "{note}");
    assert_eq!(drain(&rx), vec![Notice::Created(outcome.filename.clone())]);
}
