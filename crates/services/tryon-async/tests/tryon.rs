use bytes::Bytes;
use futures::StreamExt;
use serde_json::json;
use tryon_async::resources::ProgressStream;
use tryon_async::test_support::{frame, stream_body};
use tryon_async::types::{CustomerImage, StreamEvent, TryOnForm};
use tryon_async::ui::{
    Notifier, ResultView, SubmissionState, Submitter, VALIDATION_MESSAGE, dispatch,
};
use tryon_async::{Client, TryOnConfig, TryOnError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records alerts and every rendered view.
#[derive(Default)]
struct Recorder {
    alerts: Vec<String>,
    renders: Vec<ResultView>,
}

impl Notifier for Recorder {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn render(&mut self, view: &ResultView) {
        self.renders.push(view.clone());
    }
}

impl Recorder {
    fn labels(&self) -> Vec<String> {
        self.renders
            .iter()
            .filter(|v| v.progress.is_visible())
            .map(|v| v.progress.label())
            .collect()
    }
}

fn test_client(server: &MockServer) -> Client<TryOnConfig> {
    Client::with_config(TryOnConfig::new().with_base_url(server.uri()))
}

fn full_form() -> TryOnForm {
    TryOnForm::new()
        .with_customer_image(CustomerImage::from_bytes("me.png", b"fake png bytes".to_vec()))
        .with_clothing_id("2")
}

fn event_stream_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

fn chunked(chunks: &[&'static [u8]]) -> ProgressStream {
    let items: Vec<reqwest::Result<Bytes>> =
        chunks.iter().map(|c| Ok(Bytes::from_static(*c))).collect();
    ProgressStream::new(futures::stream::iter(items).boxed())
}

/// A body that delivers `chunks` and then fails like a dropped connection.
async fn cut_short(chunks: &[&'static [u8]]) -> ProgressStream {
    let dropped = reqwest::Client::new()
        .get("http://127.0.0.1:9/")
        .send()
        .await
        .unwrap_err();
    let items: Vec<reqwest::Result<Bytes>> = chunks
        .iter()
        .map(|c| Ok(Bytes::from_static(*c)))
        .chain(std::iter::once(Err(dropped)))
        .collect();
    ProgressStream::new(futures::stream::iter(items).boxed())
}

#[tokio::test]
async fn submit_streams_progress_then_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tryon"))
        .and(body_string_contains("name=\"customerImage\""))
        .and(body_string_contains("filename=\"me.png\""))
        .and(body_string_contains("name=\"clothingId\""))
        .respond_with(event_stream_response(stream_body(&[
            json!({"progress": 10}),
            json!({"progress": 55, "status": "processing"}),
            json!({"resultImage": "/uploads/result_1.png", "status": "Complete"}),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    let mut rec = Recorder::default();

    let result = submitter.submit(&full_form(), &mut view, &mut rec).await.unwrap();

    assert_eq!(result.as_deref(), Some("/uploads/result_1.png"));
    assert_eq!(submitter.state(), SubmissionState::Completed);
    assert_eq!(rec.labels(), ["0%", "10%", "55%"]);
    assert!(rec.alerts.is_empty());
    assert!(!view.progress.is_visible());
    assert_eq!(view.result.displayed(), Some("/uploads/result_1.png"));
}

#[tokio::test]
async fn error_event_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tryon"))
        .respond_with(event_stream_response(stream_body(&[
            json!({"progress": 10}),
            json!({"progress": 20}),
            json!({"error": "boom", "status": "Failed"}),
            json!({"progress": 90}),
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    let mut rec = Recorder::default();

    let err = submitter.submit(&full_form(), &mut view, &mut rec).await.unwrap_err();

    assert!(matches!(err, TryOnError::Remote(ref m) if m == "boom"));
    assert_eq!(submitter.state(), SubmissionState::Failed);
    assert_eq!(rec.alerts, ["Error: boom"]);
    assert!(!view.progress.is_visible());
    // The late progress frame after the error changes nothing.
    assert!((view.progress.percent() - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn missing_inputs_never_send_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tryon"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let forms = [
        TryOnForm::new(),
        TryOnForm::new().with_clothing_id("2"),
        TryOnForm::new().with_customer_image(CustomerImage::from_bytes("me.png", b"x".to_vec())),
    ];

    for form in &forms {
        let mut submitter = Submitter::new(&client);
        let mut view = ResultView::default();
        let mut rec = Recorder::default();

        let err = submitter.submit(form, &mut view, &mut rec).await.unwrap_err();

        assert!(matches!(err, TryOnError::Validation(_)));
        assert_eq!(rec.alerts, [VALIDATION_MESSAGE]);
        assert!(rec.renders.is_empty());
        assert_eq!(view, ResultView::default());
        assert_eq!(submitter.state(), SubmissionState::Idle);
    }
}

#[tokio::test]
async fn non_success_status_skips_decoding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tryon"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Clothing image not found: clothing_9.png"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    let mut rec = Recorder::default();

    let err = submitter.submit(&full_form(), &mut view, &mut rec).await.unwrap_err();

    assert!(matches!(err, TryOnError::Api(ref obj) if obj.status_code == 400));
    assert_eq!(
        rec.alerts,
        ["Connection error: HTTP error! status: 400 (Clothing image not found: clothing_9.png)"]
    );
    assert_eq!(submitter.state(), SubmissionState::Failed);
    assert!(!view.progress.is_visible());
    assert!(!view.result.is_visible());
}

#[tokio::test]
async fn non_success_status_with_event_body_is_not_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tryon"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_raw(frame(&json!({"resultImage": "X"})), "text/event-stream"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    let mut rec = Recorder::default();

    let err = submitter.submit(&full_form(), &mut view, &mut rec).await.unwrap_err();

    assert!(err.is_connection_error());
    assert!(rec.alerts[0].starts_with("Connection error: HTTP error! status: 503"));
    assert_eq!(view.result.displayed(), None);
}

#[tokio::test]
async fn refused_connection_is_connection_error() {
    // Port 9 (discard) is essentially never listening on loopback.
    let client = Client::with_config(TryOnConfig::new().with_base_url("http://127.0.0.1:9"));
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    let mut rec = Recorder::default();

    let err = submitter.submit(&full_form(), &mut view, &mut rec).await.unwrap_err();

    assert!(matches!(err, TryOnError::Reqwest(_)));
    assert_eq!(rec.alerts.len(), 1);
    assert!(rec.alerts[0].starts_with("Connection error: "));
    assert!(!view.progress.is_visible());
}

#[tokio::test]
async fn stream_ending_without_terminal_event_returns_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tryon"))
        .respond_with(event_stream_response(format!(
            "{}data: {{\"progress\": 4",
            frame(&json!({"progress": 30}))
        )))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    let mut rec = Recorder::default();

    let result = submitter.submit(&full_form(), &mut view, &mut rec).await.unwrap();

    assert_eq!(result, None);
    assert_eq!(submitter.state(), SubmissionState::Streaming);
    assert_eq!(view.progress.label(), "30%");
    assert!(view.progress.is_visible());
}

#[tokio::test]
async fn resubmitting_starts_fresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tryon"))
        .respond_with(event_stream_response(stream_body(&[json!({"resultImage": "R"})])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    let mut rec = Recorder::default();

    submitter.submit(&full_form(), &mut view, &mut rec).await.unwrap();
    assert_eq!(submitter.state(), SubmissionState::Completed);

    let mut rec = Recorder::default();
    submitter.submit(&full_form(), &mut view, &mut rec).await.unwrap();

    // The first render of the second run shows a reset bar and no old result.
    let first = &rec.renders[0];
    assert!(first.progress.is_visible());
    assert_eq!(first.progress.label(), "0%");
    assert_eq!(first.result.displayed(), None);
    assert_eq!(submitter.state(), SubmissionState::Completed);
}

#[tokio::test]
async fn three_chunks_on_frame_boundaries() {
    let mut stream = chunked(&[
        b"data: {\"progress\":10}\n\n",
        b"data: {\"progress\":55}\n\n",
        b"data: {\"resultImage\":\"X\"}\n\n",
    ]);
    let mut view = ResultView::default();
    view.progress.reset();
    let mut alerts = Vec::new();
    let mut labels = Vec::new();

    while let Some(event) = stream.next_event().await {
        dispatch(event.unwrap(), &mut view.progress, &mut view.result, &mut alerts);
        if view.progress.is_visible() {
            labels.push(view.progress.label());
        }
    }

    assert_eq!(labels, ["10%", "55%"]);
    assert_eq!(view.result.displayed(), Some("X"));
    assert!(!view.progress.is_visible());
    assert!(alerts.is_empty());
}

#[tokio::test]
async fn fragment_is_held_until_completed() {
    let mut stream = chunked(&[
        b"data: {\"progress\":1}\n\ndata: {\"progress\":2}\n\ndata: {\"err",
        b"or\":\"late\"}\n\n",
    ]);

    let mut events = Vec::new();
    while let Some(event) = stream.next_event().await {
        events.push(event.unwrap());
    }

    assert_eq!(
        events,
        vec![
            StreamEvent::Progress { percent: 1.0, status: None },
            StreamEvent::Progress { percent: 2.0, status: None },
            StreamEvent::Error { message: "late".into() },
        ]
    );
}

#[tokio::test]
async fn connection_lost_mid_stream_fails_submission() {
    let client = Client::with_config(TryOnConfig::new().with_base_url("http://127.0.0.1:9"));
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    view.progress.reset();
    let mut rec = Recorder::default();

    let stream = cut_short(&[b"data: {\"progress\":10}\n\n"]).await;
    let err = submitter.follow(stream, &mut view, &mut rec).await.unwrap_err();

    assert!(matches!(err, TryOnError::Reqwest(_)));
    assert_eq!(rec.alerts.len(), 1);
    assert!(rec.alerts[0].starts_with("Connection error:"));
    assert_eq!(rec.labels(), ["10%"]);
    assert!(!view.progress.is_visible());
    assert_eq!(submitter.state(), SubmissionState::Failed);
}

#[tokio::test]
async fn connection_lost_after_result_keeps_result() {
    let client = Client::with_config(TryOnConfig::new().with_base_url("http://127.0.0.1:9"));
    let mut submitter = Submitter::new(&client);
    let mut view = ResultView::default();
    view.progress.reset();
    let mut rec = Recorder::default();

    let stream = cut_short(&[b"data: {\"resultImage\":\"X\"}\n\n"]).await;
    let result = submitter.follow(stream, &mut view, &mut rec).await.unwrap();

    assert_eq!(result.as_deref(), Some("X"));
    assert!(rec.alerts.is_empty());
    assert_eq!(view.result.displayed(), Some("X"));
    assert_eq!(submitter.state(), SubmissionState::Completed);
}
