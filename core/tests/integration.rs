//! End-to-end tests against the live mock backend.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every core client
//! operation and the router over real HTTP using ureq. The server's request
//! log lets each test check exactly what went over the wire.

use praxis_core::{
    ApiError, App, HttpMethod, HttpRequest, HttpResponse, PraxisClient, Screen, Slide, SlideDeck, Transport,
    UploadedDocument,
};

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let content_type = req.content_type();
        let body = req.body_bytes();
        let result = match (req.method, content_type, body) {
            (HttpMethod::Get, _, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Post, Some(content_type), Some(body)) => {
                self.agent.post(&req.path).content_type(content_type).send(&body[..])
            }
            (HttpMethod::Post, _, _) => self.agent.post(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Start a mock backend on a random port and return its base URL.
fn start(backend: mock_server::Backend) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, backend).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn recorded(backend: &mock_server::Backend) -> Vec<mock_server::RecordedRequest> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(backend.requests())
}

const LESSON: &str = "Intro\nPlants convert sunlight into energy. Chlorophyll absorbs light.\n\nSummary\nEnergy is stored as glucose.";

#[test]
fn every_operation_round_trips() {
    let backend = mock_server::Backend::new();
    let client = PraxisClient::new(&start(backend.clone()));
    let transport = UreqTransport::new();

    // Step 1: status.
    let status = client.backend_status(&transport).unwrap();
    assert!(status.is_ready);

    // Step 2: process a text document.
    let doc = UploadedDocument::new("lesson.txt", LESSON.as_bytes().to_vec());
    let content = client.process_content(&transport, &doc).unwrap();
    assert_eq!(content.full_content, LESSON);
    assert_eq!(content.slide_topics[0], "Intro");

    // Step 3: slides.
    let deck = client.generate_slides(&transport, &content.full_content).unwrap();
    assert_eq!(deck.slides.len(), 2);
    assert_eq!(deck.slides[1].title, "Summary");
    assert!(deck.slides.iter().all(|s| s.image_base64.is_none()));

    // Step 4: PDF export returns the server's bytes untouched.
    let pdf = client.download_slides_pdf(&transport, &deck).unwrap();
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert!(pdf.bytes.ends_with(b"%%EOF\n"));
    assert_eq!(pdf.content_type.as_deref(), Some("application/pdf"));

    // Step 5: quiz, exam, announcement.
    let quiz = client.generate_quiz(&transport, &content.full_content).unwrap();
    assert!(!quiz.quiz.is_empty());
    assert!(quiz.quiz.iter().all(|q| q.options.contains(&q.answer)));
    let exam = client.generate_exam(&transport, &content.full_content).unwrap();
    assert!(exam.exam.len() >= quiz.quiz.len());
    let announcement = client.generate_announcement(&transport, &content.full_content).unwrap();
    assert!(announcement.text().unwrap().contains("Intro"));

    // Step 6: one request per call, each with the single expected field.
    let requests = recorded(&backend);
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/process-content/",
            "/generate-detailed-slides/",
            "/download-slides-pdf/",
            "/generate-quiz/",
            "/generate-exam/",
            "/generate-announcement/",
        ]
    );
    assert_eq!(requests[0].field("file").unwrap().data, LESSON.as_bytes());
    assert_eq!(requests[0].field("file").unwrap().file_name.as_deref(), Some("lesson.txt"));
    for request in &requests[1..] {
        assert_eq!(request.fields.len(), 1, "{}", request.path);
    }
    assert_eq!(requests[3].field("content").unwrap().text(), Some(LESSON));
}

#[test]
fn pdf_request_carries_deck_json() {
    let backend = mock_server::Backend::new();
    let client = PraxisClient::new(&start(backend.clone()));
    let slide = |title: &str| Slide {
        title: title.to_string(),
        subtitle: Some("sub".to_string()),
        bullet_points: vec!["x".to_string()],
        image_base64: None,
        extra: serde_json::Map::new(),
    };
    let deck = SlideDeck {
        slides: vec![slide("First"), slide("Second")],
    };
    client.download_slides_pdf(&UreqTransport::new(), &deck).unwrap();

    let requests = recorded(&backend);
    assert_eq!(requests.len(), 1);
    let raw = requests[0].field("slides_json").unwrap().text().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(raw).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({"slides":[
            {"title":"First","subtitle":"sub","bullet_points":["x"]},
            {"title":"Second","subtitle":"sub","bullet_points":["x"]}
        ]})
    );
}

#[test]
fn error_kinds_are_distinguished() {
    let transport = UreqTransport::new();

    let not_ready = PraxisClient::new(&start(mock_server::Backend::not_ready("still loading")));
    let err = not_ready.generate_quiz(&transport, "text").unwrap_err();
    assert!(matches!(err, ApiError::ServiceUnavailable { ref body } if body.contains("still loading")));

    let ready = PraxisClient::new(&start(mock_server::Backend::new()));
    let doc = UploadedDocument::new("diagram.png", vec![0x89, 0x50]);
    let err = ready.process_content(&transport, &doc).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 400, .. }));

    // Nothing listens on port 9 of the loopback interface.
    let unreachable = PraxisClient::new("http://127.0.0.1:9");
    let err = unreachable.generate_slides(&transport, "text").unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn router_session_against_live_backend() {
    let backend = mock_server::Backend::new();
    let mut app = App::new(PraxisClient::new(&start(backend.clone())));
    let transport = UreqTransport::new();

    app.process_document(&transport, UploadedDocument::new("lesson.txt", LESSON.as_bytes().to_vec()));
    assert_eq!(app.content(), Some(LESSON));

    app.navigate(Screen::Slides);
    app.generate_slides(&transport);
    assert_eq!(app.slides().deck().slides.len(), 2);
    let pdf = app.download_slides_pdf(&transport).unwrap();
    assert_eq!(pdf.file_name(), "slides.pdf");

    app.generate_quiz(&transport);
    app.generate_exam(&transport);
    assert!(app.quiz().items().is_some());
    assert!(app.exam().items().is_some());

    let text = praxis_core::render::to_text(&app.render());
    assert!(text.contains("[Slides]"));
    assert!(text.contains("+ Intro"));
    assert_eq!(recorded(&backend).len(), 5);
}

/// Sends every request to another backend, keeping the path.
struct Redirect<'a> {
    inner: &'a UreqTransport,
    from: String,
    to: String,
}

impl Transport for Redirect<'_> {
    fn execute(&self, mut req: HttpRequest) -> Result<HttpResponse, ApiError> {
        req.path = req.path.replacen(&self.from, &self.to, 1);
        self.inner.execute(req)
    }
}

#[test]
fn failed_generation_keeps_displayed_slides() {
    let ready = start(mock_server::Backend::new());
    let loading = start(mock_server::Backend::not_ready("loading"));
    let transport = UreqTransport::new();

    let mut app = App::new(PraxisClient::new(&ready));
    app.set_content(LESSON.to_string());
    app.generate_slides(&transport);
    let before = app.slides().deck().clone();
    assert_eq!(before.slides.len(), 2);

    let degraded = Redirect {
        inner: &transport,
        from: ready.clone(),
        to: loading,
    };
    app.generate_slides(&degraded);
    assert_eq!(app.slides().deck(), &before);
    assert!(app.slides().status().error().unwrap().contains("backend unavailable"));
    assert!(!app.slides().status().is_busy());
}
