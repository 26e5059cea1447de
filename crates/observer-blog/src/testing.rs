//! Test doubles: an in-process WordPress stand-in and in-memory fakes.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use observer_data::{
    ClimateData, ClimateMeasurementBoundaries, OperatingEvent, Period, Reading, Sensor,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::client::RemoteResourceClient;
use crate::error::BlogError;
use crate::generator::{
    ChartGenerator, ClimateAlertContext, ContentGenerator, DetailsContext, GenerateError,
    HistoryContext,
};
use crate::media_reference::media_reference;
use crate::types::{DocumentRef, Image};

/// Request as seen by [`MockServer`].
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    /// Path including the query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }
}

/// Canned response replayed by [`MockServer`].
#[derive(Debug, Clone)]
pub(crate) struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl MockResponse {
    pub(crate) fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub(crate) fn json(body: &str) -> Self {
        Self::status(200)
            .with_header("Content-Type", "application/json; charset=UTF-8")
            .with_body(body)
    }

    pub(crate) fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub(crate) fn with_body(mut self, body: &str) -> Self {
        body.clone_into(&mut self.body);
        self
    }
}

#[derive(Default)]
struct Recorder {
    queue: VecDeque<MockResponse>,
    requests: Vec<RecordedRequest>,
}

/// HTTP server on a random local port that records every request and
/// answers with queued responses in order (500 once the queue is empty).
pub(crate) struct MockServer {
    addr: SocketAddr,
    recorder: Arc<Mutex<Recorder>>,
    task: JoinHandle<()>,
}

impl MockServer {
    pub(crate) async fn start() -> Self {
        let recorder = Arc::new(Mutex::new(Recorder::default()));
        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(Arc::clone(&recorder));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            recorder,
            task,
        }
    }

    /// Base URL of a port nothing listens on.
    pub(crate) async fn unused_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    pub(crate) fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) fn enqueue(&self, response: MockResponse) {
        self.recorder.lock().unwrap().queue.push_back(response);
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.recorder.lock().unwrap().requests.clone()
    }

    /// Requests as `METHOD /path?query` lines.
    pub(crate) fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn record_and_reply(
    State(recorder): State<Arc<Mutex<Recorder>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let queued = {
        let mut recorder = recorder.lock().unwrap();
        recorder.requests.push(RecordedRequest {
            method: method.to_string(),
            path: uri
                .path_and_query()
                .map_or_else(|| uri.path().to_owned(), |pq| pq.as_str().to_owned()),
            headers: headers
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_owned(),
                        value.to_str().unwrap_or_default().to_owned(),
                    )
                })
                .collect(),
            body: body.to_vec(),
        });
        recorder.queue.pop_front()
    };

    let reply = queued.unwrap_or_else(|| MockResponse::status(500).with_body("no response queued"));
    let mut builder = axum::http::Response::builder().status(reply.status);
    for (name, value) in &reply.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(Body::from(reply.body)).unwrap()
}

/// Remote operation kinds, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    ReadDocument,
    WriteDocument,
    CreateMedia,
    ReadMedia,
    DeleteMedia,
}

/// Remote call as recorded by [`RecordingClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ReadDocument(String),
    WriteDocument(String, String),
    CreateMedia(String),
    ReadMedia(String),
    DeleteMedia(String),
}

impl Call {
    fn operation(&self) -> Operation {
        match self {
            Self::ReadDocument(_) => Operation::ReadDocument,
            Self::WriteDocument(..) => Operation::WriteDocument,
            Self::CreateMedia(_) => Operation::CreateMedia,
            Self::ReadMedia(_) => Operation::ReadMedia,
            Self::DeleteMedia(_) => Operation::DeleteMedia,
        }
    }
}

#[derive(Default)]
struct ClientState {
    calls: Vec<Call>,
    documents: HashMap<String, String>,
    media: HashMap<String, String>,
    next_media_id: u64,
    /// (operation, n): the n-th call of that operation fails.
    failures: Vec<(Operation, usize)>,
}

/// In-memory remote that records every call.
pub(crate) struct RecordingClient {
    state: Mutex<ClientState>,
}

impl RecordingClient {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(ClientState {
                next_media_id: 1000,
                ..ClientState::default()
            }),
        }
    }

    pub(crate) fn with_document(self, document: &DocumentRef, body: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .documents
            .insert(document.path(), body.to_owned());
        self
    }

    /// Make the `nth` (1-based) call of `operation` fail.
    pub(crate) fn failing(self, operation: Operation, nth: usize) -> Self {
        self.state.lock().unwrap().failures.push((operation, nth));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn document(&self, document: &DocumentRef) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .documents
            .get(&document.path())
            .cloned()
    }

    /// Record `call`, failing it if it was configured to.
    fn record(state: &mut ClientState, call: Call) -> Result<(), BlogError> {
        let operation = call.operation();
        state.calls.push(call);
        let nth = state
            .calls
            .iter()
            .filter(|c| c.operation() == operation)
            .count();
        if state.failures.contains(&(operation, nth)) {
            return Err(BlogError::Remote {
                status: 500,
                message: format!("injected {operation:?} failure"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteResourceClient for RecordingClient {
    async fn read_document(&self, document: &DocumentRef) -> Result<String, BlogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::ReadDocument(document.path()))?;
        state
            .documents
            .get(&document.path())
            .cloned()
            .ok_or_else(|| BlogError::NotFound {
                resource: document.path(),
            })
    }

    async fn write_document(&self, document: &DocumentRef, body: &str) -> Result<(), BlogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(
            &mut state,
            Call::WriteDocument(document.path(), body.to_owned()),
        )?;
        state.documents.insert(document.path(), body.to_owned());
        Ok(())
    }

    async fn create_media(&self, filename: &str, _data: &[u8]) -> Result<String, BlogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::CreateMedia(filename.to_owned()))?;
        let id = state.next_media_id.to_string();
        state.next_media_id += 1;
        state.media.insert(id.clone(), filename.to_owned());
        Ok(id)
    }

    async fn read_media(&self, id: &str) -> Result<Image, BlogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::ReadMedia(id.to_owned()))?;
        let filename = state.media.get(id).ok_or_else(|| BlogError::NotFound {
            resource: format!("media/{id}"),
        })?;
        Ok(Image {
            id: id.to_owned(),
            full: format!("https://blog.example.com/wp-content/uploads/{filename}"),
            thumbnail: None,
        })
    }

    async fn delete_media(&self, id: &str) -> Result<(), BlogError> {
        let mut state = self.state.lock().unwrap();
        Self::record(&mut state, Call::DeleteMedia(id.to_owned()))?;
        state.media.remove(id);
        Ok(())
    }
}

/// Content generator emitting small fragments that embed media references.
#[derive(Default)]
pub(crate) struct FakeContent {
    calls: Mutex<Vec<&'static str>>,
    no_climate_alert: bool,
    failing: bool,
}

impl FakeContent {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn without_climate_alert(mut self) -> Self {
        self.no_climate_alert = true;
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &'static str) -> Result<(), GenerateError> {
        self.calls.lock().unwrap().push(name);
        if self.failing {
            return Err(GenerateError::new(format!("{name} template failed")));
        }
        Ok(())
    }
}

fn embed(image: &Image) -> String {
    format!(
        r#"<img src="{}" data-media="{}" />"#,
        image.full,
        media_reference(&image.id)
    )
}

#[async_trait]
impl ContentGenerator for FakeContent {
    async fn generate_overview(&self, reading: &Reading) -> Result<String, GenerateError> {
        self.record("overview")?;
        Ok(format!("<p>{} Messwerte</p>", reading.measurements.len()))
    }

    async fn generate_details(&self, context: DetailsContext<'_>) -> Result<String, GenerateError> {
        self.record("details")?;
        Ok(format!(
            "<h3>{} Sensoren</h3>{}",
            context.data.len(),
            embed(context.diagram)
        ))
    }

    async fn generate_history(&self, context: HistoryContext<'_>) -> Result<String, GenerateError> {
        self.record("history")?;
        // Only sensors with boundaries get a section.
        Ok(context
            .data
            .iter()
            .filter(|(_, boundaries)| !boundaries.is_empty())
            .filter_map(|(sensor, _)| {
                let diagrams = context.diagrams.get(sensor)?;
                Some(format!(
                    "<h3>{}</h3>{}{}",
                    sensor.name,
                    embed(&diagrams.temperature),
                    embed(&diagrams.humidity)
                ))
            })
            .collect())
    }

    async fn generate_climate_alert(
        &self,
        context: ClimateAlertContext<'_>,
    ) -> Result<Option<String>, GenerateError> {
        self.record("climate_alert")?;
        if self.no_climate_alert {
            return Ok(None);
        }
        Ok(Some(format!("<p>Alarm für {} Sensoren</p>", context.data.len())))
    }

    async fn generate_operating_alert(
        &self,
        events: &[OperatingEvent],
    ) -> Result<String, GenerateError> {
        self.record("operating_alert")?;
        Ok(format!("<p>{} Ereignisse</p>", events.len()))
    }
}

/// Chart generator returning fixed bytes.
#[derive(Default)]
pub(crate) struct FakeCharts {
    calls: Mutex<Vec<String>>,
    /// (kind, sgtin) pair that fails, e.g. `("humidity", "s-2")`.
    failing: Option<(&'static str, String)>,
}

impl FakeCharts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_for(mut self, kind: &'static str, sgtin: &str) -> Self {
        self.failing = Some((kind, sgtin.to_owned()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn chart(&self, kind: &'static str, sgtin: &str) -> Result<Vec<u8>, GenerateError> {
        self.calls.lock().unwrap().push(format!("{kind}:{sgtin}"));
        if self
            .failing
            .as_ref()
            .is_some_and(|(k, s)| *k == kind && s == sgtin)
        {
            return Err(GenerateError::new(format!("{kind} chart failed")));
        }
        Ok(b"\x89PNG\r\n".to_vec())
    }
}

#[async_trait]
impl ChartGenerator for FakeCharts {
    async fn create_24_hour_chart(
        &self,
        _period: Period,
        _data: &ClimateData,
    ) -> Result<Vec<u8>, GenerateError> {
        self.chart("24h", "all")
    }

    async fn create_365_day_temperature_chart(
        &self,
        _period: Period,
        _data: &[ClimateMeasurementBoundaries],
        sensor: &Sensor,
    ) -> Result<Vec<u8>, GenerateError> {
        self.chart("temperature", &sensor.sgtin)
    }

    async fn create_365_day_humidity_chart(
        &self,
        _period: Period,
        _data: &[ClimateMeasurementBoundaries],
        sensor: &Sensor,
    ) -> Result<Vec<u8>, GenerateError> {
        self.chart("humidity", &sensor.sgtin)
    }
}
