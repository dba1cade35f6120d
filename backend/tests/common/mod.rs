//! In-process fakes for the gateway's upstream services

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use krishimitra_backend::{
    config::Config,
    create_app,
    error::{AppError, AppResult},
    external::{
        ChatMessage, CompletionClient, MandiPriceSource, MandiUpstreamQuery, RawMandiRecord,
        TextExtractor, WeatherProvider,
    },
    AppState,
};
use serde_json::{json, Value};
use shared::GpsCoordinates;
use tower::ServiceExt;

pub const BOUNDARY: &str = "krishimitra-test-boundary";

/// OpenWeatherMap current-weather payload
pub fn current_weather(city: &str, temp: f64, humidity: i32, wind_mps: f64, main: &str) -> Value {
    json!({
        "name": city,
        "main": {
            "temp": temp,
            "feels_like": temp + 1.0,
            "temp_min": temp - 2.0,
            "temp_max": temp + 2.0,
            "humidity": humidity
        },
        "wind": { "speed": wind_mps },
        "weather": [{ "main": main, "description": format!("{} today", main.to_lowercase()) }]
    })
}

/// Two days of 3-hourly forecast slots in UTC
pub fn forecast_payload(city: &str) -> Value {
    // 2024-06-01T00:00:00Z
    let start = 1_717_200_000;
    let list: Vec<Value> = (0..16)
        .map(|i| {
            json!({
                "dt": start + i * 3 * 3600,
                "main": {
                    "temp": 30.0,
                    "feels_like": 31.0,
                    "temp_min": 25.0 + i as f64 * 0.1,
                    "temp_max": 33.0 + i as f64 * 0.1,
                    "humidity": 60
                },
                "weather": [{ "main": "Clear", "description": "clear sky" }],
                "pop": 0.1
            })
        })
        .collect();
    json!({ "city": { "name": city, "timezone": 0 }, "list": list })
}

#[derive(Default)]
pub struct FakeWeather {
    pub current: Option<Value>,
    pub forecast: Option<Value>,
    pub unconfigured: bool,
    pub calls: AtomicUsize,
    pub cities: Mutex<Vec<String>>,
}

impl FakeWeather {
    pub fn returning(current: Value) -> Self {
        Self {
            current: Some(current),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, payload: &Option<Value>) -> AppResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        payload
            .clone()
            .ok_or_else(|| AppError::upstream("Weather API", "503 Service Unavailable"))
    }
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    fn ensure_configured(&self) -> AppResult<()> {
        if self.unconfigured {
            return Err(AppError::Configuration("WEATHER_API_KEY missing".to_string()));
        }
        Ok(())
    }

    async fn current_by_city(&self, city: &str) -> AppResult<Value> {
        self.cities.lock().unwrap().push(city.to_string());
        self.answer(&self.current)
    }

    async fn current_by_coordinates(&self, _coordinates: GpsCoordinates) -> AppResult<Value> {
        self.answer(&self.current)
    }

    async fn forecast_by_city(&self, city: &str) -> AppResult<Value> {
        self.cities.lock().unwrap().push(city.to_string());
        self.answer(&self.forecast)
    }
}

#[derive(Default)]
pub struct FakeMandi {
    pub records: Vec<RawMandiRecord>,
    pub failing: bool,
    pub calls: AtomicUsize,
    pub last_query: Mutex<Option<MandiUpstreamQuery>>,
}

impl FakeMandi {
    pub fn with_records(records: Vec<RawMandiRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<MandiUpstreamQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl MandiPriceSource for FakeMandi {
    async fn fetch_records(&self, query: &MandiUpstreamQuery) -> AppResult<Vec<RawMandiRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        if self.failing {
            return Err(AppError::upstream(
                "Mandi price API",
                "502 Bad Gateway - api-key=secret-mandi-key",
            ));
        }
        Ok(self.records.clone())
    }
}

pub struct FakeOcr {
    pub text: Option<String>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Option<(PathBuf, Vec<u8>)>>,
}

impl FakeOcr {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Path and contents of the file the extractor was handed
    pub fn seen(&self) -> Option<(PathBuf, Vec<u8>)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextExtractor for FakeOcr {
    async fn extract_text(&self, path: &Path) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let bytes = std::fs::read(path).unwrap_or_default();
        *self.seen.lock().unwrap() = Some((path.to_path_buf(), bytes));
        self.text
            .clone()
            .ok_or_else(|| AppError::Processing("OCR failed".to_string()))
    }
}

#[derive(Default)]
pub struct FakeLlm {
    pub reply: String,
    pub unconfigured: bool,
    pub failing: bool,
    pub calls: AtomicUsize,
    pub messages: Mutex<Vec<ChatMessage>>,
}

impl FakeLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FakeLlm {
    fn ensure_configured(&self) -> AppResult<()> {
        if self.unconfigured {
            return Err(AppError::Configuration("OPENAI_API_KEY missing".to_string()));
        }
        Ok(())
    }

    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.messages.lock().unwrap() = messages.to_vec();
        if self.failing {
            return Err(AppError::upstream(
                "Completion API",
                "API returned 429 Too Many Requests: quota exceeded",
            ));
        }
        Ok(self.reply.clone())
    }
}

/// Fakes wired into one app; keep the handles to inspect calls
pub struct Harness {
    pub weather: Arc<FakeWeather>,
    pub mandi: Arc<FakeMandi>,
    pub ocr: Arc<FakeOcr>,
    pub llm: Arc<FakeLlm>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: Option<usize>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            weather: Arc::new(FakeWeather::returning(current_weather(
                "Cuttack", 31.0, 70, 3.0, "Clouds",
            ))),
            mandi: Arc::new(FakeMandi::default()),
            ocr: Arc::new(FakeOcr::returning("pH 6.4\nNitrogen 240 kg/ha")),
            llm: Arc::new(FakeLlm::replying("1. Rice\n2. Maize\n3. Green gram")),
            upload_dir: std::env::temp_dir()
                .join("krishimitra-tests")
                .join(uuid::Uuid::new_v4().to_string()),
            max_upload_bytes: None,
        }
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = Some(bytes);
        self
    }

    pub fn with_weather(mut self, weather: FakeWeather) -> Self {
        self.weather = Arc::new(weather);
        self
    }

    pub fn with_mandi(mut self, mandi: FakeMandi) -> Self {
        self.mandi = Arc::new(mandi);
        self
    }

    pub fn with_ocr(mut self, ocr: FakeOcr) -> Self {
        self.ocr = Arc::new(ocr);
        self
    }

    pub fn with_llm(mut self, llm: FakeLlm) -> Self {
        self.llm = Arc::new(llm);
        self
    }

    pub fn app(&self) -> Router {
        let mut config = Config::for_tests();
        config.ocr.upload_dir = self.upload_dir.to_string_lossy().into_owned();
        if let Some(bytes) = self.max_upload_bytes {
            config.ocr.max_upload_bytes = bytes;
        }

        create_app(AppState {
            config: Arc::new(config),
            weather: self.weather.clone(),
            mandi: self.mandi.clone(),
            ocr: self.ocr.clone(),
            llm: self.llm.clone(),
        })
    }

    /// Number of files left behind in the upload directory
    pub fn leftover_uploads(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, String::from_utf8(body).unwrap())
}

pub async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

/// POST a single file part named `field`
pub async fn post_file(app: Router, uri: &str, field: &str, bytes: &[u8]) -> (StatusCode, Value) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"report.png\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}
