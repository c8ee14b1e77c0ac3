#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use order_extract_client::{
    AppResult, Config, DownloadSink, HttpTransport, OrderWorkflow, RemoteGateway,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Semaphore};

/// 模拟服务端的固定响应
#[derive(Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl MockReply {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: br#"{"detail": "Internal Server Error"}"#.to_vec(),
        }
    }

    pub fn raw(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.to_vec(),
        }
    }

    pub fn spreadsheet(bytes: &[u8]) -> Self {
        Self::raw(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            bytes,
        )
    }
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedUpload {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// 模拟服务端的状态，测试中用于断言
#[derive(Clone)]
pub struct MockState {
    pub text_hits: Arc<AtomicUsize>,
    pub image_hits: Arc<AtomicUsize>,
    pub export_hits: Arc<AtomicUsize>,
    pub last_text_body: Arc<Mutex<Option<Value>>>,
    pub last_upload: Arc<Mutex<Option<ReceivedUpload>>>,
    text_reply: MockReply,
    image_reply: MockReply,
    export_reply: MockReply,
    gated: bool,
    gate: Arc<Semaphore>,
}

impl MockState {
    /// 放行一个被挂起的请求
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn text_hits(&self) -> usize {
        self.text_hits.load(Ordering::SeqCst)
    }

    pub fn image_hits(&self) -> usize {
        self.image_hits.load(Ordering::SeqCst)
    }

    pub fn export_hits(&self) -> usize {
        self.export_hits.load(Ordering::SeqCst)
    }

    async fn wait_gate(&self) {
        if self.gated {
            if let Ok(permit) = self.gate.acquire().await {
                permit.forget();
            }
        }
    }
}

pub struct MockServer {
    text_reply: MockReply,
    image_reply: MockReply,
    export_reply: MockReply,
    gated: bool,
}

impl MockServer {
    pub fn new() -> Self {
        Self {
            text_reply: MockReply::json(serde_json::json!({"data": []})),
            image_reply: MockReply::json(serde_json::json!({"data": []})),
            export_reply: MockReply::spreadsheet(b"PK\x03\x04xlsx"),
            gated: false,
        }
    }

    pub fn text(mut self, reply: MockReply) -> Self {
        self.text_reply = reply;
        self
    }

    pub fn image(mut self, reply: MockReply) -> Self {
        self.image_reply = reply;
        self
    }

    pub fn export(mut self, reply: MockReply) -> Self {
        self.export_reply = reply;
        self
    }

    /// 每个请求都挂起，直到测试调用 `MockState::release`
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub async fn spawn(self) -> (String, MockState) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");

        let state = MockState {
            text_hits: Arc::new(AtomicUsize::new(0)),
            image_hits: Arc::new(AtomicUsize::new(0)),
            export_hits: Arc::new(AtomicUsize::new(0)),
            last_text_body: Arc::new(Mutex::new(None)),
            last_upload: Arc::new(Mutex::new(None)),
            text_reply: self.text_reply,
            image_reply: self.image_reply,
            export_reply: self.export_reply,
            gated: self.gated,
            gate: Arc::new(Semaphore::new(0)),
        };

        let app = Router::new()
            .route("/extract_from_text", post(handle_text))
            .route("/extract_from_image", post(handle_image))
            .route("/download_excel", get(handle_export))
            .with_state(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        (format!("http://{addr}"), state)
    }
}

async fn handle_text(State(state): State<MockState>, Json(body): Json<Value>) -> MockReply {
    state.text_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_text_body.lock().await = Some(body);
    state.wait_gate().await;
    state.text_reply.clone()
}

async fn handle_image(State(state): State<MockState>, mut multipart: Multipart) -> MockReply {
    state.image_hits.fetch_add(1, Ordering::SeqCst);
    while let Ok(Some(field)) = multipart.next_field().await {
        let upload = ReceivedUpload {
            field: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().unwrap_or_default().to_string(),
            content_type: field.content_type().unwrap_or_default().to_string(),
            bytes: field.bytes().await.map(|b| b.to_vec()).unwrap_or_default(),
        };
        *state.last_upload.lock().await = Some(upload);
    }
    state.wait_gate().await;
    state.image_reply.clone()
}

async fn handle_export(State(state): State<MockState>) -> MockReply {
    state.export_hits.fetch_add(1, Ordering::SeqCst);
    state.wait_gate().await;
    state.export_reply.clone()
}

/// 一个已经关闭的端口，用于模拟网络错误
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind closed port");
    let addr = listener.local_addr().expect("closed port addr");
    drop(listener);
    format!("http://{addr}")
}

/// 返回 500 且正文在中途断开的服务
pub async fn truncated_failure_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind truncated server");
    let addr = listener.local_addr().expect("truncated server addr");
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\n\
                      content-type: application/json\r\n\
                      content-length: 1000\r\n\r\n{\"detail\": \"boom",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}")
}

pub fn config_for(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        ..Config::default()
    }
}

pub fn gateway_for(base_url: &str) -> RemoteGateway {
    RemoteGateway::new(HttpTransport::new(&config_for(base_url)))
}

/// 记录保存动作的下载目标
#[derive(Default)]
pub struct RecordingSink {
    pub saves: std::sync::Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saves.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DownloadSink for RecordingSink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        if let Ok(mut saves) = self.saves.lock() {
            saves.push((file_name.to_string(), bytes.to_vec()));
        }
        Ok(PathBuf::from(file_name))
    }
}

pub fn workflow_for(base_url: &str) -> (OrderWorkflow, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let workflow = OrderWorkflow::new(Arc::new(gateway_for(base_url)), sink.clone());
    (workflow, sink)
}

/// 等待条件成立（最多约 2 秒）
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}
