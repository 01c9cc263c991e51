// 統合テスト用のユーティリティ
// ローカルで chat completions API を模倣する axum スタブサーバー

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri};
use axum::routing::post;
use axum::{Json, Router};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

/// スタブが受け取ったリクエスト
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

type Responder = dyn Fn(&serde_json::Value) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

pub struct StubCompletionServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    // サーバータスクはこのランタイムのワーカースレッドで動く
    _runtime: Runtime,
}

impl StubCompletionServer {
    /// リクエスト本文に応じてステータスと本文を返すスタブを起動
    pub fn start<F>(responder: F) -> Self
    where
        F: Fn(&serde_json::Value) -> (u16, String) + Send + Sync + 'static,
    {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("failed to build stub runtime");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            requests: Arc::clone(&requests),
            responder: Arc::new(responder),
        };
        let router = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state);

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("failed to bind stub server");
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());
        runtime.spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url,
            requests,
            _runtime: runtime,
        }
    }

    /// 常に同じ内容を返すスタブ
    pub fn returning(content: &'static str) -> Self {
        Self::start(move |_| (200, completion_body(content)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn chat_completions(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let (status, response_body) = (state.responder)(&body);

    state.requests.lock().unwrap().push(RecordedRequest {
        path: uri.path().to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    });

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let response_body = serde_json::from_str(&response_body)
        .unwrap_or(serde_json::Value::String(response_body));
    (status, Json(response_body))
}

/// chat completions の成功レスポンス本文
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-stub",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 20, "completion_tokens": 10, "total_tokens": 30}
    })
    .to_string()
}

/// OpenAI形式のエラーレスポンス本文
pub fn error_body(message: &str) -> String {
    serde_json::json!({"error": {"message": message, "type": "invalid_request_error"}}).to_string()
}

/// ユーザーメッセージの本文を取り出す
pub fn user_message(body: &serde_json::Value) -> &str {
    body["messages"][1]["content"].as_str().unwrap_or_default()
}

/// 環境変数や .env の影響を受けない状態でバイナリを実行
pub fn run_cli(working_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_generate_flashcards"))
        .current_dir(working_dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute binary")
}
