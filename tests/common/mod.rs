//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;
use waste_sorter::{Classifier, ClassifyError};

/// Canonical six-line reply
pub const CANONICAL_REPLY: &str = "Category: Wet Waste\nBin: Green\nRecyclable: Yes\nInstruction: Compost it\nTip: Use a compost bin\nConfidence: High";

/// Builder for model reply text
pub struct ReplyBuilder {
    lines: Vec<(String, String)>,
    preamble: Option<String>,
}

impl ReplyBuilder {
    /// Start from the canonical wet-waste reply
    pub fn new() -> Self {
        let lines = [
            ("Category", "Wet Waste"),
            ("Bin", "Green"),
            ("Recyclable", "Yes"),
            ("Instruction", "Compost it"),
            ("Tip", "Use a compost bin"),
            ("Confidence", "High"),
        ]
        .map(|(label, value)| (label.to_string(), value.to_string()));
        Self { lines: lines.to_vec(), preamble: None }
    }

    /// Replace a label's value
    pub fn with(mut self, label: &str, value: &str) -> Self {
        for line in &mut self.lines {
            if line.0 == label {
                line.1 = value.to_string();
            }
        }
        self
    }

    /// Drop a label entirely
    pub fn without(mut self, label: &str) -> Self {
        self.lines.retain(|(l, _)| l != label);
        self
    }

    /// Prepend free-form commentary
    pub fn preamble(mut self, text: &str) -> Self {
        self.preamble = Some(text.to_string());
        self
    }

    pub fn build(&self) -> String {
        let body = self.lines.iter().map(|(l, v)| format!("{l}: {v}")).collect::<Vec<_>>().join("\n");
        match &self.preamble {
            Some(p) => format!("{p}\n{body}"),
            None => body,
        }
    }
}

impl Default for ReplyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifier that answers from a script and records every item it was asked about
pub struct ScriptedClassifier {
    replies: RefCell<VecDeque<Result<String, ClassifyError>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new(replies: Vec<Result<String, ClassifyError>>) -> Self {
        Self { replies: RefCell::new(replies.into()), calls: RefCell::new(Vec::new()) }
    }

    /// Answers every call with the canonical reply
    pub fn always_ok() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&self, item: &str) -> Result<String, ClassifyError> {
        self.calls.borrow_mut().push(item.to_string());
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| Ok(CANONICAL_REPLY.to_string()))
    }
}

/// Status error as an unavailable service would produce it
pub fn service_unavailable() -> ClassifyError {
    ClassifyError::Status { status: 503, body: "model is loading".to_string() }
}

/// One scripted answer of the mock inference server
#[derive(Clone)]
pub enum MockResponse {
    /// Raw status and body
    Raw { status: u16, body: String },
    /// Accept the connection and never answer
    Hang,
}

impl MockResponse {
    /// A successful chat completion carrying `content`
    pub fn reply(content: &str) -> Self {
        let body = serde_json::json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "granite4",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        });
        MockResponse::Raw { status: 200, body: body.to_string() }
    }

    pub fn status(status: u16, body: &str) -> Self {
        MockResponse::Raw { status, body: body.to_string() }
    }
}

/// Minimal HTTP/1.1 server on 127.0.0.1 that plays back scripted responses,
/// one per connection, and captures the request bodies
pub struct MockServer {
    url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    pub fn start(responses: Vec<MockResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock server");
        let port = listener.local_addr().expect("Failed to read mock server address").port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);

        thread::spawn(move || {
            for response in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                serve(stream, response, &captured);
            }
        });

        Self { url: format!("http://127.0.0.1:{port}/v1/chat/completions"), requests }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request bodies received so far, parsed as JSON
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|body| serde_json::from_str(body).expect("Request body was not JSON"))
            .collect()
    }
}

fn serve(stream: TcpStream, response: MockResponse, captured: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0usize;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    captured.lock().unwrap().push(String::from_utf8_lossy(&body).into_owned());

    let mut stream = reader.into_inner();
    match response {
        MockResponse::Raw { status, body } => {
            let head = format!(
                "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body.as_bytes());
            let _ = stream.flush();
        }
        MockResponse::Hang => thread::sleep(Duration::from_secs(5)),
    }
}

/// An endpoint URL where nothing is listening
pub fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe socket");
    let port = listener.local_addr().expect("Failed to read probe address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/v1/chat/completions")
}

/// Temporary directory with an empty settings file, so tests never read the user's config
pub struct TestConfig {
    temp_dir: TempDir,
}

impl TestConfig {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("config.toml"), "").expect("Failed to write config.toml");
        Self { temp_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new()
    }
}
