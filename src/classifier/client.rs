use std::net::IpAddr;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::{debug, info, instrument, warn};

use super::error::ClassifyError;
use super::prompt::build_request;
use super::Classifier;
use crate::config::Settings;
use crate::models::ChatResponse;

/// Longest body excerpt kept on a status error
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Check if an endpoint points at this machine (localhost, 127.0.0.0/8, [::1])
fn is_local_endpoint(endpoint: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(endpoint) else {
        return true;
    };
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => true,
    }
}

fn body_excerpt(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_ERROR_BODY_CHARS {
        let cut: String = collapsed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{cut}…")
    } else if collapsed.is_empty() {
        "<empty body>".to_string()
    } else {
        collapsed
    }
}

/// Chat completion client for a local OpenAI-compatible server
pub struct OllamaClassifier {
    http: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OllamaClassifier {
    pub fn new(settings: &Settings) -> Result<Self, ClassifyError> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let http = Client::builder().timeout(timeout).build().map_err(ClassifyError::ClientSetup)?;

        if !is_local_endpoint(&settings.endpoint) {
            warn!(
                endpoint = %settings.endpoint,
                "Inference endpoint is not local; item descriptions will leave this machine"
            );
        }

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn transport_error(&self, source: reqwest::Error) -> ClassifyError {
        if source.is_timeout() {
            ClassifyError::Timeout { endpoint: self.endpoint.clone(), secs: self.timeout.as_secs() }
        } else {
            ClassifyError::Transport { endpoint: self.endpoint.clone(), source }
        }
    }
}

impl Classifier for OllamaClassifier {
    #[instrument(skip(self), fields(model = %self.model))]
    fn classify(&self, item: &str) -> Result<String, ClassifyError> {
        let request = build_request(&self.model, self.temperature, item);
        let started = Instant::now();
        debug!(endpoint = %self.endpoint, "Sending classification request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ClassifyError::Status { status: status.as_u16(), body: body_excerpt(&body) });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ClassifyError::MalformedResponse(format!("invalid JSON body: {e}")))?;
        let reply = parsed.into_reply_text().ok_or_else(|| {
            ClassifyError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            reply_len = reply.len(),
            "Classification reply received"
        );
        Ok(reply)
    }
}
