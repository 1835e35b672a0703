//! Claim verification pipeline
//!
//! Retrieval-augmented fact checking: the corpus of party policy documents is
//! chunked and indexed once at startup, and each claim is answered by the LLM
//! using only the best matching chunks as context.

pub mod corpus;
pub mod gemini;
pub mod index;
pub mod translate;

use crate::config::PipelineConfig;
use async_trait::async_trait;
use corpus::{Chunk, TextSplitter};
use gemini::GeminiClient;
use index::ChunkIndex;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use translate::Translator;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[async_trait]
pub trait ClaimPipeline: Send + Sync {
    /// Produce the verification text for one claim.
    async fn process_claim(&self, claim: &str) -> PipelineResult<String>;
}

pub fn fact_check_prompt(context: &str, claim: &str) -> String {
    format!(
        "You are a meticulous fact-checker. Your task is to verify the following claim based *only* on the provided context from translated political party policies.\n\
\n\
Analyze the context and determine if the claim is TRUE, FALSE, or UNVERIFIABLE.\n\
\n\
Provide a clear, one-word answer (TRUE, FALSE, or UNVERIFIABLE) followed by a brief, neutral explanation citing the relevant text from the context. Do not use any outside knowledge.\n\
\n\
CONTEXT:\n\
{}\n\
\n\
CLAIM:\n\
{}\n\
\n\
ANSWER:\n",
        context, claim
    )
}

pub fn translation_prompt(text: &str) -> String {
    format!(
        "Translate the following Norwegian text to English. Do not add any commentary, preamble, or notes. Output only the translated English text.\n\nNORWEGIAN TEXT:\n{}",
        text
    )
}

pub struct RagPipeline {
    llm: GeminiClient,
    index: ChunkIndex,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(llm: GeminiClient, index: ChunkIndex, top_k: usize) -> Self {
        Self { llm, index, top_k }
    }

    /// Load, optionally translate, chunk and index the corpus.
    pub async fn build(config: &PipelineConfig) -> PipelineResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("claim-verifier/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(120))
            .build()?;
        Self::build_with_client(client, config).await
    }

    pub async fn build_with_client(
        client: reqwest::Client,
        config: &PipelineConfig,
    ) -> PipelineResult<Self> {
        let llm = GeminiClient::new(
            client,
            &config.gemini_base_url,
            &config.model,
            config.api_key.clone(),
        );

        let mut documents = corpus::load_documents(&config.corpus_dir).await?;

        if config.translate_corpus {
            Translator::new(&llm, &config.corpus_dir, config.translate_segment_chars)
                .translate_all(&mut documents)
                .await?;
        }

        let splitter = TextSplitter::new(config.chunk_size, config.chunk_overlap);
        let chunks: Vec<Chunk> = documents
            .iter()
            .flat_map(|document| splitter.split_document(document))
            .collect();
        info!("Total document chunks created: {}", chunks.len());

        let index = ChunkIndex::new(chunks);
        if index.is_empty() {
            tracing::warn!("Corpus is empty, every claim will be answered without context");
        }

        Ok(Self::new(llm, index, config.top_k))
    }

    /// Context block for `claim`: the top-k chunks, best first, each
    /// prefixed with the document it came from.
    pub fn context_for(&self, claim: &str) -> String {
        self.index
            .retrieve(claim, self.top_k)
            .iter()
            .map(|chunk| format!("[{}]\n{}", chunk.source, chunk.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl ClaimPipeline for RagPipeline {
    async fn process_claim(&self, claim: &str) -> PipelineResult<String> {
        info!("Checking claim: '{}'", claim);

        let context = self.context_for(claim);
        if context.is_empty() {
            tracing::warn!("No corpus context matched the claim");
        }

        self.llm.generate(&fact_check_prompt(&context, claim)).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Gemini stand-in served on a loopback port.

    use super::gemini::GeminiClient;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    pub const MODEL: &str = "gemini-2.0-flash-001";

    pub type Seen = Arc<Mutex<Vec<Value>>>;

    /// Serve `router` and return its `/v1beta` base URL.
    pub async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1beta", addr)
    }

    pub fn http_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    pub fn client_for(base_url: &str) -> GeminiClient {
        GeminiClient::new(http_client(), base_url, MODEL, "test-key")
    }

    /// A complete single-candidate answer.
    pub fn answer(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    /// Stub that records every request body and answers `reply(prompt)`.
    pub fn recording_stub<F>(reply: F) -> (Router, Seen)
    where
        F: Fn(&str) -> String + Clone + Send + Sync + 'static,
    {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let recorded = seen.clone();
        let expected_call = format!("{}:generateContent", MODEL);

        let router = Router::new().route(
            "/v1beta/models/*call",
            post(
                move |Path(call): Path<String>, headers: HeaderMap, Json(body): Json<Value>| {
                    let recorded = recorded.clone();
                    let reply = reply.clone();
                    let expected_call = expected_call.clone();
                    async move {
                        if call != expected_call {
                            return Err(StatusCode::NOT_FOUND);
                        }
                        if headers.get("x-goog-api-key").map_or(true, |v| v != "test-key") {
                            return Err(StatusCode::UNAUTHORIZED);
                        }
                        let prompt = body["contents"][0]["parts"][0]["text"]
                            .as_str()
                            .unwrap_or_default()
                            .to_string();
                        recorded.lock().unwrap().push(body);
                        Ok(Json(answer(&reply(&prompt))))
                    }
                },
            ),
        );

        (router, seen)
    }
}
