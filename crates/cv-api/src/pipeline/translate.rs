//! Corpus translation with an on-disk cache
//!
//! Documents are translated in bounded segments and the result is written to
//! `<corpus_dir>/.translated/`, so a restart only pays for files that changed.

use super::corpus::{Document, TextSplitter};
use super::gemini::GeminiClient;
use super::{translation_prompt, PipelineResult};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{info, warn};

pub const CACHE_DIR: &str = ".translated";

pub struct Translator<'a> {
    llm: &'a GeminiClient,
    splitter: TextSplitter,
    cache_dir: PathBuf,
}

impl<'a> Translator<'a> {
    pub fn new(llm: &'a GeminiClient, corpus_dir: &Path, segment_chars: usize) -> Self {
        Self {
            llm,
            splitter: TextSplitter::new(segment_chars, 0),
            cache_dir: corpus_dir.join(CACHE_DIR),
        }
    }

    pub fn cache_path(&self, document: &Document) -> PathBuf {
        let name: String = document
            .source
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.cache_dir.join(format!("{}.txt", name))
    }

    /// Replace every document's text with its English translation.
    pub async fn translate_all(&self, documents: &mut [Document]) -> PipelineResult<()> {
        let total = documents.len();
        info!("Translating {} documents", total);

        for (i, document) in documents.iter_mut().enumerate() {
            let cache = self.cache_path(document);

            if is_fresh(&cache, &document.origin).await {
                match tokio::fs::read_to_string(&cache).await {
                    Ok(text) => {
                        document.text = text;
                        info!("  - Reused translation of {} ({}/{})", document.source, i + 1, total);
                        continue;
                    }
                    Err(e) => warn!("Ignoring unreadable cache {}: {}", cache.display(), e),
                }
            }

            document.text = self.translate(&document.text).await?;
            info!("  - Translated {} ({}/{})", document.source, i + 1, total);

            if let Err(e) = self.store(&cache, &document.text).await {
                warn!("Could not cache translation at {}: {}", cache.display(), e);
            }
        }

        Ok(())
    }

    /// Translate `text` one segment at a time and rejoin the pieces.
    pub async fn translate(&self, text: &str) -> PipelineResult<String> {
        let mut translated = Vec::new();
        for segment in self.splitter.split(text) {
            translated.push(self.llm.generate(&translation_prompt(&segment)).await?);
        }
        Ok(translated.join("\n\n"))
    }

    async fn store(&self, cache: &Path, text: &str) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        tokio::fs::write(cache, text).await
    }
}

async fn modified(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.ok()?.modified().ok()
}

/// A cached translation counts when it is at least as new as its source.
async fn is_fresh(cache: &Path, origin: &Path) -> bool {
    match (modified(cache).await, modified(origin).await) {
        (Some(cached), Some(source)) => cached >= source,
        _ => false,
    }
}
