//! Corpus loading and chunking

use std::io;
use std::path::{Path, PathBuf};

/// Separators tried in order when looking for a place to end a chunk.
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

const TEXT_EXTENSIONS: [&str; 2] = ["txt", "md"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name the text came from, with `#page=N` for PDF pages
    pub source: String,
    pub text: String,
    /// Path of the corpus file
    pub origin: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub source: String,
    pub text: String,
}

enum CorpusFile {
    Text,
    Pdf,
}

fn classify(path: &Path) -> Option<CorpusFile> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        Some(CorpusFile::Text)
    } else if ext == "pdf" {
        Some(CorpusFile::Pdf)
    } else {
        None
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read every `.txt`, `.md` and `.pdf` file in `dir`, sorted by path.
///
/// Text files become one document each, PDFs one document per page.
/// A missing directory yields an empty corpus.
pub async fn load_documents(dir: &Path) -> io::Result<Vec<Document>> {
    if !dir.exists() {
        tracing::warn!("Corpus directory {} does not exist, starting empty", dir.display());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if classify(&path).is_some() {
            paths.push(path);
        } else {
            tracing::warn!("Skipping unsupported corpus file {}", path.display());
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::info!("Processing document: {}", path.display());
        match classify(&path) {
            Some(CorpusFile::Text) => {
                let text = tokio::fs::read_to_string(&path).await?;
                documents.push(Document {
                    source: file_name(&path),
                    text,
                    origin: path,
                });
            }
            Some(CorpusFile::Pdf) => documents.extend(load_pdf(path).await?),
            None => {}
        }
    }

    Ok(documents)
}

/// One document per non-blank page. An unreadable PDF is skipped.
async fn load_pdf(path: PathBuf) -> io::Result<Vec<Document>> {
    let bytes = tokio::fs::read(&path).await?;
    let parsed = tokio::task::spawn_blocking(move || {
        pdf_pages(&bytes).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let pages = match parsed {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!("Skipping unreadable PDF {}: {}", path.display(), e);
            return Ok(Vec::new());
        }
    };

    let name = file_name(&path);
    Ok(pages
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(page, text)| Document {
            source: format!("{}#page={}", name, page),
            text,
            origin: path.clone(),
        })
        .collect())
}

fn pdf_pages(bytes: &[u8]) -> Result<Vec<(u32, String)>, lopdf::Error> {
    let pdf = lopdf::Document::load_mem(bytes)?;
    let mut pages = Vec::new();
    for page in pdf.get_pages().into_keys() {
        pages.push((page, pdf.extract_text(&[page])?));
    }
    Ok(pages)
}

/// Splits text into windows of at most `chunk_size` characters, each
/// starting `chunk_overlap` characters before the previous one ended.
#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap,
        }
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let cut = if end == chars.len() {
                end
            } else {
                self.find_cut(&chars, start, end).unwrap_or(end)
            };

            let chunk: String = chars[start..cut].iter().collect();
            let chunk = chunk.trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }

            if cut == chars.len() {
                break;
            }
            let next = cut.saturating_sub(self.chunk_overlap).max(start + 1);
            start = Self::align_start(&chars, next, cut);
        }

        chunks
    }

    pub fn split_document(&self, document: &Document) -> Vec<Chunk> {
        self.split(&document.text)
            .into_iter()
            .map(|text| Chunk {
                source: document.source.clone(),
                text,
            })
            .collect()
    }

    /// Move an overlap start that falls inside a word up to the next word
    /// boundary before `cut`. Text with no boundary there keeps the raw
    /// character overlap.
    fn align_start(chars: &[char], start: usize, cut: usize) -> usize {
        if start == 0 || chars[start - 1].is_whitespace() {
            return start;
        }
        (start + 1..=cut)
            .find(|&i| chars[i - 1].is_whitespace())
            .unwrap_or(start)
    }

    /// Index just past the last separator in `chars[start..end]`, trying the
    /// coarsest separator first. Cuts inside the overlap region are skipped
    /// so every window advances.
    fn find_cut(&self, chars: &[char], start: usize, end: usize) -> Option<usize> {
        let lo = start + self.chunk_overlap + 1;
        for separator in SEPARATORS {
            let sep: Vec<char> = separator.chars().collect();
            if end < lo + sep.len() {
                continue;
            }
            let hi = end - sep.len();
            if let Some(i) = (lo..=hi).rev().find(|&i| chars[i..i + sep.len()] == sep[..]) {
                return Some(i + sep.len());
            }
        }
        None
    }
}
