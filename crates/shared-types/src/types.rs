/// Chunking statistics reported by the backend for one ingested document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentStats {
    pub num_chunks: u32,
    pub total_words: u64,
    pub total_characters: u64,
    pub avg_chunk_size: f64,
}

/// One ingested document as listed by `GET /documents`.
///
/// `id` is the stable key used for deletion; everything else is display data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub filename: String,
    pub num_pages: u32,
    pub stats: DocumentStats,
}

/// Success body of `POST /upload`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub documents: Vec<DocumentSummary>,
}

/// Success body of `POST /search`.
///
/// `context` is ordered by relevance rank; the client must preserve that
/// order when rendering. `answer` is an HTML fragment (the backend converts
/// Markdown before responding).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
    pub answer: String,
    pub context: Vec<String>,
}

/// Success body of `POST /suggestions`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// Error body convention used by the backend on non-2xx responses.
///
/// Not every failure carries one; both the field and the body itself are
/// optional as far as the client is concerned.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
