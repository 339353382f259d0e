//! Corpus loading: one transcript file per thread, one folder per condition
//!
//! Layout: `<data_dir>/transcripts/{control,contaminated}/*.txt`, each folder
//! read in file-name order, control first.

use std::path::{Path, PathBuf};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use crate::{CONTAMINATED_DIR, CONTROL_DIR, TRANSCRIPTS_DIR, TRANSCRIPT_EXTENSION};
use crate::core::Segmenter;
use crate::types::{Conversation, CorpusError, SourceEntry};

/// Loaded conversations plus where each one came from
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub conversations: Vec<Conversation>,
    pub sources: Vec<SourceEntry>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

/// Segment in-memory text; the thread id is the source identifier as given
pub fn parse_transcript(thread_id: &str, text: &str) -> Conversation {
    Segmenter::new().segment_conversation(thread_id, text)
}

/// Read and segment one file, thread id = file stem
pub fn parse_transcript_file(path: &Path) -> Result<Conversation, CorpusError> {
    let (conversation, _) = load_file(path)?;
    Ok(conversation)
}

fn load_file(path: &Path) -> Result<(Conversation, SourceEntry), CorpusError> {
    let bytes = std::fs::read(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| CorpusError::Read {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e.utf8_error()),
    })?;

    let thread_id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let conversation = parse_transcript(&thread_id, &text);

    debug!(
        thread_id = %conversation.thread_id,
        condition = %conversation.condition,
        turns = conversation.len(),
        "segmented transcript"
    );

    let entry = SourceEntry {
        thread_id,
        path: path.display().to_string(),
        sha256: sha256_hex(text.as_bytes()),
        turn_count: conversation.len(),
    };
    Ok((conversation, entry))
}

/// Transcript files of one folder, sorted by file name
fn transcript_files(dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CorpusError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CorpusError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_transcript = path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(TRANSCRIPT_EXTENSION);
        if is_transcript {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Load every transcript under the data dir
///
/// A missing condition folder is skipped; an unreadable file is fatal.
pub fn load_corpus(data_dir: &Path) -> Result<Corpus, CorpusError> {
    let mut corpus = Corpus::default();
    let root = data_dir.join(TRANSCRIPTS_DIR);

    for condition_dir in [CONTROL_DIR, CONTAMINATED_DIR] {
        let dir = root.join(condition_dir);
        if !dir.is_dir() {
            warn!(path = %dir.display(), "condition directory missing, skipping");
            continue;
        }

        for path in transcript_files(&dir)? {
            let (conversation, entry) = load_file(&path)?;
            corpus.conversations.push(conversation);
            corpus.sources.push(entry);
        }
    }

    info!(conversations = corpus.len(), "corpus loaded");
    Ok(corpus)
}

fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

// =============================================================================
// TESTS
// =============================================================================
