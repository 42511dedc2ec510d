use std::sync::Arc;

use anyhow::Context;
use glossa_types::{CaptureRegion, CapturedImage, MatchResult, OcrToken, Point, ScreenPoint};

use crate::corpus::Corpus;
use crate::index::SimilarityIndex;
use crate::preprocess::normalize;
use crate::select::nearest_token;

/// Grabs a rectangle of the screen
pub trait ScreenCapture: Send + Sync {
    fn capture(&self, region: CaptureRegion) -> anyhow::Result<CapturedImage>;
}

/// Finds positioned text lines in a captured image
///
/// Token coordinates are local to `image`.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &CapturedImage) -> anyhow::Result<Vec<OcrToken>>;
}

/// Anything that turns a cursor position into a corpus match
pub trait CaptureMatcher: Send + Sync {
    /// Collaborator failures come back as errors
    fn try_run(&self, cursor: ScreenPoint) -> anyhow::Result<Option<MatchResult>>;

    /// Errors stop at this boundary: they are logged and read as "no match"
    fn run(&self, cursor: ScreenPoint) -> Option<MatchResult> {
        match self.try_run(cursor) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(">>> [CAPTURE] Failed: {:#}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub capture_width: u32,
    pub capture_height: u32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            capture_width: 2000,
            capture_height: 100,
        }
    }
}

/// Capture -> OCR -> nearest token -> normalize -> similarity lookup
pub struct CaptureMatchPipeline<C, R> {
    capture: C,
    recognizer: R,
    corpus: Arc<Corpus>,
    index: SimilarityIndex,
    settings: PipelineSettings,
}

impl<C: ScreenCapture, R: TextRecognizer> CaptureMatchPipeline<C, R> {
    /// Indexes the corpus' source side
    pub fn new(capture: C, recognizer: R, corpus: Arc<Corpus>, settings: PipelineSettings) -> Self {
        let index = SimilarityIndex::build(corpus.source_sentences());
        Self {
            capture,
            recognizer,
            corpus,
            index,
            settings,
        }
    }

    pub fn region_around(&self, cursor: ScreenPoint) -> CaptureRegion {
        CaptureRegion::centered_on(
            cursor,
            self.settings.capture_width,
            self.settings.capture_height,
        )
    }

    /// Steps after OCR: pick, clean and look up the nearest token
    pub fn match_tokens(&self, local_cursor: Point, tokens: &[OcrToken]) -> Option<MatchResult> {
        let token = nearest_token(local_cursor, tokens)?;
        tracing::debug!(
            ">>> [OCR] nearest token '{}' (confidence {:.2})",
            token.text,
            token.confidence
        );
        self.match_text(&token.text)
    }

    /// Normalize `raw` and look it up in the corpus
    pub fn match_text(&self, raw: &str) -> Option<MatchResult> {
        let cleaned = normalize(raw);
        if cleaned.is_empty() {
            tracing::debug!("Nothing left of '{}' after normalization", raw);
            return None;
        }

        let (matched_index, similarity) = self.index.query(&cleaned)?;
        let entry = self.corpus.get(matched_index)?;

        tracing::debug!(
            "Matched '{}' -> '{}' (index {}, similarity {:.2})",
            cleaned,
            entry.source_sentence,
            matched_index,
            similarity
        );

        Some(MatchResult {
            matched_index,
            similarity,
            source_text: entry.source_sentence,
            translated_text: entry.target_sentence,
        })
    }
}

impl<C: ScreenCapture, R: TextRecognizer> CaptureMatcher for CaptureMatchPipeline<C, R> {
    fn try_run(&self, cursor: ScreenPoint) -> anyhow::Result<Option<MatchResult>> {
        let region = self.region_around(cursor);
        tracing::debug!(">>> [CAPTURE] region {:?} around {:?}", region, cursor);

        let image = self
            .capture
            .capture(region)
            .context("Failed to capture screen region")?;

        let tokens = self
            .recognizer
            .recognize(&image)
            .context("Failed to recognize text")?;
        tracing::debug!(">>> [OCR] {} tokens", tokens.len());

        // Tokens are image-local, so bring the cursor into the same frame
        let local_cursor = cursor.relative_to(image.origin);
        Ok(self.match_tokens(local_cursor, &tokens))
    }
}
