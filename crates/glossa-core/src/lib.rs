pub mod corpus;
pub mod index;
pub mod overlay;
pub mod pipeline;
pub mod preprocess;
pub mod select;

pub use corpus::{Corpus, CorpusEntry, CorpusError, LoadStats};
pub use index::SimilarityIndex;
pub use overlay::{OverlayAction, OverlayError, OverlayEvent, OverlayMachine, OverlayState, OverlaySurface, Trigger};
pub use pipeline::{CaptureMatchPipeline, CaptureMatcher, PipelineSettings, ScreenCapture, TextRecognizer};
pub use preprocess::normalize;
pub use select::select_nearest;
