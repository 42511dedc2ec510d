//! Popup lifecycle: Hidden -> Busy -> Shown -> Hidden
//!
//! The state is a plain value owned by [`OverlayMachine`]; transitions are
//! computed by [`OverlayState::transition`] and return the follow-up work as
//! an [`OverlayAction`]. A trigger that lands while a capture is in flight
//! (`Busy`) is dropped.

use glossa_types::{InputEvent, MatchResult, MouseButton, ScreenPoint};

use crate::pipeline::CaptureMatcher;

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Overlay surface error: {0}")]
    Surface(String),
}

/// The rendering side: one borderless popup at a time
pub trait OverlaySurface {
    fn show(&mut self, text: &str, anchor: ScreenPoint) -> Result<(), OverlayError>;
    fn hide(&mut self);
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    /// Capture running for a trigger at `cursor`
    Busy { cursor: ScreenPoint },
    Shown { text: String, anchor: ScreenPoint },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    Trigger { cursor: ScreenPoint },
    CaptureFinished(Option<MatchResult>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayAction {
    None,
    StartCapture { cursor: ScreenPoint },
    Show { text: String, anchor: ScreenPoint },
    Hide,
}

impl OverlayState {
    pub fn transition(self, event: OverlayEvent) -> (OverlayState, OverlayAction) {
        match (self, event) {
            (OverlayState::Hidden, OverlayEvent::Trigger { cursor }) => (
                OverlayState::Busy { cursor },
                OverlayAction::StartCapture { cursor },
            ),
            (busy @ OverlayState::Busy { .. }, OverlayEvent::Trigger { .. }) => {
                (busy, OverlayAction::None)
            }
            (OverlayState::Busy { cursor }, OverlayEvent::CaptureFinished(Some(result))) => {
                let text = result.translated_text;
                (
                    OverlayState::Shown {
                        text: text.clone(),
                        anchor: cursor,
                    },
                    OverlayAction::Show {
                        text,
                        anchor: cursor,
                    },
                )
            }
            (OverlayState::Busy { .. }, OverlayEvent::CaptureFinished(None)) => {
                (OverlayState::Hidden, OverlayAction::None)
            }
            (OverlayState::Shown { .. }, OverlayEvent::Trigger { .. }) => {
                (OverlayState::Hidden, OverlayAction::Hide)
            }
            // Late capture results outside Busy are stale
            (state, OverlayEvent::CaptureFinished(_)) => (state, OverlayAction::None),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, OverlayState::Hidden)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, OverlayState::Busy { .. })
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, OverlayState::Shown { .. })
    }
}

/// Owns the overlay state and the surface it drives
pub struct OverlayMachine<S> {
    state: OverlayState,
    surface: S,
}

impl<S: OverlaySurface> OverlayMachine<S> {
    pub fn new(surface: S) -> Self {
        Self {
            state: OverlayState::Hidden,
            surface,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Apply `event`; returns the cursor to capture at when a capture must start
    pub fn handle(&mut self, event: OverlayEvent) -> Option<ScreenPoint> {
        let state = std::mem::take(&mut self.state);
        let (next, action) = state.transition(event);
        self.state = next;

        match action {
            OverlayAction::None => {
                if self.state.is_busy() {
                    tracing::debug!("Trigger ignored, capture already in flight");
                }
                None
            }
            OverlayAction::StartCapture { cursor } => Some(cursor),
            OverlayAction::Show { text, anchor } => {
                if let Err(e) = self.surface.show(&text, anchor) {
                    tracing::error!("Failed to show popup: {}", e);
                    self.state = OverlayState::Hidden;
                } else {
                    tracing::info!("Popup shown at {:?}", anchor);
                }
                None
            }
            OverlayAction::Hide => {
                self.surface.hide();
                tracing::info!("Popup closed");
                None
            }
        }
    }

    /// One trigger, run to completion on the calling thread
    pub fn trigger_with<M: CaptureMatcher + ?Sized>(&mut self, cursor: ScreenPoint, matcher: &M) {
        if let Some(cursor) = self.handle(OverlayEvent::Trigger { cursor }) {
            let outcome = matcher.run(cursor);
            self.handle(OverlayEvent::CaptureFinished(outcome));
        }
    }

    /// Tear down any popup and return to Hidden
    pub fn reset(&mut self) {
        if self.state.is_shown() {
            self.surface.hide();
        }
        self.state = OverlayState::Hidden;
    }
}

/// Which input events count as the trigger gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Trigger {
    pub mouse_button: Option<MouseButton>,
    pub hotkey_id: Option<u32>,
}

impl Trigger {
    /// Presses only; releases never trigger
    pub fn matches(&self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Mouse {
                button, pressed, ..
            } => pressed && self.mouse_button == Some(button),
            InputEvent::Hotkey { id, pressed, .. } => pressed && self.hotkey_id == Some(id),
        }
    }
}
