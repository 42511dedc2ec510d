use glossa_core::{OverlayError, OverlaySurface};
use glossa_types::ScreenPoint;
use kanal::{AsyncReceiver, AsyncSender};

/// Work for the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    Show { text: String, position: ScreenPoint },
    Hide,
    Quit,
}

/// [`OverlaySurface`] that forwards to the Slint event loop
///
/// Lives on the backend side; the popup itself is created and destroyed on
/// the UI thread by [`crate::ui_loop`].
#[derive(Clone)]
pub struct SlintOverlay {
    tx: AsyncSender<UiCommand>,
    offset: (i32, i32),
}

impl SlintOverlay {
    /// Surface plus the receiver to hand to [`crate::ui_loop`]
    ///
    /// Unbounded: a `Hide` or `Quit` is never refused while the UI is alive.
    pub fn channel(offset_x: i32, offset_y: i32) -> (Self, AsyncReceiver<UiCommand>) {
        let (tx, rx) = kanal::unbounded_async();
        (
            Self {
                tx,
                offset: (offset_x, offset_y),
            },
            rx,
        )
    }

    /// Ask the UI loop to exit
    pub fn quit(&self) {
        if self.tx.try_send(UiCommand::Quit).is_err() {
            tracing::debug!("[SLINT] UI already gone");
        }
    }

    fn send(&self, command: UiCommand) -> Result<(), OverlayError> {
        self.tx
            .try_send(command)
            .map(|_| ())
            .map_err(|e| OverlayError::Surface(e.to_string()))
    }
}

impl OverlaySurface for SlintOverlay {
    fn show(&mut self, text: &str, anchor: ScreenPoint) -> Result<(), OverlayError> {
        let position = anchor.offset(self.offset.0, self.offset.1);
        self.send(UiCommand::Show {
            text: text.to_string(),
            position,
        })
    }

    fn hide(&mut self) {
        if let Err(e) = self.send(UiCommand::Hide) {
            tracing::warn!("[SLINT] Failed to hide popup: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_applies_offset() {
        let (mut overlay, rx) = SlintOverlay::channel(0, -100);
        overlay.show("你好。", ScreenPoint::new(500, 300)).unwrap();
        overlay.hide();

        let rx = rx.to_sync();
        assert_eq!(
            rx.try_recv().unwrap(),
            Some(UiCommand::Show {
                text: "你好。".to_string(),
                position: ScreenPoint::new(500, 200),
            })
        );
        assert_eq!(rx.try_recv().unwrap(), Some(UiCommand::Hide));
    }

    #[test]
    fn test_hide_survives_a_backlog() {
        let (mut overlay, rx) = SlintOverlay::channel(0, 0);
        for i in 0..100 {
            overlay.show(&i.to_string(), ScreenPoint::new(0, 0)).unwrap();
        }
        overlay.hide();

        let rx = rx.to_sync();
        assert_eq!(rx.len(), 101);
        let mut last = None;
        while let Ok(Some(command)) = rx.try_recv() {
            last = Some(command);
        }
        assert_eq!(last, Some(UiCommand::Hide));
    }

    #[test]
    fn test_show_fails_once_ui_is_gone() {
        let (mut overlay, rx) = SlintOverlay::channel(0, 0);
        drop(rx);
        assert!(overlay.show("x", ScreenPoint::new(0, 0)).is_err());
    }
}
