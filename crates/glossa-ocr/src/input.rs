//! Mouse and hotkey polling
//!
//! device_query only exposes the current button state, so press/release
//! edges are recovered by diffing successive polls.

use std::time::Duration;

use device_query::{DeviceQuery, DeviceState};
use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use glossa_types::{AppEvent, InputEvent, MouseButton, ScreenPoint};
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

pub struct InputListener {
    device: DeviceState,
    buttons: Vec<bool>,
    hotkey_id: Option<u32>,
}

impl InputListener {
    /// `hotkey_id` filters global hotkey events; `None` ignores them all
    pub fn new(hotkey_id: Option<u32>) -> Self {
        let device = DeviceState::new();
        let buttons = device.get_mouse().button_pressed;
        Self {
            device,
            buttons,
            hotkey_id,
        }
    }

    /// Input edges since the previous poll
    pub fn poll(&mut self) -> Vec<InputEvent> {
        let mouse = self.device.get_mouse();
        let position = ScreenPoint::new(mouse.coords.0, mouse.coords.1);

        let mut events = button_edges(&self.buttons, &mouse.button_pressed, position);
        self.buttons = mouse.button_pressed;

        while let Ok(event) = GlobalHotKeyEvent::receiver().try_recv() {
            if Some(event.id) != self.hotkey_id {
                continue;
            }
            events.push(InputEvent::Hotkey {
                id: event.id,
                pressed: event.state == HotKeyState::Pressed,
                position,
            });
        }

        events
    }

    /// Poll until cancelled or the receiver goes away; blocks the calling thread
    pub fn run(mut self, tx: AsyncSender<AppEvent>, interval: Duration, cancel: CancellationToken) {
        tracing::info!("Input listener started (poll every {:?})", interval);

        while !cancel.is_cancelled() {
            for event in self.poll() {
                tracing::trace!("Input: {:?}", event);
                match tx.try_send(AppEvent::Input(event)) {
                    Ok(true) => {}
                    Ok(false) => tracing::warn!("Event channel full, input dropped"),
                    Err(_) => {
                        tracing::info!("Event channel closed, input listener exiting");
                        return;
                    }
                }
            }
            std::thread::sleep(interval);
        }

        tracing::info!("Input listener stopped");
    }
}

/// Button behind a device_query slot on Windows and macOS
#[cfg(not(target_os = "linux"))]
pub fn slot_button(slot: u8) -> MouseButton {
    match slot {
        1 => MouseButton::Left,
        2 => MouseButton::Right,
        3 => MouseButton::Middle,
        4 => MouseButton::X1,
        5 => MouseButton::X2,
        other => MouseButton::Other(other),
    }
}

/// Button behind a device_query slot on X11
///
/// Slots follow the X core button masks: 1 left, 2 middle, 3 right, 4/5 the
/// wheel. Side buttons (X1/X2) are not reported at all.
#[cfg(target_os = "linux")]
pub fn slot_button(slot: u8) -> MouseButton {
    match slot {
        1 => MouseButton::Left,
        2 => MouseButton::Middle,
        3 => MouseButton::Right,
        other => MouseButton::Other(other),
    }
}

/// Whether presses of `button` can reach the listener on this platform
pub fn button_observable(button: MouseButton) -> bool {
    if cfg!(target_os = "linux") {
        !matches!(button, MouseButton::X1 | MouseButton::X2)
    } else {
        true
    }
}

/// Press/release events for every button whose state changed
///
/// Index 0 of device_query's button vector is unused; 1.. are button slots.
pub fn button_edges(previous: &[bool], current: &[bool], position: ScreenPoint) -> Vec<InputEvent> {
    current
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(slot, &pressed)| {
            let was_pressed = previous.get(slot).copied().unwrap_or(false);
            if pressed == was_pressed {
                return None;
            }
            let slot = u8::try_from(slot).ok()?;
            Some(InputEvent::Mouse {
                button: slot_button(slot),
                pressed,
                position,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: ScreenPoint = ScreenPoint::new(10, 20);

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_press_and_release_edges() {
        let idle = [false; 6];
        let mut x2 = [false; 6];
        x2[5] = true;

        assert_eq!(
            button_edges(&idle, &x2, AT),
            vec![InputEvent::Mouse { button: MouseButton::X2, pressed: true, position: AT }]
        );
        assert_eq!(
            button_edges(&x2, &idle, AT),
            vec![InputEvent::Mouse { button: MouseButton::X2, pressed: false, position: AT }]
        );
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_slot_numbering() {
        assert_eq!(slot_button(2), MouseButton::Right);
        assert_eq!(slot_button(3), MouseButton::Middle);
        assert_eq!(slot_button(4), MouseButton::X1);
        assert_eq!(slot_button(5), MouseButton::X2);
        assert!(button_observable(MouseButton::X2));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_x11_slot_numbering() {
        assert_eq!(slot_button(2), MouseButton::Middle);
        assert_eq!(slot_button(3), MouseButton::Right);
        // Wheel notches are never mistaken for side buttons
        assert_eq!(slot_button(4), MouseButton::Other(4));
        assert_eq!(slot_button(5), MouseButton::Other(5));
        assert!(!button_observable(MouseButton::X1));
        assert!(!button_observable(MouseButton::X2));
        assert!(button_observable(MouseButton::Right));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_scroll_down_is_not_x2() {
        let idle = [false; 6];
        let mut wheel = [false; 6];
        wheel[5] = true;

        assert_eq!(
            button_edges(&idle, &wheel, AT),
            vec![InputEvent::Mouse { button: MouseButton::Other(5), pressed: true, position: AT }]
        );
    }

    #[test]
    fn test_held_button_is_not_repeated() {
        let held = [false, true, false, false, false, false];
        assert!(button_edges(&held, &held, AT).is_empty());
    }

    #[test]
    fn test_shorter_previous_state() {
        let current = [false, true, false];
        let events = button_edges(&[], &current, AT);
        assert_eq!(
            events,
            vec![InputEvent::Mouse { button: MouseButton::Left, pressed: true, position: AT }]
        );
    }
}
