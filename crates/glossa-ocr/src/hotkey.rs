use anyhow::{Context, Result};
use global_hotkey::{GlobalHotKeyManager, hotkey::HotKey};

/// A registered global hotkey; unregistered on drop
///
/// Must be created on the thread that runs the platform event loop.
pub struct HotkeyRegistration {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyRegistration {
    /// Register a hotkey written like "ctrl+shift+KeyS" or "F9"
    pub fn register(accelerator: &str) -> Result<Self> {
        let hotkey = parse_hotkey(accelerator)?;
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        manager
            .register(hotkey)
            .with_context(|| format!("Failed to register hotkey '{}'", accelerator))?;

        tracing::info!("Registered hotkey '{}' (id {})", accelerator, hotkey.id());
        Ok(Self { manager, hotkey })
    }

    /// Id carried by this hotkey's events
    pub fn id(&self) -> u32 {
        self.hotkey.id()
    }
}

pub fn parse_hotkey(accelerator: &str) -> Result<HotKey> {
    accelerator.parse::<HotKey>()
        .with_context(|| format!("Invalid hotkey '{}'", accelerator))
}

impl Drop for HotkeyRegistration {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hotkey() {
        let a = parse_hotkey("ctrl+shift+KeyS").unwrap();
        let b = parse_hotkey("shift+ctrl+KeyS").unwrap();
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), parse_hotkey("F9").unwrap().id());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_hotkey("ctrl+").is_err());
        assert!(parse_hotkey("notakey").is_err());
    }
}
