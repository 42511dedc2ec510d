use anyhow::{Context, Result};

/// RAII guard for COM initialization
///
/// Calls CoUninitialize when dropped, so every OCR call on a pool thread
/// leaves the thread the way it found it.
pub struct ComGuard;

impl ComGuard {
    /// Initialize COM (multithreaded apartment) for the current thread
    pub fn initialize() -> Result<Self> {
        unsafe {
            windows::Win32::System::Com::CoInitializeEx(
                Some(std::ptr::null()),
                windows::Win32::System::Com::COINIT_MULTITHREADED,
            )
            .ok()
            .context("Failed to initialize COM")?;
        }
        Ok(ComGuard)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe {
            windows::Win32::System::Com::CoUninitialize();
        }
    }
}
