use anyhow::{Context, Result};
use glossa_core::ScreenCapture;
use glossa_types::{CaptureRegion, CapturedImage};
use xcap::Monitor;

/// Screen capture through xcap, one monitor at a time
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapCapture;

impl ScreenCapture for XcapCapture {
    fn capture(&self, region: CaptureRegion) -> Result<CapturedImage> {
        let monitors = Monitor::all().context("Failed to get monitors")?;
        let bounds: Vec<CaptureRegion> = monitors.iter().map(monitor_bounds).collect();

        let (index, clamped) = locate(region, &bounds).context("No monitor found for region")?;
        let monitor = &monitors[index];
        let screen = &bounds[index];

        let image = monitor.capture_image().context("Failed to capture screen")?;

        let cropped = xcap::image::imageops::crop_imm(
            &image,
            (clamped.x - screen.x) as u32,
            (clamped.y - screen.y) as u32,
            clamped.width,
            clamped.height,
        )
        .to_image();

        tracing::debug!(
            "Captured {}x{} at ({}, {})",
            cropped.width(),
            cropped.height(),
            clamped.x,
            clamped.y
        );

        Ok(CapturedImage {
            origin: clamped.origin(),
            width: cropped.width(),
            height: cropped.height(),
            rgba: cropped.into_raw(),
        })
    }
}

fn monitor_bounds(monitor: &Monitor) -> CaptureRegion {
    CaptureRegion {
        x: monitor.x(),
        y: monitor.y(),
        width: monitor.width(),
        height: monitor.height(),
    }
}

/// Monitor holding the region's center (else the first one) and the region clamped to it
fn locate(region: CaptureRegion, monitors: &[CaptureRegion]) -> Option<(usize, CaptureRegion)> {
    let center = region.center();
    let index = monitors
        .iter()
        .position(|m| m.contains(center))
        .or((!monitors.is_empty()).then_some(0))?;

    let clamped = region.clamp_to(&monitors[index])?;
    Some((index, clamped))
}

#[cfg(test)]
mod tests {
    use glossa_types::ScreenPoint;

    use super::*;

    fn screens() -> Vec<CaptureRegion> {
        vec![
            CaptureRegion { x: 0, y: 0, width: 1920, height: 1080 },
            CaptureRegion { x: 1920, y: 0, width: 2560, height: 1440 },
        ]
    }

    #[test]
    fn test_picks_monitor_under_center() {
        let region = CaptureRegion::centered_on(ScreenPoint::new(2500, 500), 200, 40);
        let (index, clamped) = locate(region, &screens()).unwrap();
        assert_eq!(index, 1);
        assert_eq!(clamped, region);
    }

    #[test]
    fn test_clamps_at_screen_edge() {
        let region = CaptureRegion::centered_on(ScreenPoint::new(100, 10), 2000, 100);
        let (index, clamped) = locate(region, &screens()).unwrap();
        assert_eq!(index, 0);
        assert_eq!(clamped, CaptureRegion { x: 0, y: 0, width: 1100, height: 60 });
    }

    #[test]
    fn test_off_screen_falls_back_to_first() {
        let region = CaptureRegion::centered_on(ScreenPoint::new(-50, 500), 200, 40);
        let (index, clamped) = locate(region, &screens()).unwrap();
        assert_eq!(index, 0);
        assert_eq!(clamped.x, 0);
        assert_eq!(clamped.width, 50);
    }

    #[test]
    fn test_no_monitors() {
        let region = CaptureRegion::centered_on(ScreenPoint::new(0, 0), 200, 40);
        assert!(locate(region, &[]).is_none());
    }
}
