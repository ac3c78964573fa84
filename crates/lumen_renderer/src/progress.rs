//! Approximate render progress.
//!
//! Workers bump a shared pixel counter with relaxed atomics: increments are
//! never lost, but no ordering with other memory is implied and concurrent
//! reporters may observe slightly stale totals. The percentage is only used
//! for log output, so this is enough.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared rendered-pixel counter with a high-water mark of reported percent.
#[derive(Debug)]
pub struct Progress {
    total_pixels: usize,
    rendered: AtomicUsize,
    reported_percent: AtomicUsize,
}

impl Progress {
    /// Track progress over `total_pixels` pixels.
    pub fn new(total_pixels: usize) -> Self {
        Self {
            total_pixels,
            rendered: AtomicUsize::new(0),
            reported_percent: AtomicUsize::new(0),
        }
    }

    /// Count one finished pixel.
    #[inline]
    pub fn pixel_done(&self) {
        self.rendered.fetch_add(1, Ordering::Relaxed);
    }

    /// Pixels counted so far.
    pub fn rendered(&self) -> usize {
        self.rendered.load(Ordering::Relaxed)
    }

    /// `ceil(rendered / total * 100)`.
    pub fn percent(&self) -> usize {
        if self.total_pixels == 0 {
            return 100;
        }
        (self.rendered() * 100).div_ceil(self.total_pixels).min(100)
    }

    /// Returns the new percentage if it rose past the last reported value.
    ///
    /// At most one caller observes each increase.
    pub fn advance(&self) -> Option<usize> {
        let percent = self.percent();
        let previous = self.reported_percent.fetch_max(percent, Ordering::Relaxed);
        (percent > previous).then_some(percent)
    }

    /// Log the percentage if it increased.
    pub fn report(&self) {
        if let Some(percent) = self.advance() {
            log::info!("Rendering: {}%", percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_up() {
        let progress = Progress::new(300);
        assert_eq!(progress.percent(), 0);
        progress.pixel_done();
        assert_eq!(progress.percent(), 1);
        for _ in 0..149 {
            progress.pixel_done();
        }
        assert_eq!(progress.percent(), 50);
        progress.pixel_done();
        assert_eq!(progress.percent(), 51);
    }

    #[test]
    fn test_advance_reports_each_increase_once() {
        let progress = Progress::new(4);
        assert_eq!(progress.advance(), None);

        progress.pixel_done();
        assert_eq!(progress.advance(), Some(25));
        assert_eq!(progress.advance(), None);

        progress.pixel_done();
        progress.pixel_done();
        progress.pixel_done();
        assert_eq!(progress.advance(), Some(100));
        assert_eq!(progress.advance(), None);
    }

    #[test]
    fn test_concurrent_counting() {
        let progress = Progress::new(8 * 1000);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        progress.pixel_done();
                        progress.report();
                    }
                });
            }
        });
        assert_eq!(progress.rendered(), 8000);
        assert_eq!(progress.percent(), 100);
    }
}
