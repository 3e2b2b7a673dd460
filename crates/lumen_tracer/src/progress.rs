//! Lock-free render progress tracking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts completed work items and reports every multiple of `interval`
/// percent exactly once.
///
/// The caller that advances the reported mark claims every threshold
/// between the old mark and its own completion level, so a single item
/// worth more than `interval` still yields each multiple it crosses.
#[derive(Debug)]
pub struct ProgressTracker {
    total: u64,
    interval: u64,
    complete: AtomicU64,
    last_reported: AtomicU64,
}

impl ProgressTracker {
    pub fn new(total: u64, interval_percent: u32) -> Self {
        Self {
            total,
            interval: u64::from(interval_percent.max(1)),
            complete: AtomicU64::new(0),
            last_reported: AtomicU64::new(0),
        }
    }

    /// Record one completed item. Yields the percentage thresholds this call
    /// crossed, in increasing order.
    pub fn increment(&self) -> impl Iterator<Item = u32> {
        let (first, last) = self.claim().unwrap_or((1, 0));
        (first..=last).step_by(self.interval as usize).map(|p| p as u32)
    }

    /// Advance the reported mark to the current threshold, returning the
    /// first and last newly crossed multiples.
    fn claim(&self) -> Option<(u64, u64)> {
        let complete = self.complete.fetch_add(1, Ordering::AcqRel) + 1;
        if self.total == 0 {
            return None;
        }

        let percent = complete.min(self.total) * 100 / self.total;
        let reached = percent / self.interval * self.interval;

        let mut last = self.last_reported.load(Ordering::Acquire);
        while reached > last {
            match self
                .last_reported
                .compare_exchange_weak(last, reached, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return Some((last + self.interval, reached)),
                Err(current) => last = current,
            }
        }
        None
    }

    pub fn complete(&self) -> u64 {
        self.complete.load(Ordering::Acquire)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_done(&self) -> bool {
        self.complete() >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_reports_every_interval() {
        let tracker = ProgressTracker::new(100, 5);
        let reports: Vec<u32> = (0..100).flat_map(|_| tracker.increment()).collect();

        assert_eq!(reports, (1..=20).map(|i| i * 5).collect::<Vec<_>>());
        assert!(tracker.is_done());
    }

    #[test]
    fn test_threshold_crossing_not_equality() {
        // 7 items at 10%: 1/7 = 14%, 2/7 = 28%, 3/7 = 42%, ...
        let tracker = ProgressTracker::new(7, 10);
        let per_item: Vec<Vec<u32>> = (0..7).map(|_| tracker.increment().collect()).collect();

        assert_eq!(
            per_item,
            vec![vec![10], vec![20], vec![30, 40], vec![50], vec![60, 70], vec![80], vec![90, 100]]
        );
    }

    #[test]
    fn test_items_larger_than_interval_report_each_multiple() {
        let tracker = ProgressTracker::new(10, 5);
        let reports: Vec<u32> = (0..10).flat_map(|_| tracker.increment()).collect();
        assert_eq!(reports, (1..=20).map(|i| i * 5).collect::<Vec<_>>());

        let tracker = ProgressTracker::new(2, 5);
        assert_eq!(tracker.increment().collect::<Vec<_>>(), (1..=10).map(|i| i * 5).collect::<Vec<_>>());
        assert_eq!(tracker.increment().count(), 10);
        assert_eq!(tracker.increment().next(), None);
        assert!(tracker.is_done());
    }

    #[test]
    fn test_concurrent_increments() {
        let tracker = ProgressTracker::new(10_000, 5);
        let reports = Mutex::new(Vec::new());

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1250 {
                        for p in tracker.increment() {
                            reports.lock().unwrap().push(p);
                        }
                    }
                });
            }
        });

        let mut reports = reports.into_inner().unwrap();
        reports.sort_unstable();

        assert_eq!(tracker.complete(), tracker.total());
        assert_eq!(reports, (1..=20).map(|i| i * 5).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_total() {
        let tracker = ProgressTracker::new(0, 5);
        assert_eq!(tracker.increment().next(), None);
        assert!(tracker.is_done());
    }
}
