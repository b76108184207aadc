//! Location tracker and region debouncing.

use std::sync::Arc;
use std::time::Duration;

use devradar_common::{RadarError, Region, DEFAULT_REGION_DELTA};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::provider::{Accuracy, LocationProvider, Permission};

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub accuracy: Accuracy,
    /// Span of the initial region, in degrees.
    pub initial_delta: f64,
    /// Fraction of the current span a change must exceed to be published.
    pub min_shift: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            initial_delta: DEFAULT_REGION_DELTA,
            min_shift: 0.1,
        }
    }
}

/// Produces the current region: first from the device position, then from
/// viewport changes. Each accepted region replaces the previous one and is
/// published on a watch channel.
pub struct LocationTracker {
    provider: Arc<dyn LocationProvider>,
    config: TrackerConfig,
    region_tx: watch::Sender<Option<Region>>,
}

impl LocationTracker {
    pub fn new(provider: Arc<dyn LocationProvider>, config: TrackerConfig) -> Self {
        let (region_tx, _) = watch::channel(None);
        Self {
            provider,
            config,
            region_tx,
        }
    }

    /// Ask for permission and take one position fix.
    ///
    /// Fails with [`RadarError::PermissionDenied`] if refused; callers must
    /// cope with having no region.
    pub async fn start(&mut self) -> Result<Region, RadarError> {
        if self.provider.request_permission().await? == Permission::Denied {
            warn!("Location permission denied");
            return Err(RadarError::PermissionDenied);
        }

        let position = self.provider.current_position(self.config.accuracy).await?;
        let region = Region::around(position, self.config.initial_delta)?;
        info!(region = %region, "Initial location acquired");
        self.region_tx.send_replace(Some(region));
        Ok(region)
    }

    /// Offer a new viewport. Returns whether it was accepted (a first region,
    /// or a meaningful change from the current one).
    pub fn region_changed(&mut self, region: Region) -> bool {
        let accepted = match *self.region_tx.borrow() {
            None => true,
            Some(current) => current.differs_meaningfully(&region, self.config.min_shift),
        };
        if accepted {
            debug!(region = %region, "Region changed");
            self.region_tx.send_replace(Some(region));
        }
        accepted
    }

    pub fn current(&self) -> Option<Region> {
        *self.region_tx.borrow()
    }

    /// Receiver of accepted regions. Only changes after this call are
    /// reported as new.
    pub fn subscribe(&self) -> watch::Receiver<Option<Region>> {
        self.region_tx.subscribe()
    }
}

/// Forward regions from `regions` once they have been stable for `quiet`.
///
/// A burst of changes produces one emission carrying the last region. The
/// task ends when either side of it goes away.
pub fn spawn_debounced(
    mut regions: watch::Receiver<Option<Region>>,
    quiet: Duration,
) -> mpsc::Receiver<Region> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        loop {
            if regions.changed().await.is_err() {
                return;
            }
            let mut sender_gone = false;
            loop {
                match tokio::time::timeout(quiet, regions.changed()).await {
                    Ok(Ok(())) => continue,
                    Ok(Err(_)) => {
                        sender_gone = true;
                        break;
                    }
                    Err(_settled) => break,
                }
            }
            let settled = *regions.borrow_and_update();
            if let Some(region) = settled {
                if tx.send(region).await.is_err() {
                    return;
                }
            }
            if sender_gone {
                return;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::FixedLocationProvider;
    use devradar_common::Coordinates;

    fn tracker(provider: FixedLocationProvider) -> LocationTracker {
        LocationTracker::new(Arc::new(provider), TrackerConfig::default())
    }

    fn region(lat: f64, lon: f64) -> Region {
        Region::new(lat, lon, 0.04, 0.04).unwrap()
    }

    #[tokio::test]
    async fn start_denied_leaves_no_region() {
        let mut tracker = tracker(FixedLocationProvider::denied());
        assert_eq!(tracker.start().await, Err(RadarError::PermissionDenied));
        assert_eq!(tracker.current(), None);
    }

    #[tokio::test]
    async fn start_granted_publishes_initial_region() {
        let position = Coordinates::new(-23.55, -46.63).unwrap();
        let mut tracker = tracker(FixedLocationProvider::at(position));
        let rx = tracker.subscribe();

        let region = tracker.start().await.unwrap();
        assert_eq!(region.center(), position);
        assert_eq!(region.latitude_delta(), DEFAULT_REGION_DELTA);
        assert_eq!(*rx.borrow(), Some(region));
    }

    #[tokio::test]
    async fn small_changes_are_dropped() {
        let mut tracker = tracker(FixedLocationProvider::at(Coordinates::new(0.0, 0.0).unwrap()));
        tracker.start().await.unwrap();

        assert!(!tracker.region_changed(region(0.001, 0.001)));
        assert!(tracker.region_changed(region(0.5, 0.5)));
        assert_eq!(tracker.current(), Some(region(0.5, 0.5)));
    }

    #[tokio::test]
    async fn first_region_is_accepted_without_start() {
        let mut tracker = tracker(FixedLocationProvider::denied());
        assert!(tracker.region_changed(region(1.0, 1.0)));
        assert_eq!(tracker.current(), Some(region(1.0, 1.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_emits_last_region_of_a_burst() {
        let (tx, rx) = watch::channel(None);
        let mut out = spawn_debounced(rx, Duration::from_millis(400));

        for i in 0..5 {
            tx.send_replace(Some(region(i as f64, 0.0)));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let settled = out.recv().await.unwrap();
        assert_eq!(settled, region(4.0, 0.0));

        // Nothing else is pending.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(out.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_changes_emit_separately() {
        let (tx, rx) = watch::channel(None);
        let mut out = spawn_debounced(rx, Duration::from_millis(400));

        tx.send_replace(Some(region(1.0, 0.0)));
        assert_eq!(out.recv().await.unwrap(), region(1.0, 0.0));

        tx.send_replace(Some(region(2.0, 0.0)));
        assert_eq!(out.recv().await.unwrap(), region(2.0, 0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_flushes_when_sender_drops() {
        let (tx, rx) = watch::channel(None);
        let mut out = spawn_debounced(rx, Duration::from_millis(400));

        tx.send_replace(Some(region(3.0, 0.0)));
        tokio::task::yield_now().await;
        drop(tx);

        assert_eq!(out.recv().await, Some(region(3.0, 0.0)));
        assert_eq!(out.recv().await, None);
    }
}
