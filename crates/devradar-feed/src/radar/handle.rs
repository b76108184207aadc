use devradar_common::{FilterTags, Region};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::warn;

use super::state::RadarSnapshot;

/// Inputs from the display layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RadarCommand {
    /// The visible viewport moved.
    RegionChanged(Region),
    SetTags(FilterTags),
    /// Search again with the current region and tags.
    Refresh,
    Shutdown,
}

/// Handle to a running [`Radar`](super::Radar).
///
/// Results are observed through snapshots. Sending returns `false` once the
/// radar has stopped.
pub struct RadarHandle {
    commands: mpsc::Sender<RadarCommand>,
    snapshots: watch::Receiver<RadarSnapshot>,
    task: JoinHandle<()>,
}

impl RadarHandle {
    pub(super) fn new(
        commands: mpsc::Sender<RadarCommand>,
        snapshots: watch::Receiver<RadarSnapshot>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            commands,
            snapshots,
            task,
        }
    }

    pub async fn send(&self, command: RadarCommand) -> bool {
        match self.commands.send(command).await {
            Ok(()) => true,
            Err(e) => {
                warn!(command = ?e.0, "Radar is not running; command dropped");
                false
            }
        }
    }

    pub async fn region_changed(&self, region: Region) -> bool {
        self.send(RadarCommand::RegionChanged(region)).await
    }

    pub async fn set_tags(&self, tags: FilterTags) -> bool {
        self.send(RadarCommand::SetTags(tags)).await
    }

    pub async fn refresh(&self) -> bool {
        self.send(RadarCommand::Refresh).await
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> RadarSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RadarSnapshot> {
        self.snapshots.clone()
    }

    /// Stop the radar and wait for its subscription to be torn down.
    pub async fn shutdown(self) {
        let _ = self.commands.send(RadarCommand::Shutdown).await;
        let _ = self.task.await;
    }
}
