//! The radar event loop.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use devradar_common::{FilterTags, PresenceRecord, RadarError, Region, RequestCounter};
use futures_util::FutureExt;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::location::{spawn_debounced, LocationProvider, LocationTracker, TrackerConfig};
use crate::presence::{FeedEvent, FeedUpdate, PresenceFeed};
use crate::realtime::FeedTransport;
use crate::search::SearchGateway;

use super::handle::{RadarCommand, RadarHandle};
use super::state::{RadarSnapshot, RadarState, RadarStatus, SearchTicket};

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone)]
pub struct RadarOptions {
    /// Tags active before the user picks any.
    pub tags: FilterTags,
    pub tracker: TrackerConfig,
    /// How long the region must be stable before it is acted on.
    pub debounce: Duration,
    /// Search automatically when the region settles.
    pub search_on_move: bool,
}

impl Default for RadarOptions {
    fn default() -> Self {
        Self {
            tags: FilterTags::default(),
            tracker: TrackerConfig::default(),
            debounce: Duration::from_millis(400),
            search_on_move: true,
        }
    }
}

struct SearchCompletion {
    ticket: SearchTicket,
    result: Result<Vec<PresenceRecord>, RadarError>,
}

/// Owns every piece of radar state and mutates it from a single task.
///
/// Searches run on a [`JoinSet`] so a slow response never blocks commands
/// or feed events; their results come back through the same loop.
pub struct Radar {
    tracker: LocationTracker,
    search: Arc<dyn SearchGateway>,
    feed: PresenceFeed,
    state: RadarState,
    requests: RequestCounter,
    searches: JoinSet<SearchCompletion>,
    snapshots: watch::Sender<RadarSnapshot>,
    debounce: Duration,
    search_on_move: bool,
}

impl Radar {
    pub fn new(
        location: Arc<dyn LocationProvider>,
        search: Arc<dyn SearchGateway>,
        transport: Arc<dyn FeedTransport>,
        options: RadarOptions,
    ) -> Self {
        let feed = PresenceFeed::new(transport);
        let state = RadarState::new(options.tags);
        let (snapshots, _) = watch::channel(state.snapshot(feed.status()));
        Self {
            tracker: LocationTracker::new(location, options.tracker),
            search,
            feed,
            state,
            requests: RequestCounter::new(),
            searches: JoinSet::new(),
            snapshots,
            debounce: options.debounce,
            search_on_move: options.search_on_move,
        }
    }

    /// Start the event loop on the current runtime.
    pub fn spawn(self) -> RadarHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let snapshots = self.snapshots.subscribe();
        let task = tokio::spawn(self.run(command_rx));
        RadarHandle::new(command_tx, snapshots, task)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<RadarCommand>) {
        self.locate().await;
        self.publish();

        let mut regions = spawn_debounced(self.tracker.subscribe(), self.debounce);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(RadarCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(region) = regions.recv() => self.on_region_settled(region),
                Some(joined) = self.searches.join_next() => match joined {
                    Ok(completion) => self.on_search_complete(completion).await,
                    Err(e) => warn!(error = %e, "Search task failed"),
                },
                event = self.feed.next_event() => self.on_feed_event(event),
            }
            self.publish();
        }

        self.searches.abort_all();
        self.feed.disconnect().await;
        self.publish();
        info!("Radar stopped");
    }

    async fn locate(&mut self) {
        match self.tracker.start().await {
            Ok(region) => {
                self.state.set_region(region);
                self.start_search();
            }
            Err(e) => {
                warn!(error = %e, "No initial region");
                self.state.set_status(RadarStatus::Unavailable(e));
            }
        }
    }

    fn handle_command(&mut self, command: RadarCommand) {
        match command {
            RadarCommand::RegionChanged(region) => {
                if !self.tracker.region_changed(region) {
                    debug!(region = %region, "Ignoring small region change");
                }
            }
            RadarCommand::SetTags(tags) => {
                if self.state.set_tags(tags) {
                    self.start_search();
                } else {
                    debug!("Tag set unchanged");
                }
            }
            RadarCommand::Refresh => self.start_search(),
            RadarCommand::Shutdown => {}
        }
    }

    fn on_region_settled(&mut self, region: Region) {
        if self.state.set_region(region) && self.search_on_move {
            self.start_search();
        }
    }

    fn start_search(&mut self) {
        let ticket = match self.state.begin_search(&self.requests) {
            Ok(ticket) => ticket,
            Err(e) => {
                warn!(error = %e, "Cannot search");
                return;
            }
        };
        info!(
            request = %ticket.id,
            region = %ticket.key.region,
            techs = %ticket.key.tags,
            "Searching for nearby developers"
        );

        let search = Arc::clone(&self.search);
        self.searches.spawn(async move {
            // A panicking gateway must still resolve its ticket.
            let result = AssertUnwindSafe(search.search(&ticket.key.region, &ticket.key.tags))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(RadarError::Network("search task panicked".into())));
            SearchCompletion { ticket, result }
        });
    }

    async fn on_search_complete(&mut self, completion: SearchCompletion) {
        let SearchCompletion { ticket, result } = completion;
        match self.state.complete_search(ticket.id, result) {
            Ok(count) => {
                info!(request = %ticket.id, count, "Presence set seeded");
                if let Err(e) = self.feed.connect(ticket.key).await {
                    warn!(error = %e, "Failed to open presence subscription");
                    self.state.set_status(RadarStatus::Failed(e));
                }
            }
            Err(RadarError::StaleResponse { request, latest }) => {
                debug!(%request, %latest, "Discarding stale search response");
            }
            Err(e) => warn!(request = %ticket.id, error = %e, "Search failed"),
        }
    }

    fn on_feed_event(&mut self, event: FeedEvent) {
        match self.feed.apply(event, self.state.records_mut()) {
            FeedUpdate::Subscribed => self.state.feed_recovered(),
            FeedUpdate::Error(message) => self.state.feed_failed(RadarError::Network(message)),
            FeedUpdate::Closed => {
                warn!("Presence feed closed; refresh to resubscribe");
                self.state
                    .feed_failed(RadarError::Network("presence feed closed".into()));
            }
            FeedUpdate::Merged { .. } | FeedUpdate::Reconnecting | FeedUpdate::Ignored => {}
        }
    }

    fn publish(&self) {
        let next = self.state.snapshot(self.feed.status());
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
