//! Explicit radar state and its transitions.

use std::fmt;

use devradar_common::{
    FilterTags, PresenceRecord, RadarError, Region, RequestCounter, RequestId, SubscriptionKey,
};

use crate::presence::{FeedStatus, PresenceSet};

/// What the display layer should show besides the records.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RadarStatus {
    #[default]
    Locating,
    /// No region to search: location refused or unavailable.
    Unavailable(RadarError),
    /// A region is known but nothing has been searched yet.
    Idle,
    Searching,
    Ready,
    /// The latest search failed; the previous records are kept.
    Failed(RadarError),
}

impl fmt::Display for RadarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadarStatus::Locating => f.write_str("locating"),
            RadarStatus::Unavailable(e) => write!(f, "unavailable: {e}"),
            RadarStatus::Idle => f.write_str("idle"),
            RadarStatus::Searching => f.write_str("searching"),
            RadarStatus::Ready => f.write_str("ready"),
            RadarStatus::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

/// A search that has been issued and not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub id: RequestId,
    pub key: SubscriptionKey,
}

/// Everything the display layer gets to see.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarSnapshot {
    pub status: RadarStatus,
    pub feed: FeedStatus,
    pub region: Option<Region>,
    pub tags: FilterTags,
    /// Ordered by id.
    pub records: Vec<PresenceRecord>,
}

/// The single source of truth for region, tags and presence records.
#[derive(Debug)]
pub struct RadarState {
    region: Option<Region>,
    tags: FilterTags,
    records: PresenceSet,
    latest_request: RequestId,
    status: RadarStatus,
    /// Set while `status` is a failure reported by the presence feed.
    feed_failure: bool,
}

impl RadarState {
    pub fn new(tags: FilterTags) -> Self {
        Self {
            region: None,
            tags,
            records: PresenceSet::new(),
            // Counters start at 1, so no real response matches this.
            latest_request: RequestId::from_raw(0),
            status: RadarStatus::Locating,
            feed_failure: false,
        }
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn tags(&self) -> &FilterTags {
        &self.tags
    }

    pub fn records(&self) -> &PresenceSet {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut PresenceSet {
        &mut self.records
    }

    pub fn status(&self) -> &RadarStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: RadarStatus) {
        self.status = status;
        self.feed_failure = false;
    }

    /// Record a presence feed failure.
    ///
    /// Only replaces `Ready` or an earlier feed failure, so it never hides a
    /// search in progress or a failed search.
    pub fn feed_failed(&mut self, error: RadarError) {
        if self.status == RadarStatus::Ready || self.feed_failure {
            self.status = RadarStatus::Failed(error);
            self.feed_failure = true;
        }
    }

    /// The feed is subscribed again; clear a failure it caused.
    pub fn feed_recovered(&mut self) {
        if self.feed_failure {
            self.status = RadarStatus::Ready;
            self.feed_failure = false;
        }
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    /// Returns whether the region changed.
    pub fn set_region(&mut self, region: Region) -> bool {
        if self.region == Some(region) {
            return false;
        }
        self.region = Some(region);
        if matches!(self.status, RadarStatus::Locating | RadarStatus::Unavailable(_)) {
            self.status = RadarStatus::Idle;
        }
        true
    }

    /// Returns whether the tag set changed.
    pub fn set_tags(&mut self, tags: FilterTags) -> bool {
        if self.tags == tags {
            return false;
        }
        self.tags = tags;
        true
    }

    pub fn key(&self) -> Option<SubscriptionKey> {
        self.region
            .map(|region| SubscriptionKey::new(region, self.tags.clone()))
    }

    /// Issue a new request id for the current region and tags, superseding
    /// any search still in flight.
    pub fn begin_search(&mut self, requests: &RequestCounter) -> Result<SearchTicket, RadarError> {
        let key = self
            .key()
            .ok_or_else(|| RadarError::LocationUnavailable("no region to search yet".into()))?;
        let id = requests.issue();
        self.latest_request = id;
        self.set_status(RadarStatus::Searching);
        Ok(SearchTicket { id, key })
    }

    /// Apply the result of search `id`.
    ///
    /// A response for anything but the latest request is rejected with
    /// [`RadarError::StaleResponse`] and leaves the state untouched. A
    /// successful current response replaces the whole record set; a failed
    /// one keeps the records and marks the status failed.
    pub fn complete_search(
        &mut self,
        id: RequestId,
        result: Result<Vec<PresenceRecord>, RadarError>,
    ) -> Result<usize, RadarError> {
        if id != self.latest_request {
            return Err(RadarError::StaleResponse {
                request: id,
                latest: self.latest_request,
            });
        }
        match result {
            Ok(records) => {
                self.records.replace_all(records);
                self.set_status(RadarStatus::Ready);
                Ok(self.records.len())
            }
            Err(e) => {
                self.set_status(RadarStatus::Failed(e.clone()));
                Err(e)
            }
        }
    }

    pub fn snapshot(&self, feed: FeedStatus) -> RadarSnapshot {
        RadarSnapshot {
            status: self.status.clone(),
            feed,
            region: self.region,
            tags: self.tags.clone(),
            records: self.records.to_vec(),
        }
    }
}
