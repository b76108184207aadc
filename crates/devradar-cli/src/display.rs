//! Plain-text rendering of radar snapshots.

use std::fmt::Write;

use devradar_feed::RadarSnapshot;

pub fn render(snapshot: &RadarSnapshot) -> String {
    let mut out = String::new();
    let region = snapshot
        .region
        .map(|r| r.to_string())
        .unwrap_or_else(|| "no region".to_string());
    let techs = if snapshot.tags.is_empty() {
        "any".to_string()
    } else {
        snapshot.tags.to_string()
    };
    let _ = writeln!(
        out,
        "[{}] feed {} | {} | techs: {} | {} nearby",
        snapshot.status,
        snapshot.feed,
        region,
        techs,
        snapshot.records.len()
    );
    for record in &snapshot.records {
        let _ = write!(
            out,
            "  {:<20} @{:<18} {}",
            record.display_name, record.github_username, record.coordinates
        );
        if !record.tags.is_empty() {
            let _ = write!(out, "  [{}]", record.tags.join(", "));
        }
        if let Some(bio) = record.bio.as_deref().filter(|b| !b.is_empty()) {
            let _ = write!(out, "  {bio}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use devradar_common::{Coordinates, FilterTags, PresenceRecord, RadarError, Region};
    use devradar_feed::{FeedStatus, RadarStatus};

    fn snapshot() -> RadarSnapshot {
        RadarSnapshot {
            status: RadarStatus::Ready,
            feed: FeedStatus::Subscribed,
            region: Some(Region::new(-23.55, -46.63, 0.04, 0.04).unwrap()),
            tags: FilterTags::parse("node,go"),
            records: vec![PresenceRecord {
                id: "1".into(),
                github_username: "octocat".into(),
                display_name: "Mona".into(),
                bio: Some("hi".into()),
                avatar_url: String::new(),
                tags: vec!["go".into(), "node".into()],
                coordinates: Coordinates::new(-23.5, -46.6).unwrap(),
            }],
        }
    }

    #[test]
    fn header_and_rows() {
        let text = render(&snapshot());
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("[ready] feed subscribed"));
        assert!(header.ends_with("1 nearby"));
        let row = lines.next().unwrap();
        assert!(row.contains("Mona"));
        assert!(row.contains("@octocat"));
        assert!(row.contains("[go, node]"));
        assert!(row.ends_with("hi"));
    }

    #[test]
    fn unavailable_without_region() {
        let mut snap = snapshot();
        snap.status = RadarStatus::Unavailable(RadarError::PermissionDenied);
        snap.region = None;
        snap.tags = FilterTags::default();
        snap.records.clear();
        let text = render(&snap);
        assert!(text.contains("no region"));
        assert!(text.contains("techs: any"));
        assert!(text.contains("0 nearby"));
    }
}
