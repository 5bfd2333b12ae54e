use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One direction of a follow relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendEdge {
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub accepted: bool,
}

impl FriendEdge {
    /// The user on the other end of this edge, seen from `me`.
    pub fn other(&self, me: Uuid) -> Uuid {
        if self.follower_id == me {
            self.following_id
        } else {
            self.follower_id
        }
    }
}

/// Accepted edges with mutual pairs collapsed to the first one seen.
pub fn dedup_friends(edges: &[FriendEdge]) -> Vec<FriendEdge> {
    let mut seen: HashSet<(Uuid, Uuid)> = HashSet::new();
    edges
        .iter()
        .filter(|e| e.accepted)
        .filter(|e| {
            let pair = if e.follower_id <= e.following_id {
                (e.follower_id, e.following_id)
            } else {
                (e.following_id, e.follower_id)
            };
            seen.insert(pair)
        })
        .copied()
        .collect()
}

/// A time window during which a user has a status set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusWindow {
    pub started: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl StatusWindow {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.started < now && now < self.until
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendActivity {
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub status: Option<StatusWindow>,
    pub last_active: DateTime<Utc>,
}

impl FriendActivity {
    pub fn has_active_status(&self, now: DateTime<Utc>) -> bool {
        self.status.is_some_and(|s| s.is_active(now))
    }
}

/// Friends with a live status first, then most recently active.
pub fn sort_by_activity(friends: &[FriendActivity], now: DateTime<Utc>) -> Vec<FriendActivity> {
    let mut sorted = friends.to_vec();
    sorted.sort_by(|a, b| {
        b.has_active_status(now)
            .cmp(&a.has_active_status(now))
            .then_with(|| b.last_active.cmp(&a.last_active))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn edge(from: u128, to: u128, accepted: bool) -> FriendEdge {
        FriendEdge {
            follower_id: id(from),
            following_id: id(to),
            accepted,
        }
    }

    #[test]
    fn mutual_edges_collapse() {
        let edges = vec![edge(1, 2, true), edge(2, 1, true), edge(1, 3, true)];
        let friends = dedup_friends(&edges);
        assert_eq!(friends, vec![edge(1, 2, true), edge(1, 3, true)]);
        assert_eq!(friends[1].other(id(1)), id(3));
        assert_eq!(friends[0].other(id(2)), id(1));
    }

    #[test]
    fn pending_edges_are_skipped() {
        let edges = vec![edge(1, 2, false), edge(2, 1, true)];
        assert_eq!(dedup_friends(&edges), vec![edge(2, 1, true)]);
    }

    #[test]
    fn active_status_beats_recent_activity() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let hours_ago = |h| now - chrono::Duration::hours(h);
        let busy = FriendActivity {
            user_id: id(1),
            name: "busy".into(),
            status: Some(StatusWindow {
                started: hours_ago(1),
                until: now + chrono::Duration::hours(1),
            }),
            last_active: hours_ago(10),
        };
        let expired = FriendActivity {
            user_id: id(2),
            name: "expired".into(),
            status: Some(StatusWindow {
                started: hours_ago(5),
                until: hours_ago(4),
            }),
            last_active: hours_ago(3),
        };
        let recent = FriendActivity {
            user_id: id(3),
            name: "recent".into(),
            status: None,
            last_active: hours_ago(1),
        };
        let sorted = sort_by_activity(&[expired, recent, busy], now);
        let names: Vec<&str> = sorted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["busy", "recent", "expired"]);
    }
}
