//! Types for workshops

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled workshop as seen by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    pub uuid: String,
    pub title: String,

    /// Unix seconds
    pub timestamp_start: i64,

    /// Unix seconds
    pub timestamp_end: i64,

    #[serde(default)]
    pub instructors: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub required_quizzes: Vec<String>,

    pub capacity: u32,

    #[serde(default)]
    pub signups: u32,

    /// Zero-based roster/waitlist rank, `-1` when not registered
    #[serde(default = "not_registered")]
    pub position: i64,
}

fn not_registered() -> i64 {
    -1
}

impl Workshop {
    /// Whether the viewing user holds a spot or waitlist place
    pub fn is_registered(&self) -> bool {
        self.position >= 0
    }

    /// Whether every slot is taken; further RSVPs join the waitlist
    pub fn is_full(&self) -> bool {
        self.signups >= self.capacity
    }

    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.timestamp_start, 0).single()
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.timestamp_end, 0).single()
    }

    /// A workshop stays "upcoming" for a day after it starts so same-day
    /// sessions are still offered
    pub fn has_passed(&self, now: DateTime<Utc>) -> bool {
        match self.starts_at() {
            Some(start) => start + Duration::hours(24) < now,
            None => false,
        }
    }
}

/// Body of the RSVP and cancel routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRequest {
    pub workshop_uuid: String,
    pub user_uuid: String,
}
