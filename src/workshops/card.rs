//! Workshop listing view models

use chrono::{DateTime, TimeZone, Utc};

use super::Workshop;

/// Upcoming and previous workshops, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct WorkshopSchedule<'a> {
    /// In server order
    pub upcoming: Vec<&'a Workshop>,
    /// Most recently listed first
    pub previous: Vec<&'a Workshop>,
}

impl WorkshopSchedule<'_> {
    /// Text shown when nothing is coming up
    pub const NO_UPCOMING: &'static str = "No upcoming workshops!";
}

/// Split `workshops` around `now`
pub fn partition_workshops(workshops: &[Workshop], now: DateTime<Utc>) -> WorkshopSchedule<'_> {
    let mut upcoming = Vec::new();
    let mut previous = Vec::new();

    for workshop in workshops {
        if workshop.has_passed(now) {
            previous.push(workshop);
        } else {
            upcoming.push(workshop);
        }
    }
    previous.reverse();

    WorkshopSchedule { upcoming, previous }
}

/// What the card's button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Rsvp,
    CancelRsvp,
    /// No button, "This workshop has passed."
    Passed,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Rsvp => "RSVP",
            CardAction::CancelRsvp => "Cancel RSVP",
            CardAction::Passed => "This workshop has passed.",
        }
    }
}

/// Display values for one workshop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopCard {
    pub uuid: String,
    pub title: String,
    /// e.g. `3/14/2025`
    pub date: String,
    /// e.g. `6:00 PM - 8:00 PM`
    pub time_range: String,
    pub instructors: String,
    pub description: String,
    pub required_quizzes: String,
    /// `{signups} / {capacity} slots`
    pub signups: String,
    /// One-based rank when registered
    pub position: Option<u32>,
    /// Shows the waitlist notice
    pub full: bool,
    pub action: CardAction,
}

impl WorkshopCard {
    /// Build the card, formatting times in `tz`
    pub fn new<Tz: TimeZone>(workshop: &Workshop, is_past: bool, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let start = workshop.starts_at().map(|t| t.with_timezone(tz));
        let end = workshop.ends_at().map(|t| t.with_timezone(tz));

        let date = start
            .as_ref()
            .map(|t| t.format("%-m/%-d/%Y").to_string())
            .unwrap_or_default();
        let time_range = match (&start, &end) {
            (Some(s), Some(e)) => format!("{} - {}", s.format("%-I:%M %p"), e.format("%-I:%M %p")),
            _ => String::new(),
        };

        let action = if is_past {
            CardAction::Passed
        } else if workshop.is_registered() {
            CardAction::CancelRsvp
        } else {
            CardAction::Rsvp
        };

        Self {
            uuid: workshop.uuid.clone(),
            title: workshop.title.clone(),
            date,
            time_range,
            instructors: workshop.instructors.clone(),
            description: workshop.description.clone(),
            required_quizzes: workshop.required_quizzes.join(", "),
            signups: format!("{} / {} slots", workshop.signups, workshop.capacity),
            position: u32::try_from(workshop.position).ok().and_then(|p| p.checked_add(1)),
            full: workshop.is_full(),
            action,
        }
    }
}

/// Cards for a whole schedule
pub fn schedule_cards<Tz: TimeZone>(schedule: &WorkshopSchedule<'_>, tz: &Tz) -> (Vec<WorkshopCard>, Vec<WorkshopCard>)
where
    Tz::Offset: std::fmt::Display,
{
    let upcoming = schedule.upcoming.iter().map(|w| WorkshopCard::new(w, false, tz)).collect();
    let previous = schedule.previous.iter().map(|w| WorkshopCard::new(w, true, tz)).collect();
    (upcoming, previous)
}
