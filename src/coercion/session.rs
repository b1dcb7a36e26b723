use chrono::{DateTime, Timelike, Utc};

use crate::types::Session;

//NOTE: First hit wins. The specific New York windows must precede the generic "ny"/"us" keywords.
const SESSION_KEYWORDS: [(&[&str], Session); 6] = [
    (&["asia", "tokyo"], Session::Tokyo),
    (&["ldn", "london"], Session::London),
    (&["ny am", "new york am", "new_york_am"], Session::NewYorkAm),
    (&["ny pm", "new york pm", "new_york_pm"], Session::NewYorkPm),
    (&["off"], Session::OffHours),
    (&["ny", "new york", "us"], Session::NewYorkAm)
];

const EASTERN_OFFSET_MINUTES: i64 = 5 * 60;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Maps free-text session names onto the session enum.
///
/// Returns `None` for unrecognised text so the session can be detected from
/// the entry time instead.
pub fn parse_session(cell: &str) -> Option<Session> {
    let cell = cell.to_lowercase();

    SESSION_KEYWORDS.iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| cell.contains(keyword)))
        .map(|(_, session)| *session)
}

/// Buckets an entry time into a session using its clock time at UTC-5.
pub fn detect_session(entry_time: DateTime<Utc>) -> Session {
    //NOTE: A fixed five hour shift with no daylight saving adjustment. During US summer time
    //      every entry is bucketed one hour early; kept as-is so results match existing journals.
    let minutes = i64::from(entry_time.hour() * 60 + entry_time.minute());
    let hour = (minutes - EASTERN_OFFSET_MINUTES).rem_euclid(MINUTES_PER_DAY) as f64 / 60.0;

    if hour >= 20.0 {
        Session::Tokyo
    } else if (2.0..5.0).contains(&hour) {
        Session::London
    } else if (8.5..11.0).contains(&hour) {
        Session::NewYorkAm
    } else if (13.0..16.0).contains(&hour) {
        Session::NewYorkPm
    } else {
        Session::OffHours
    }
}
