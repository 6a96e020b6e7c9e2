use jiff::tz::TimeZone;
use linkstash_core::ClickEvent;
use std::collections::{BTreeMap, HashMap};

/// Counts clicks per derived source label.
pub fn clicks_by_source(clicks: &[ClickEvent]) -> HashMap<String, u64> {
    let mut grouped: HashMap<String, u64> = HashMap::new();
    for click in clicks {
        *grouped.entry(click.source.clone()).or_default() += 1;
    }
    grouped
}

/// Counts clicks per UTC calendar date (`YYYY-MM-DD`).
pub fn clicks_by_date(clicks: &[ClickEvent]) -> BTreeMap<String, u64> {
    let mut grouped: BTreeMap<String, u64> = BTreeMap::new();
    for click in clicks {
        let date = click.timestamp.to_zoned(TimeZone::UTC).date().to_string();
        *grouped.entry(date).or_default() += 1;
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use linkstash_core::{ClickContext, ClickEvent};

    fn click(referrer: Option<&str>, timestamp: Timestamp) -> ClickEvent {
        let ctx = ClickContext {
            referrer: referrer.map(str::to_string),
            ..ClickContext::default()
        };
        ClickEvent::from_context(&ctx, timestamp)
    }

    #[test]
    fn empty_log_groups_to_nothing() {
        assert!(clicks_by_source(&[]).is_empty());
        assert!(clicks_by_date(&[]).is_empty());
    }

    #[test]
    fn groups_by_source() {
        let now = Timestamp::now();
        let clicks = vec![
            click(Some("https://www.google.com/"), now),
            click(Some("https://www.google.com/"), now),
            click(Some("https://news.ycombinator.com/"), now),
            click(None, now),
        ];

        let grouped = clicks_by_source(&clicks);
        assert_eq!(grouped.get("Google"), Some(&2));
        assert_eq!(grouped.get("news.ycombinator.com"), Some(&1));
        assert_eq!(grouped.get("Direct"), Some(&1));
    }

    #[test]
    fn groups_by_utc_date() {
        // Midnight UTC 2023-11-14.
        let day_one = Timestamp::from_second(1_699_920_000).unwrap();
        let day_two = day_one + SignedDuration::from_hours(24);
        let clicks = vec![
            click(None, day_one),
            click(None, day_one + SignedDuration::from_hours(3)),
            click(None, day_two),
        ];

        let grouped = clicks_by_date(&clicks);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get("2023-11-14"), Some(&2));
        assert_eq!(grouped.get("2023-11-15"), Some(&1));
    }

    #[test]
    fn group_counts_sum_to_total() {
        let now = Timestamp::now();
        let clicks: Vec<ClickEvent> = (0..7)
            .map(|i| {
                let referrer = if i % 2 == 0 {
                    Some("https://twitter.com/")
                } else {
                    None
                };
                click(referrer, now + SignedDuration::from_hours(i * 13))
            })
            .collect();

        let by_source: u64 = clicks_by_source(&clicks).values().sum();
        let by_date: u64 = clicks_by_date(&clicks).values().sum();
        assert_eq!(by_source, clicks.len() as u64);
        assert_eq!(by_date, clicks.len() as u64);
    }
}
