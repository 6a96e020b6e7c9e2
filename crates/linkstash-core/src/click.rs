use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use url::Url;

/// Client-side context captured at click time.
///
/// All fields are best-effort; the derived [`ClickEvent`] fills in
/// placeholders for anything missing.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ClickContext {
    /// The client's user agent string, if known.
    #[builder(default, setter(strip_option, into))]
    pub user_agent: Option<String>,
    /// The referrer URL, if any.
    #[builder(default, setter(strip_option, into))]
    pub referrer: Option<String>,
    /// The client's local UTC offset in minutes (east positive).
    #[builder(default)]
    pub utc_offset_minutes: i32,
}

/// One recorded visit to a short link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// When the click was recorded.
    pub timestamp: Timestamp,
    /// The client's user agent, or `"Unknown"`.
    pub user_agent: String,
    /// The referrer URL, or `"Direct"`.
    pub referrer: String,
    /// Traffic source derived from the referrer host.
    pub source: String,
    /// Coarse location derived from the client's UTC offset.
    ///
    /// This is a simulated approximation, not real geolocation.
    pub location: String,
}

impl ClickEvent {
    /// Builds a click event from the client context at the given instant.
    pub fn from_context(ctx: &ClickContext, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            user_agent: ctx
                .user_agent
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            referrer: ctx.referrer.clone().unwrap_or_else(|| "Direct".to_string()),
            source: click_source(ctx.referrer.as_deref()),
            location: approximate_location(ctx.utc_offset_minutes),
        }
    }
}

/// Derives a traffic source label from the referrer.
///
/// Well-known referrer hosts map to brand names; other parseable hosts
/// are returned verbatim. No referrer means direct traffic.
pub fn click_source(referrer: Option<&str>) -> String {
    let Some(referrer) = referrer.filter(|r| !r.is_empty()) else {
        return "Direct".to_string();
    };

    let Some(hostname) = Url::parse(referrer)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
    else {
        return "Unknown".to_string();
    };

    for (needle, brand) in [
        ("google", "Google"),
        ("facebook", "Facebook"),
        ("twitter", "Twitter"),
        ("linkedin", "LinkedIn"),
    ] {
        if hostname.contains(needle) {
            return brand.to_string();
        }
    }

    hostname
}

/// Maps a UTC offset (minutes, east positive) to a coarse region label.
///
/// This is a simulated stand-in for geolocation: only a handful of
/// offsets map to named regions, everything else falls back to `UTC±N`.
pub fn approximate_location(offset_minutes: i32) -> String {
    match offset_minutes {
        -480 => "Pacific Time (US)".to_string(),
        -420 => "Mountain Time (US)".to_string(),
        -360 => "Central Time (US)".to_string(),
        -300 => "Eastern Time (US)".to_string(),
        0 => "Greenwich Mean Time".to_string(),
        60 => "Central European Time".to_string(),
        330 => "India Standard Time".to_string(),
        540 => "Japan Standard Time".to_string(),
        other => {
            let sign = if other >= 0 { '+' } else { '-' };
            let hours = other.abs() / 60;
            let minutes = other.abs() % 60;
            if minutes == 0 {
                format!("UTC{}{}", sign, hours)
            } else {
                format!("UTC{}{}:{:02}", sign, hours, minutes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_direct_for_missing_referrer() {
        assert_eq!(click_source(None), "Direct");
        assert_eq!(click_source(Some("")), "Direct");
    }

    #[test]
    fn source_unknown_for_unparseable_referrer() {
        assert_eq!(click_source(Some("not a url")), "Unknown");
    }

    #[test]
    fn source_maps_well_known_brands() {
        assert_eq!(click_source(Some("https://www.google.com/search")), "Google");
        assert_eq!(click_source(Some("https://m.facebook.com/")), "Facebook");
        assert_eq!(click_source(Some("https://twitter.com/x")), "Twitter");
        assert_eq!(click_source(Some("https://www.linkedin.com/feed")), "LinkedIn");
    }

    #[test]
    fn source_falls_back_to_hostname() {
        assert_eq!(click_source(Some("https://news.ycombinator.com/")), "news.ycombinator.com");
    }

    #[test]
    fn location_named_regions() {
        assert_eq!(approximate_location(-480), "Pacific Time (US)");
        assert_eq!(approximate_location(0), "Greenwich Mean Time");
        assert_eq!(approximate_location(330), "India Standard Time");
    }

    #[test]
    fn location_utc_fallback() {
        assert_eq!(approximate_location(120), "UTC+2");
        assert_eq!(approximate_location(600), "UTC+10");
        assert_eq!(approximate_location(-210), "UTC-3:30");
        assert_eq!(approximate_location(345), "UTC+5:45");
    }

    #[test]
    fn event_from_empty_context() {
        let now = Timestamp::now();
        let event = ClickEvent::from_context(&ClickContext::default(), now);
        assert_eq!(event.timestamp, now);
        assert_eq!(event.user_agent, "Unknown");
        assert_eq!(event.referrer, "Direct");
        assert_eq!(event.source, "Direct");
        assert_eq!(event.location, "Greenwich Mean Time");
    }

    #[test]
    fn event_from_full_context() {
        let ctx = ClickContext::builder()
            .user_agent("Mozilla/5.0")
            .referrer("https://www.google.com/")
            .utc_offset_minutes(-300)
            .build();

        let event = ClickEvent::from_context(&ctx, Timestamp::now());
        assert_eq!(event.user_agent, "Mozilla/5.0");
        assert_eq!(event.referrer, "https://www.google.com/");
        assert_eq!(event.source, "Google");
        assert_eq!(event.location, "Eastern Time (US)");
    }
}
