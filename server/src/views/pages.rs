use crate::analytics::AnalyticsConfig;
use crate::models::Event;

use super::components::{event_card, layout};
use super::escape;

/// Outcome of a booking form submission, shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Booked,
    Rejected(String),
}

/// Landing page listing featured events
pub fn home_page(events: &[Event], analytics: &AnalyticsConfig) -> String {
    let cards = if events.is_empty() {
        r#"<li class="empty">No events yet. Check back soon.</li>"#.to_string()
    } else {
        events
            .iter()
            .map(|event| format!("<li>{}</li>", event_card(event)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r##"<section>
  <h1 class="text-center">The Hub for Every Dev<br>Event you can&#x27;t miss</h1>
  <p class="text-center mt-5">Hackathons, Meetups and Conferences, All in one place</p>
  <a href="#events" id="explore-btn" class="mt-7 mx-auto">Explore Events</a>
  <div id="events" class="mt-20 space-y-7">
    <h3>Featured Events</h3>
    <ul class="events">
{cards}
    </ul>
  </div>
</section>"##
    );

    layout(None, analytics, &body)
}

/// Detail page for a single event, with its booking form
pub fn event_page(
    event: &Event,
    bookings: u64,
    notice: Option<&Notice>,
    analytics: &AnalyticsConfig,
) -> String {
    let tags = event
        .tags
        .iter()
        .map(|tag| format!(r#"<li class="pill">{}</li>"#, escape(tag)))
        .collect::<String>();

    let notice = match notice {
        Some(Notice::Booked) => {
            r#"<p class="notice success">Thank you for signing up!</p>"#.to_string()
        }
        Some(Notice::Rejected(reason)) => {
            format!(r#"<p class="notice error">{}</p>"#, escape(reason))
        }
        None => String::new(),
    };

    let attendees = match bookings {
        0 => "Be the first to book your spot!".to_string(),
        1 => "Join 1 person who has already booked their spot!".to_string(),
        n => format!("Join {n} people who have already booked their spot!"),
    };

    let body = format!(
        r#"<section id="event">
  <div class="header">
    <h1>{title}</h1>
    <p>{description}</p>
  </div>
  <div class="details">
    <img src="{image}" alt="{title}" width="800" height="800" class="banner">
    <ul class="event-details">
      <li><span>Date</span> {date}</li>
      <li><span>Time</span> {time}</li>
      <li><span>Location</span> {location}</li>
      <li><span>Mode</span> {mode}</li>
    </ul>
    <ul class="tags">{tags}</ul>
  </div>
  <aside class="booking">
    <h2>Book Your Spot</h2>
    <p class="text-sm">{attendees}</p>
    {notice}
    <form method="post" action="{action}">
      <label for="email">Email Address</label>
      <input type="email" id="email" name="email" placeholder="Enter your email address" required>
      <button type="submit" class="button-submit">Submit</button>
    </form>
  </aside>
</section>"#,
        title = escape(&event.title),
        description = escape(&event.description),
        image = escape(&event.image),
        date = escape(&event.date),
        time = escape(&event.time),
        location = escape(&event.location),
        mode = event.mode.label(),
        action = escape(&format!("{}/book", event.href())),
    );

    layout(Some(&event.title), analytics, &body)
}

pub fn not_found_page(analytics: &AnalyticsConfig) -> String {
    let body = r#"<section class="not-found">
  <h1>Event not found</h1>
  <p>The event you are looking for does not exist or has been removed.</p>
  <a href="/">Back to all events</a>
</section>"#;

    layout(Some("Not found"), analytics, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::new_event;
    use chrono::Utc;

    #[test]
    fn home_lists_each_event() {
        let events = vec![
            new_event("Rust Meetup").validate(Utc::now()).unwrap(),
            new_event("Hack Night").validate(Utc::now()).unwrap(),
        ];
        let page = home_page(&events, &AnalyticsConfig::default());

        assert!(page.contains("Featured Events"));
        assert!(page.contains(r#"href="/events/rust-meetup""#));
        assert!(page.contains(r#"href="/events/hack-night""#));
        assert!(!page.contains("No events yet"));
    }

    #[test]
    fn home_without_events() {
        let page = home_page(&[], &AnalyticsConfig::default());
        assert!(page.contains("No events yet"));
    }

    #[test]
    fn event_page_shows_details_and_notice() {
        let event = new_event("Rust Meetup").validate(Utc::now()).unwrap();

        let page = event_page(&event, 0, None, &AnalyticsConfig::default());
        assert!(page.contains("<h1>Rust Meetup</h1>"));
        assert!(page.contains("<title>Rust Meetup | DevEvent</title>"));
        assert!(page.contains(r#"action="/events/rust-meetup/book""#));
        assert!(page.contains("Be the first"));
        assert!(page.contains(r#"<li class="pill">rust</li>"#));

        let rejected = Notice::Rejected("Invalid email format".into());
        let page = event_page(&event, 3, Some(&rejected), &AnalyticsConfig::default());
        assert!(page.contains("Join 3 people"));
        assert!(page.contains(r#"<p class="notice error">Invalid email format</p>"#));

        let page = event_page(&event, 1, Some(&Notice::Booked), &AnalyticsConfig::default());
        assert!(page.contains("Thank you for signing up!"));
    }

    #[test]
    fn event_named_after_site_keeps_suffix() {
        let event = new_event("DevEvent").validate(Utc::now()).unwrap();
        let page = event_page(&event, 0, None, &AnalyticsConfig::default());
        assert!(page.contains("<title>DevEvent | DevEvent</title>"));

        let page = home_page(&[event], &AnalyticsConfig::default());
        assert!(page.contains("<title>DevEvent</title>"));
    }
}
