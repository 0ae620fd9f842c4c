use crate::analytics::AnalyticsConfig;
use crate::models::Event;

use super::escape;

pub const SITE_NAME: &str = "DevEvent";
pub const SITE_DESCRIPTION: &str = "The Hub for every dev event you mustn't miss";

const POSTER_WIDTH: u32 = 410;
const POSTER_HEIGHT: u32 = 300;

/// Top navigation shared by every page
pub fn navbar() -> String {
    format!(
        r#"<header>
  <nav>
    <a href="/" class="logo">
      <img src="/icons/logo.svg" alt="logo" width="40" height="40">
      <p>{SITE_NAME}</p>
    </a>
    <ul>
      <li><a href="/">Home</a></li>
      <li><a href="/#events">Events</a></li>
      <li><a href="/">Create Events</a></li>
    </ul>
  </nav>
</header>"#
    )
}

/// Poster card linking to the event's detail page
pub fn event_card(event: &Event) -> String {
    format!(
        r#"<a href="{href}" class="event-card">
  <img src="{image}" alt="{title}" width="{POSTER_WIDTH}" height="{POSTER_HEIGHT}" class="poster" loading="lazy">
  <p class="title">{title}</p>
  <div class="datetime">
    <p>{date}</p>
    <p>{time}</p>
  </div>
  <p class="location">{location}</p>
</a>"#,
        href = escape(&event.href()),
        image = escape(&event.image),
        title = escape(&event.title),
        date = escape(&event.date),
        time = escape(&event.time),
        location = escape(&event.location),
    )
}

/// Full HTML document around `body`; `title` of `None` shows the bare site name
pub(crate) fn layout(title: Option<&str>, analytics: &AnalyticsConfig, body: &str) -> String {
    let title = match title {
        Some(title) => format!("{} | {SITE_NAME}", escape(title)),
        None => SITE_NAME.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <meta name="description" content="{description}">
  <link rel="stylesheet" href="/globals.css">
  {analytics}
</head>
<body class="min-h-screen antialiased">
{navbar}
<main>
{body}
</main>
</body>
</html>
"#,
        description = escape(SITE_DESCRIPTION),
        analytics = analytics.snippet(),
        navbar = navbar(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::new_event;
    use chrono::Utc;

    #[test]
    fn card_links_to_detail_page() {
        let event = new_event("Rust <Meetup>").validate(Utc::now()).unwrap();
        let card = event_card(&event);

        assert!(card.contains(r#"href="/events/rust-meetup""#));
        assert!(card.contains(r#"alt="Rust &lt;Meetup&gt;""#));
        assert!(card.contains(r#"width="410" height="300""#));
        assert!(card.contains(r#"<p class="title">Rust &lt;Meetup&gt;</p>"#));
        assert!(!card.contains("<Meetup>"));
    }

    #[test]
    fn navbar_has_site_links() {
        let nav = navbar();
        assert!(nav.contains("<p>DevEvent</p>"));
        for label in ["Home", "Events", "Create Events"] {
            assert!(nav.contains(&format!(">{label}</a>")));
        }
    }

    #[test]
    fn layout_includes_analytics_only_when_enabled() {
        let page = layout(None, &AnalyticsConfig::default(), "<p>hi</p>");
        assert!(page.contains("<title>DevEvent</title>"));
        assert!(!page.contains("array.js"));

        let analytics = AnalyticsConfig::new(Some("phc_abc".into()), None);
        let page = layout(Some("Rust & Friends"), &analytics, "");
        assert!(page.contains("<title>Rust &amp; Friends | DevEvent</title>"));
        assert!(page.contains("/ingest/static/array.js"));
    }
}
