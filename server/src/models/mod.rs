mod booking;
mod event;
mod validation;

pub use booking::*;
pub use event::*;
pub use validation::*;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{EventMode, NewEvent};

    pub fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: "A day of talks and hacking".to_string(),
            image: "/images/event1.png".to_string(),
            location: "Berlin, Germany".to_string(),
            date: "2026-11-20".to_string(),
            time: "09:30".to_string(),
            mode: EventMode::Offline,
            tags: vec!["rust".to_string(), "  ".to_string(), " web ".to_string()],
        }
    }
}
