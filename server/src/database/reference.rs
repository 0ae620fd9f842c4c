use std::collections::HashMap;
use std::sync::Arc;

use futures::lock::Mutex;

use crate::models::{Booking, Event};

/// Reference implementation
#[derive(Clone, Default)]
pub struct ReferenceDb {
    pub events: Arc<Mutex<HashMap<String, Event>>>,
    pub bookings: Arc<Mutex<HashMap<String, Booking>>>,
}
