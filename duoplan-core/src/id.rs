//! Client-side id generation. Ids only need to be unique within their
//! containing day or document, so random tokens suffice.

use uuid::Uuid;

const EVENT_ID_LEN: usize = 13;

pub fn new_event_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(EVENT_ID_LEN);
    id
}

pub fn new_day_id() -> String {
    format!("day-{}", Uuid::new_v4().simple())
}
