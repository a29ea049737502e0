pub mod event;

pub use event::{Event, EventPatch, EventStatus, InvalidStatus, NewEvent};
