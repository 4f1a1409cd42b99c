pub mod item;
pub mod message;

pub use item::{Item, ItemPayload};
pub use message::{ErrorBody, MessageBody};
