pub mod router;
pub mod routes;

pub use router::{ItemboxState, itembox_router};
