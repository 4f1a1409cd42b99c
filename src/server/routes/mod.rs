pub mod extract;
pub mod items;
