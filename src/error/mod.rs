mod itembox;

pub use itembox::ItemboxError;
