pub mod resume;
pub mod sentinel;
