pub mod circle;
pub mod goal;
pub mod journal_entry;
pub mod meditation;
pub mod user;
