pub mod access;
pub mod aggregation;
pub mod calendar;
pub mod circles;
pub mod mood;
