pub mod admin;
pub mod auth;
pub mod circles;
pub mod goals;
pub mod health;
pub mod insights;
pub mod journal;
pub mod meditations;
pub mod therapist;
