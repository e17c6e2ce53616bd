pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod mentor_actions;
pub mod mentors;
pub mod metrics;
pub mod notifications;
pub mod requests;
pub mod startups;
pub mod submissions;
pub mod swagger;
