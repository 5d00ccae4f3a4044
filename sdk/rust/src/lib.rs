//! Client for the contact intake service.

pub mod client;

pub use client::{ContactClient, ContactForm, SubmitOutcome};
