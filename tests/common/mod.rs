//! Shared helpers for end-to-end tests.

#![allow(dead_code)]

mod fakes;
mod server;

pub use fakes::{FakeGemini, FakeSpotify, GeminiBehavior, GeminiCall};
pub use server::TestServer;
