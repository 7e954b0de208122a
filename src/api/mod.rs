//! Push relay API client

mod client;

pub use client::PushClient;
