//! Client for the news backend's REST API, one file per resource.

mod auth;
mod client;
mod contact;
mod feeds;
mod news;
mod stats;
mod subscribers;

pub use client::NewsApi;
