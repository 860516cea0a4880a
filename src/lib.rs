//! Real-time chat relay server library.
//!
//! The core tracks connected sessions, validates and classifies inbound
//! envelopes, and fans resulting events out to every subscribed connection
//! over two broadcast topics (`public` and `user-count`).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
