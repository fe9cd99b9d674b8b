//! # Living Tags Common Library
//!
//! Shared code for the Living Tags front-end:
//! - Data models (Text, Tag, TextTag and the joined projection)
//! - Cache event types

pub mod events;
pub mod models;
