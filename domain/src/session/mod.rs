//! Conversation domain.
//!
//! - [`entities::Message`]: a single role-tagged turn
//! - [`entities::Role`]: system / user / assistant

pub mod entities;
