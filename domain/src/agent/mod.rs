//! Agent personas.
//!
//! - [`role::AgentRole`]: the six consultation roles and their instructions

pub mod role;
