//! Local rule-based answers.
//!
//! - `KnowledgeMatcher`: first-match substring lookup over an ordered table
//! - `defaults`: the built-in table and default answer

pub mod defaults;
pub mod matcher;
