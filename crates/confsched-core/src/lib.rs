//! confsched core types
//!
//! This crate provides the schedule model shared by the confsched parser,
//! assembler and renderers:
//!
//! - **Identifiers**: room identifiers ([`identifier::RoomId`])
//! - **Semantic**: sessions, timed items, per-room fragment lists and the
//!   extracted [`semantic::Schedule`] ([`semantic`] module)

pub mod identifier;
pub mod semantic;
