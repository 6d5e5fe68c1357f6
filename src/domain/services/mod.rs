//! Domain services - Pure text and phrasing rules

pub mod battle_messages;
pub mod text;
