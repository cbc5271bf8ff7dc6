//! # dbot-core
//!
//! Core types and traits for the Telegram bot: [`Bot`], [`Handler`], inbound [`Update`], inline
//! [`Keyboard`], user and chat types, and tracing initialization. Transport-agnostic; used by
//! dbot-telegram, handler-chain and dialog.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    parse_command, Button, Chat, Handler, HandlerResponse, Keyboard, MessageId, ToCoreUpdate,
    ToCoreUser, Update, UpdateKind, User,
};
