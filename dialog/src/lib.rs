//! # dialog
//!
//! Conversation core of the work-board bot: per-user state machine for job search, vacancy
//! creation and the profile form.
//!
//! ## Modules
//!
//! - [`catalog`] – Categories, subcategories, cities; built-in default or TOML file
//! - [`callback`] – Button token codec ([`Action`], [`SearchKind`])
//! - [`session`] – [`Session`], [`DialogState`], drafts
//! - [`lifecycle`] – [`PendingMessages`], ephemeral wizard messages
//! - [`effect`] – [`Effect`], [`PersistOp`]
//! - [`engine`] – [`DialogEngine`], pure transition function
//! - [`views`] – Texts and keyboards
//! - [`store`] – [`SessionStore`], per-identity locking
//! - [`executor`] – [`EffectExecutor`]
//! - [`service`] – [`DialogService`], lock → transition → execute

pub mod callback;
pub mod catalog;
pub mod effect;
pub mod engine;
pub mod event;
pub mod executor;
pub mod lifecycle;
pub mod service;
pub mod session;
pub mod store;
pub mod views;

pub use callback::{Action, CallbackError, SearchKind, MAX_CALLBACK_BYTES};
pub use catalog::{Catalog, CatalogError, Category};
pub use effect::{Effect, PersistOp};
pub use engine::{DialogEngine, EngineSettings, Transition};
pub use event::{Event, Inbound};
pub use executor::{EffectExecutor, ExecutionError, ExecutionReport};
pub use lifecycle::PendingMessages;
pub use service::DialogService;
pub use session::{DialogState, JobDraft, SearchFilters, Session};
pub use store::SessionStore;
