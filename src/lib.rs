//! # stratmarket - Strategy Marketplace client state
//!
//! The client-side state container behind a marketplace for browsing and
//! subscribing to algorithmic-trading strategies.
//!
//! ## Architecture
//!
//! - **App**: Application context with explicit init/teardown
//! - **State**: Centralized store, actions and subscriptions
//! - **Storage**: Persisted preference subset and storage backends
//! - **Auth**: Interface to the external authentication service
//! - **Events**: Text commands mapped onto store actions
//! - **Config**: Configuration management

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod storage;

pub use app::AppContext;
pub use config::Config;
pub use error::{Error, Result};
pub use state::{Action, Snapshot, Store, StoreState};
