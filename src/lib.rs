//! # logsim - Rate-Controlled Synthetic Log Generator
//!
//! Writes realistic system, error, application and access log lines to one
//! file per category, at rates adjustable while running.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                             logsim                                │
//! │                                                                   │
//! │   HTTP (axum)                         Emission Loop (tokio task)  │
//! │   ┌───────────────┐   set_rates   ┌──────────┐   get_rates        │
//! │   │ /update_rates │──────────────▶│RateStore │◀────────────┐      │
//! │   │ /get_rates    │◀──────────────│          │             │      │
//! │   └───────────────┘               └──────────┘      ┌──────┴────┐ │
//! │                                                     │ Scan      │ │
//! │                                                     │ Emit      │ │
//! │                                                     │ Idle      │ │
//! │                                                     └──────┬────┘ │
//! │                                 generator::generate        │      │
//! │                                 ┌───────────────┐          │      │
//! │                                 │  Synthesizer  │◀─────────┤      │
//! │                                 └───────────────┘          ▼      │
//! │                                                   ┌──────────────┐│
//! │                                                   │   LogSink    ││
//! │                                                   │ <cat>.log    ││
//! │                                                   └──────────────┘│
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rates
//!
//! Integers in [0, 100]. A category at rate `r` emits about `r / 10` lines per
//! second; 0 turns it off. Out-of-range updates are clamped.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logsim::{Category, EmissionLoop, FileSink, Rate, RateStore, Rotation};
//!
//! # async fn run() {
//! let store = RateStore::new();
//! store.set_rate(Category::Access, Rate::clamped(80));
//!
//! let engine = EmissionLoop::new(store.clone(), FileSink::new("logs", Rotation::Never));
//! let cancel = engine.cancellation();
//! let handle = engine.spawn();
//!
//! // ... later
//! cancel.cancel();
//! let _ = handle.await;
//! # }
//! ```

// Core types - single source of truth
pub mod core;
pub mod error;

// Shared rate table
pub mod rates;

// Line synthesis
pub mod generator;

// Destinations
pub mod sink;

// Emission loop
pub mod engine;

// Settings and HTTP control surface
pub mod api;
pub mod config;

pub use api::{AppState, RatesResponse, build_router};
pub use config::SimConfig;
pub use crate::core::{Category, LogLine, Rate, RateTable};
pub use engine::{EmissionLoop, EngineStats, LoopState, StatsSnapshot};
pub use error::{SimError, SimResult};
pub use generator::{generate, generate_named};
pub use rates::RateStore;
pub use sink::{FileSink, LogSink, MemorySink, Rotation};
