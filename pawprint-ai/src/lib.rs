//! pawprint-ai library interface
//!
//! Evidence-fusion scoring engine: turns heterogeneous, individually
//! unreliable signals about a piece of media into one calibrated
//! synthetic-content probability plus an ordered trace of notes.
//!
//! Layers, leaves first:
//! - [`stats`]: feature statistics over embedding vectors
//! - [`scorers`]: one bucket scorer per evidence family
//! - [`gates`]: style/context and impossible-scenario gates
//! - [`fusion`]: the evidence fusion engine
//! - [`composite`]: fixed-weight composite score for reporting
//! - [`service`]: provider fan-out with timeouts and a per-content report cache

pub mod composite;
pub mod error;
pub mod fusion;
pub mod gates;
pub mod models;
pub mod params;
pub mod scorers;
pub mod service;
pub mod stats;
pub mod vocabulary;

pub use crate::error::{ProviderError, ScorerError};
pub use crate::fusion::FusionEngine;
pub use crate::models::{EvidenceReport, EvidenceVector};
pub use crate::params::ThresholdConfig;
