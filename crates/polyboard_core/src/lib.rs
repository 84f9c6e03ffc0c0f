//! Polyboard core - session orchestration for multi-variant board games
//!
//! Lets a human play any variant an [`Engine`] offers against a background
//! search, without per-variant code in the orchestration layer.
//!
//! # Architecture
//!
//! - **Registry**: variants and their static metadata
//! - **Codec**: textual move grammar, delegated to the engine
//! - **Session**: the live board and its single analysis slot
//! - **Lifecycle**: parse, validate, legality-check, apply
//! - **Analysis**: one background worker per session with wake/kill signalling
//! - **Controller**: facade that drives a [`Presentation`]
//!
//! Human moves and computer moves never overlap: a human move is refused
//! with `Busy` while a request is outstanding, and only one request may be
//! outstanding per session.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analysis;
mod codec;
mod controller;
mod engine;
mod error;
mod lifecycle;
mod presentation;
mod registry;
mod session;

// Crate-level exports - Engine boundary
pub use engine::{Engine, GamePosition, Move, SearchLimits, SearchReport};

// Crate-level exports - Errors
pub use error::{SessionError, SessionErrorKind};

// Crate-level exports - Catalog and grammar
pub use codec::MoveCodec;
pub use registry::{VariantDescriptor, VariantRegistry};

// Crate-level exports - Sessions and moves
pub use lifecycle::{AppliedMove, MoveLifecycle, MoveOutcome, MoveStage};
pub use session::{AnalysisPhase, AnalysisRequest, BoardSession, BoardView, GameEnd, SessionId};

// Crate-level exports - Background analysis
pub use analysis::{AnalysisCoordinator, AnalysisEvent, AnalysisKind, AnalysisReport};

// Crate-level exports - Controller and presentation
pub use controller::{
    ControlOutcome, DEFAULT_SEARCH_DEPTH, DEFAULT_SEARCH_TIME_SECS, SearchSettings,
    SessionController,
};
pub use presentation::Presentation;
