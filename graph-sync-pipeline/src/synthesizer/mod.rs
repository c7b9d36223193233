//! Synthesizer module for the graph sync pipeline.
//!
//! Collapses a transaction's change set into document actions.

mod action_synthesizer;

pub use action_synthesizer::ActionSynthesizer;
