//! Quote negotiation: price evaluation against guardrails and per-quote sessions

pub mod calculator;
pub mod engine;
pub mod session;
pub mod types;

pub use calculator::{evaluate, evaluate_negotiation};
pub use engine::NegotiationEngine;
pub use session::NegotiationSession;
pub use types::{
    AcceptedQuote, NegotiationInput, NegotiationRequest, NegotiationResult, NegotiationState,
    Proposal, ViolatedConstraint,
};
