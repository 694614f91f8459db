// Mention and sentiment domain
pub mod mention;
pub mod sentiment;
pub mod theme;

// Strategy output domain
pub mod strategy;

// Session feedback (caller-owned, never process-global)
pub mod feedback;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
