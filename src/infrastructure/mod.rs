pub mod core;
pub mod enhancer;
pub mod export;
pub mod nlp;
pub mod observability;
pub mod sources;
