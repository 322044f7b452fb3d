//! LLM integration module

pub mod agent;
pub mod client;
pub mod prompts;

pub use agent::CareerAgent;
pub use client::{ChatModel, LlmClient, LlmSettings};
pub use prompts::{Persona, Recipient};

#[cfg(test)]
pub(crate) mod scripted;
