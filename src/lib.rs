//! SmartCareer Advisor: a guided questionnaire that asks Gemini for career and
//! university recommendations, then keeps a chat open for follow-up questions.

pub mod advisor;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod input;
pub mod providers;

pub use advisor::{AdvisorFlow, FlowSettings, Step};
pub use crate::core::error::AdvisorError;
