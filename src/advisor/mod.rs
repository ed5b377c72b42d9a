//! Questionnaire, recommendation and follow-up chat logic, independent of the terminal.

pub mod flow;
pub mod message;
pub mod profile;
pub mod prompts;
pub mod recommendation;
pub mod session;

pub use flow::{AdvisorFlow, FlowSettings, Step};
pub use message::{ConversationLog, Message, MessageContent, Speaker};
pub use profile::Profile;
pub use recommendation::{CareerPath, RecommendationResult, University};
