pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::advisor::AdvisorFlow;
pub use dispatcher::{CommandDispatcher, create_command_registry};

/// What a slash command may see and change while the chat is running.
pub struct ChatState<'a> {
    pub flow: &'a AdvisorFlow,
    pub should_continue: bool,
}

impl<'a> ChatState<'a> {
    pub fn new(flow: &'a AdvisorFlow) -> Self {
        Self {
            flow,
            should_continue: true,
        }
    }
}

/// Splits `/name arg1 arg2` into the command name and its arguments.
pub fn parse_command(input: &str) -> Option<(&str, Vec<&str>)> {
    let rest = input.trim().strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.collect()))
}
