use super::ChatState;
use crate::core::error::AdvisorError;
use crate::display;

use console::style;

pub trait CommandHandler: Send + Sync {
    fn execute(
        &self,
        state: &mut ChatState<'_>,
        args: &[&str],
    ) -> Result<Option<String>, AdvisorError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct ProfileCommand;
pub struct HistoryCommand;
pub struct ModelCommand;

impl CommandHandler for QuitCommand {
    fn execute(
        &self,
        state: &mut ChatState<'_>,
        _args: &[&str],
    ) -> Result<Option<String>, AdvisorError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - End the session"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _state: &mut ChatState<'_>,
        _args: &[&str],
    ) -> Result<Option<String>, AdvisorError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = [
            title.to_string(),
            QuitCommand.help().to_string(),
            HelpCommand.help().to_string(),
            ProfileCommand.help().to_string(),
            HistoryCommand.help().to_string(),
            ModelCommand.help().to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for ProfileCommand {
    fn execute(
        &self,
        state: &mut ChatState<'_>,
        _args: &[&str],
    ) -> Result<Option<String>, AdvisorError> {
        Ok(Some(display::format_profile(state.flow.profile())))
    }

    fn help(&self) -> &'static str {
        "/profile - Show the answers your recommendations are based on"
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(
        &self,
        state: &mut ChatState<'_>,
        _args: &[&str],
    ) -> Result<Option<String>, AdvisorError> {
        let log = state.flow.log();
        if log.is_empty() {
            return Ok(Some("No messages yet.".to_string()));
        }
        for message in log.messages() {
            display::display_message(message);
        }
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/history - Show the whole conversation again"
    }
}

impl CommandHandler for ModelCommand {
    fn execute(
        &self,
        state: &mut ChatState<'_>,
        _args: &[&str],
    ) -> Result<Option<String>, AdvisorError> {
        Ok(Some(format!("Current model: {}", state.flow.model())))
    }

    fn help(&self) -> &'static str {
        "/model - Show the model answering your questions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::testing::ScriptedProvider;
    use crate::advisor::{AdvisorFlow, FlowSettings};
    use crate::commands::create_command_registry;
    use std::sync::Arc;

    fn flow() -> AdvisorFlow {
        let mut flow = AdvisorFlow::new(Arc::new(ScriptedProvider::new()), FlowSettings::default());
        flow.start();
        flow
    }

    #[test]
    fn quit_stops_the_loop() {
        let flow = flow();
        let mut state = ChatState::new(&flow);
        let dispatcher = create_command_registry();
        assert!(dispatcher.execute("quit", &[], &mut state).unwrap().is_none());
        assert!(!state.should_continue);
    }

    #[test]
    fn help_lists_every_command() {
        let flow = flow();
        let mut state = ChatState::new(&flow);
        let dispatcher = create_command_registry();
        let help = dispatcher.execute("help", &[], &mut state).unwrap().unwrap();
        for name in dispatcher.get_command_names() {
            assert!(help.contains(&format!("/{}", name)), "help is missing /{name}");
        }
    }

    #[test]
    fn model_reports_provider_model() {
        let flow = flow();
        let mut state = ChatState::new(&flow);
        let output = ModelCommand.execute(&mut state, &[]).unwrap().unwrap();
        assert_eq!(output, "Current model: scripted");
    }

    #[test]
    fn unknown_command_is_an_input_error() {
        let flow = flow();
        let mut state = ChatState::new(&flow);
        let err = create_command_registry()
            .execute("save", &[], &mut state)
            .unwrap_err();
        assert!(matches!(err, AdvisorError::Input(_)));
    }
}
