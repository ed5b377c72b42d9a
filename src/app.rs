use crate::advisor::{AdvisorFlow, FlowSettings, Speaker, Step, prompts};
use crate::advisor::profile::{BUDGET_OPTIONS, INTEREST_OPTIONS, SUBJECT_OPTIONS};
use crate::commands::{ChatState, CommandDispatcher, parse_command};
use crate::config::Config;
use crate::core::error::AdvisorError;
use crate::display;
use crate::input::{self, AdvisorEditor};
use crate::providers::LLMProvider;
use std::future::Future;
use std::sync::Arc;

/// Result of handling one line typed at the current prompt
enum LineOutcome {
    Continue,
    Quit,
}

pub struct Application {
    pub flow: AdvisorFlow,
    pub command_dispatcher: CommandDispatcher,
    rendered: usize,
}

impl Application {
    pub fn new(
        config: &Config,
        provider: Arc<dyn LLMProvider>,
        command_dispatcher: CommandDispatcher,
    ) -> Self {
        let settings = FlowSettings {
            recommendation_temperature: config.recommendation_temperature,
            chat_temperature: config.chat_temperature,
        };
        Self {
            flow: AdvisorFlow::new(provider, settings),
            command_dispatcher,
            rendered: 0,
        }
    }

    pub async fn run(&mut self) -> Result<(), AdvisorError> {
        let mut editor = input::create_editor(self.command_dispatcher.get_command_names())?;

        self.flow.start();
        self.render_new_messages();
        display::display_hint(
            "Pick options by number (e.g. `1 3`) or type your own answer. \
             Press Enter on an empty line to continue, /quit to exit.",
        );

        let mut shown_step = None;
        loop {
            let step = self.flow.step();
            if step.is_collecting() && shown_step != Some(step) {
                self.show_question(&mut editor);
                shown_step = Some(step);
            }

            let outcome = match step {
                Step::Greeting => {
                    self.flow.start();
                    LineOutcome::Continue
                }
                Step::Subjects | Step::Interests | Step::Budget => {
                    self.handle_question_line(&mut editor).await?
                }
                Step::Chatting => self.handle_chat_line(&mut editor).await?,
                Step::Generating => {
                    return Err(AdvisorError::Input(
                        "recommendation request still in flight".to_string(),
                    ));
                }
            };

            if let LineOutcome::Quit = outcome {
                break;
            }
        }

        Ok(())
    }

    fn show_question(&self, editor: &mut AdvisorEditor) {
        let profile = self.flow.profile();
        let budget = [profile.budget.clone()];
        let (title, options, selected): (&str, &[&str], &[String]) = match self.flow.step() {
            Step::Subjects => (prompts::SUBJECTS_TITLE, SUBJECT_OPTIONS, profile.subjects.as_slice()),
            Step::Interests => (prompts::INTERESTS_TITLE, INTEREST_OPTIONS, profile.interests.as_slice()),
            _ => (prompts::BUDGET_TITLE, BUDGET_OPTIONS, budget.as_slice()),
        };
        display::display_options(title, options, selected);
        input::set_options(editor, options);
    }

    fn current_options(&self) -> &'static [&'static str] {
        match self.flow.step() {
            Step::Subjects => SUBJECT_OPTIONS,
            Step::Interests => INTEREST_OPTIONS,
            _ => BUDGET_OPTIONS,
        }
    }

    async fn handle_question_line(
        &mut self,
        editor: &mut AdvisorEditor,
    ) -> Result<LineOutcome, AdvisorError> {
        let Some(line) = input::read_input(editor, "›")? else {
            return Ok(LineOutcome::Quit);
        };
        let line = line.trim();

        if line.starts_with('/') {
            return Ok(self.run_command(line));
        }

        if line.is_empty() {
            self.confirm().await;
            return Ok(LineOutcome::Continue);
        }

        let picked = if self.flow.step() == Step::Budget {
            input::parse_budget(line, BUDGET_OPTIONS).map(|budget| vec![budget])
        } else {
            input::parse_selection(line, self.current_options())
        };
        match picked {
            Ok(picked) => self.apply_selection(picked),
            Err(e) => display::display_error(&e.to_string()),
        }
        Ok(LineOutcome::Continue)
    }

    fn apply_selection(&mut self, picked: Vec<String>) {
        let result = match self.flow.step() {
            Step::Subjects => picked
                .iter()
                .try_for_each(|s| self.flow.toggle_subject(s).map(|_| ())),
            Step::Interests => picked
                .iter()
                .try_for_each(|s| self.flow.toggle_interest(s).map(|_| ())),
            _ => match picked.as_slice() {
                [budget] => self.flow.select_budget(budget),
                _ => Err(AdvisorError::Input("choose a single budget".to_string())),
            },
        };

        if let Err(e) = result {
            display::display_error(&e.to_string());
            return;
        }

        let profile = self.flow.profile();
        let selected = match self.flow.step() {
            Step::Subjects => profile.subjects.join(", "),
            Step::Interests => profile.interests.join(", "),
            _ => profile.budget.clone(),
        };
        display::display_hint(&format!(
            "Selected: {}",
            if selected.is_empty() { "nothing yet" } else { selected.as_str() }
        ));
    }

    async fn confirm(&mut self) {
        let result = if self.flow.step() == Step::Budget && self.flow.can_advance() {
            self.render_new_messages();
            with_status(prompts::PENDING_RECOMMENDATIONS, self.flow.confirm()).await
        } else {
            self.flow.confirm().await
        };

        match result {
            Ok(_) => self.render_new_messages(),
            Err(e) => display::display_error(&e.to_string()),
        }

        if self.flow.step() == Step::Chatting {
            display::display_hint(
                "Ask me anything about these recommendations. Type /help for commands.",
            );
        }
    }

    async fn handle_chat_line(
        &mut self,
        editor: &mut AdvisorEditor,
    ) -> Result<LineOutcome, AdvisorError> {
        input::set_options(editor, &[]);
        let Some(line) = input::read_input(editor, "›")? else {
            return Ok(LineOutcome::Quit);
        };
        let line = line.trim();

        if line.starts_with('/') {
            return Ok(self.run_command(line));
        }
        if line.is_empty() {
            return Ok(LineOutcome::Continue);
        }

        with_status(prompts::PENDING_REPLY, self.flow.send_follow_up(line)).await?;
        self.render_new_messages();
        Ok(LineOutcome::Continue)
    }

    fn run_command(&self, line: &str) -> LineOutcome {
        let Some((name, args)) = parse_command(line) else {
            display::display_error("Type a command after '/', e.g. /help");
            return LineOutcome::Continue;
        };

        let mut state = ChatState::new(&self.flow);
        match self.command_dispatcher.execute(name, &args, &mut state) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => display::display_error(&e.to_string()),
        }

        if state.should_continue {
            LineOutcome::Continue
        } else {
            LineOutcome::Quit
        }
    }

    /// Prints model messages the user has not seen yet. The user's own lines
    /// are already on screen from the prompt.
    fn render_new_messages(&mut self) {
        for message in self.flow.log().since(self.rendered) {
            if message.speaker == Speaker::Model && !message.is_pending() {
                display::display_message(message);
            }
        }
        self.rendered = self.flow.log().len();
    }
}

/// Shows a status line while `work` runs, then erases it.
async fn with_status<T>(status: &str, work: impl Future<Output = T>) -> T {
    let term = console::Term::stdout();
    let _ = term.write_line(&console::style(format!("⏳ {}", status)).dim().to_string());
    let output = work.await;
    let _ = term.clear_last_lines(1);
    output
}
