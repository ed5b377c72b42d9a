//! Wizard state machine driving the questionnaire and the chat that follows.

use crate::advisor::message::{ConversationLog, MessageContent, Speaker};
use crate::advisor::profile::Profile;
use crate::advisor::prompts;
use crate::advisor::recommendation::RecommendationAdapter;
use crate::advisor::session::ChatSession;
use crate::core::error::AdvisorError;
use crate::providers::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Stage of the wizard.
///
/// Progresses Greeting → Subjects → Interests → Budget → Generating →
/// Chatting. The only backwards edge is Generating → Budget when the
/// recommendation request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Greeting,
    Subjects,
    Interests,
    Budget,
    Generating,
    Chatting,
}

impl Step {
    /// Whether the questionnaire is still collecting answers.
    pub fn is_collecting(&self) -> bool {
        matches!(self, Self::Subjects | Self::Interests | Self::Budget)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::Subjects => "subjects",
            Self::Interests => "interests",
            Self::Budget => "budget",
            Self::Generating => "generating",
            Self::Chatting => "chatting",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FlowSettings {
    pub recommendation_temperature: f32,
    pub chat_temperature: f32,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            recommendation_temperature: 0.7,
            chat_temperature: 0.8,
        }
    }
}

/// Owns the profile, the conversation log and the current step.
///
/// Every operation that awaits the advice service takes `&mut self`, so a
/// second request cannot be started while one is outstanding.
pub struct AdvisorFlow {
    step: Step,
    profile: Profile,
    log: ConversationLog,
    provider: Arc<dyn LLMProvider>,
    recommender: RecommendationAdapter,
    settings: FlowSettings,
    chat: Option<ChatSession>,
}

impl AdvisorFlow {
    pub fn new(provider: Arc<dyn LLMProvider>, settings: FlowSettings) -> Self {
        Self {
            step: Step::Greeting,
            profile: Profile::default(),
            log: ConversationLog::new(),
            recommender: RecommendationAdapter::new(
                Arc::clone(&provider),
                settings.recommendation_temperature,
            ),
            provider,
            settings,
            chat: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn has_chat_session(&self) -> bool {
        self.chat.is_some()
    }

    /// True while a placeholder for an outstanding request sits in the log.
    pub fn is_busy(&self) -> bool {
        self.log.has_pending()
    }

    /// Emits the greeting and moves to the first question. No-op once started.
    pub fn start(&mut self) {
        if self.step != Step::Greeting {
            return;
        }
        self.say(prompts::GREETING);
        self.transition(Step::Subjects);
    }

    pub fn toggle_subject(&mut self, subject: &str) -> Result<bool, AdvisorError> {
        self.expect_step(Step::Subjects, "subjects")?;
        let subject = non_blank(subject, "subject")?;
        Ok(self.profile.toggle_subject(subject))
    }

    pub fn toggle_interest(&mut self, interest: &str) -> Result<bool, AdvisorError> {
        self.expect_step(Step::Interests, "interests")?;
        let interest = non_blank(interest, "interest")?;
        Ok(self.profile.toggle_interest(interest))
    }

    pub fn select_budget(&mut self, budget: &str) -> Result<(), AdvisorError> {
        self.expect_step(Step::Budget, "a budget")?;
        let budget = non_blank(budget, "budget")?;
        self.profile.set_budget(budget);
        Ok(())
    }

    /// Whether the current step's required answer is present.
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Subjects => self.profile.has_subjects(),
            Step::Interests => self.profile.has_interests(),
            Step::Budget => self.profile.has_budget(),
            _ => false,
        }
    }

    /// The "Continue" action.
    ///
    /// At Budget this requests the recommendations and waits for them. After
    /// a failed request the step is Budget again with the answers intact, so
    /// confirming once more is the retry.
    pub async fn confirm(&mut self) -> Result<Step, AdvisorError> {
        if !self.step.is_collecting() {
            return Err(AdvisorError::Input(format!(
                "nothing to confirm during the {} step",
                self.step
            )));
        }
        if !self.can_advance() {
            return Err(AdvisorError::Input(match self.step {
                Step::Subjects => "select at least one subject to continue".to_string(),
                Step::Interests => "select at least one interest to continue".to_string(),
                _ => "choose a budget to continue".to_string(),
            }));
        }

        match self.step {
            Step::Subjects => {
                self.say(prompts::ASK_INTERESTS);
                self.transition(Step::Interests);
            }
            Step::Interests => {
                self.say(prompts::ASK_BUDGET);
                self.transition(Step::Budget);
            }
            _ => {
                self.say(prompts::GENERATING);
                self.transition(Step::Generating);
                self.generate_recommendations().await;
            }
        }

        Ok(self.step)
    }

    async fn generate_recommendations(&mut self) {
        self.log.push(
            Speaker::Model,
            MessageContent::Pending(prompts::PENDING_RECOMMENDATIONS.to_string()),
        );

        match self.recommender.recommend(&self.profile).await {
            Ok(result) => {
                tracing::info!(
                    career_paths = result.career_paths.len(),
                    universities = result.universities.len(),
                    "recommendations received"
                );
                self.log
                    .resolve_pending(MessageContent::Recommendation(result));
                self.chat = Some(ChatSession::new(
                    Arc::clone(&self.provider),
                    self.settings.chat_temperature,
                ));
                self.transition(Step::Chatting);
            }
            Err(err) => {
                let reason = match err {
                    AdvisorError::Recommendation(reason) => reason,
                    other => other.to_string(),
                };
                self.log.resolve_pending(MessageContent::Error(
                    prompts::recommendation_error(&reason),
                ));
                self.transition(Step::Budget);
            }
        }
    }

    /// Sends a free-text question to the chat session.
    ///
    /// Blank input is ignored and returns `Ok(false)`. Service failures end up
    /// in the log as an error message; the step never changes.
    pub async fn send_follow_up(&mut self, text: &str) -> Result<bool, AdvisorError> {
        if self.step != Step::Chatting {
            return Err(AdvisorError::Input(
                "follow-up questions are available once recommendations are ready".to_string(),
            ));
        }
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        let Some(chat) = self.chat.as_mut() else {
            return Err(AdvisorError::Input("no chat session is open".to_string()));
        };

        self.log
            .push(Speaker::User, MessageContent::Text(text.to_string()));
        self.log.push(
            Speaker::Model,
            MessageContent::Pending(prompts::PENDING_REPLY.to_string()),
        );

        let content = match chat.send(text).await {
            Ok(reply) => MessageContent::Text(reply),
            Err(err) => {
                let reason = match err {
                    AdvisorError::FollowUp(reason) => reason,
                    other => other.to_string(),
                };
                MessageContent::Error(prompts::follow_up_error(&reason))
            }
        };
        self.log.resolve_pending(content);

        Ok(true)
    }

    fn say(&mut self, text: &str) {
        self.log
            .push(Speaker::Model, MessageContent::Text(text.to_string()));
    }

    fn transition(&mut self, next: Step) {
        tracing::info!(from = %self.step, to = %next, "step transition");
        self.step = next;
    }

    fn expect_step(&self, step: Step, what: &str) -> Result<(), AdvisorError> {
        if self.step == step {
            Ok(())
        } else {
            Err(AdvisorError::Input(format!(
                "{} can only be changed during the {} step (current step: {})",
                what, step, self.step
            )))
        }
    }
}

fn non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str, AdvisorError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AdvisorError::Input(format!("{} must not be empty", what)))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::testing::{ScriptedProvider, recommendation_json};

    fn flow_with(provider: &Arc<ScriptedProvider>) -> AdvisorFlow {
        let provider: Arc<dyn LLMProvider> = provider.clone();
        let mut flow = AdvisorFlow::new(provider, FlowSettings::default());
        flow.start();
        flow
    }

    async fn fill_to_budget(flow: &mut AdvisorFlow) {
        flow.toggle_subject("Math").unwrap();
        flow.toggle_subject("Physics").unwrap();
        flow.confirm().await.unwrap();
        flow.toggle_interest("Coding").unwrap();
        flow.confirm().await.unwrap();
        flow.select_budget("₦200,000").unwrap();
    }

    #[tokio::test]
    async fn start_greets_and_asks_for_subjects() {
        let provider = Arc::new(ScriptedProvider::new());
        let mut flow = flow_with(&provider);
        assert_eq!(flow.step(), Step::Subjects);
        assert_eq!(flow.log().len(), 1);
        assert_eq!(
            flow.log().messages()[0].content,
            MessageContent::Text(prompts::GREETING.to_string())
        );

        flow.start();
        assert_eq!(flow.log().len(), 1, "second start must not greet again");
    }

    #[tokio::test]
    async fn empty_step_never_advances() {
        let provider = Arc::new(ScriptedProvider::new());
        let mut flow = flow_with(&provider);

        assert!(!flow.can_advance());
        assert!(flow.confirm().await.is_err());
        assert_eq!(flow.step(), Step::Subjects);
        assert_eq!(flow.log().len(), 1);

        flow.toggle_subject("Biology").unwrap();
        flow.toggle_subject("Biology").unwrap();
        assert!(!flow.can_advance());
        assert!(flow.confirm().await.is_err());
        assert_eq!(flow.step(), Step::Subjects);
    }

    #[tokio::test]
    async fn selections_are_limited_to_their_step() {
        let provider = Arc::new(ScriptedProvider::new());
        let mut flow = flow_with(&provider);

        assert!(flow.toggle_interest("Coding").is_err());
        assert!(flow.select_budget("₦200,000").is_err());
        assert!(flow.toggle_subject("   ").is_err());
        assert!(flow.profile().interests.is_empty());
    }

    #[tokio::test]
    async fn successful_submission_opens_chat() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_reply(recommendation_json());
        let mut flow = flow_with(&provider);
        fill_to_budget(&mut flow).await;
        let before = flow.log().len();

        let step = flow.confirm().await.unwrap();

        assert_eq!(step, Step::Chatting);
        assert!(flow.has_chat_session());
        assert!(!flow.is_busy());
        // transition line + the recommendation itself
        assert_eq!(flow.log().len(), before + 2);
        assert!(matches!(
            flow.log().last().unwrap().content,
            MessageContent::Recommendation(_)
        ));

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        let prompt = &calls[0].turns[0].text;
        for value in ["Math", "Physics", "Coding", "₦200,000"] {
            assert!(prompt.contains(value), "prompt is missing {value}");
        }
        assert!(calls[0].structured);
        assert_eq!(calls[0].temperature, 0.7);
    }

    #[tokio::test]
    async fn failed_submission_returns_to_budget() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_error("503 Service Unavailable");
        let mut flow = flow_with(&provider);
        fill_to_budget(&mut flow).await;
        let before = flow.log().len();

        let step = flow.confirm().await.unwrap();

        assert_eq!(step, Step::Budget);
        assert!(!flow.has_chat_session());
        assert_eq!(flow.log().len(), before + 2);
        let errors: Vec<_> = flow.log().since(before).iter().filter(|m| m.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert!(!flow.is_busy(), "placeholder must be removed");
        assert_eq!(flow.profile().budget, "₦200,000");
    }

    #[tokio::test]
    async fn confirming_again_after_failure_retries() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_reply("not json at all");
        provider.push_reply(recommendation_json());
        let mut flow = flow_with(&provider);
        fill_to_budget(&mut flow).await;

        assert_eq!(flow.confirm().await.unwrap(), Step::Budget);
        assert_eq!(flow.confirm().await.unwrap(), Step::Chatting);
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn follow_ups_keep_session_history() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.push_reply(recommendation_json());
        provider.push_reply("Computer Science at UNILAG is a strong choice.");
        provider.push_error("quota exceeded");
        provider.push_reply("Post-UTME usually holds in July.");
        let mut flow = flow_with(&provider);
        fill_to_budget(&mut flow).await;
        flow.confirm().await.unwrap();

        assert!(flow.send_follow_up("Which course fits me best?").await.unwrap());
        assert!(flow.send_follow_up("And fees?").await.unwrap());
        assert!(flow.send_follow_up("When is post-UTME?").await.unwrap());
        assert!(!flow.send_follow_up("   ").await.unwrap());
        assert_eq!(flow.step(), Step::Chatting);

        let tail: Vec<_> = flow
            .log()
            .messages()
            .iter()
            .rev()
            .take(6)
            .rev()
            .map(|m| (m.speaker, m.content.clone()))
            .collect();
        assert_eq!(
            tail,
            vec![
                (Speaker::User, MessageContent::Text("Which course fits me best?".into())),
                (
                    Speaker::Model,
                    MessageContent::Text("Computer Science at UNILAG is a strong choice.".into())
                ),
                (Speaker::User, MessageContent::Text("And fees?".into())),
                (
                    Speaker::Model,
                    MessageContent::Error(prompts::follow_up_error("API error: quota exceeded"))
                ),
                (Speaker::User, MessageContent::Text("When is post-UTME?".into())),
                (
                    Speaker::Model,
                    MessageContent::Text("Post-UTME usually holds in July.".into())
                ),
            ]
        );

        // The failed turn is not replayed to the service
        let calls = provider.calls();
        let last = calls.last().unwrap();
        assert_eq!(last.turns.len(), 3);
        assert!(!last.structured);
        assert_eq!(last.temperature, 0.8);
    }

    #[tokio::test]
    async fn follow_up_before_chatting_is_rejected() {
        let provider = Arc::new(ScriptedProvider::new());
        let mut flow = flow_with(&provider);
        assert!(flow.send_follow_up("hello").await.is_err());
        assert_eq!(flow.log().len(), 1);
        assert!(provider.calls().is_empty());
    }
}
