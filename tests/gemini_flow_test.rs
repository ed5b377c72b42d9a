use serde_json::{Value, json};
use smartcareer::advisor::{MessageContent, Speaker};
use smartcareer::providers::LLMProvider;
use smartcareer::providers::gemini::GeminiProvider;
use smartcareer::{AdvisorFlow, FlowSettings, Step};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash";
const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

fn recommendations() -> String {
    json!({
        "careerPaths": [
            {"title": "Software Engineer", "description": "Builds software systems.", "courses": ["Computer Science", "Software Engineering"]},
            {"title": "Data Scientist", "description": "Turns data into decisions.", "courses": ["Statistics", "Mathematics"]},
            {"title": "Telecoms Engineer", "description": "Keeps networks running.", "courses": ["Electrical Engineering"]}
        ],
        "universities": [
            {"name": "University of Lagos (UNILAG)", "location": "Akoka, Lagos", "type": "Federal"},
            {"name": "Federal University of Technology, Minna", "location": "Minna, Niger", "type": "Federal"},
            {"name": "University of Maiduguri (UNIMAID)", "location": "Maiduguri, Borno", "type": "Federal"},
            {"name": "Kaduna State University", "location": "Kaduna, Kaduna", "type": "State"},
            {"name": "Covenant University", "location": "Ota, Ogun", "type": "Private"}
        ],
        "motivation": "Remember, success begins with self-awareness. Believe in your path!"
    })
    .to_string()
}

fn is_chat_request(request: &Request) -> bool {
    !String::from_utf8_lossy(&request.body).contains("responseSchema")
}

async fn mount_recommendation(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains("responseSchema"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_chat(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(is_chat_request)
        .respond_with(response)
        .mount(server)
        .await;
}

fn flow_for(server: &MockServer) -> AdvisorFlow {
    flow_with_timeout(server, Duration::from_secs(5))
}

fn flow_with_timeout(server: &MockServer, timeout: Duration) -> AdvisorFlow {
    let provider: Arc<dyn LLMProvider> = Arc::new(
        GeminiProvider::with_endpoint(
            server.uri(),
            "test-key".to_string(),
            MODEL.to_string(),
            timeout,
        )
        .unwrap(),
    );
    let mut flow = AdvisorFlow::new(provider, FlowSettings::default());
    flow.start();
    flow
}

async fn answer_questionnaire(flow: &mut AdvisorFlow) {
    flow.toggle_subject("Math").unwrap();
    flow.toggle_subject("Physics").unwrap();
    assert_eq!(flow.confirm().await.unwrap(), Step::Interests);
    flow.toggle_interest("Coding").unwrap();
    assert_eq!(flow.confirm().await.unwrap(), Step::Budget);
    flow.select_budget("₦200,000").unwrap();
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

#[tokio::test]
async fn questionnaire_to_chat_against_gemini() {
    let server = MockServer::start().await;
    mount_recommendation(
        &server,
        ResponseTemplate::new(200).set_body_json(gemini_reply(&recommendations())),
    )
    .await;
    mount_chat(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(gemini_reply("UNILAG's Computer Science cut-off is usually high, so aim for 280+.")),
    )
    .await;

    let mut flow = flow_for(&server);
    answer_questionnaire(&mut flow).await;

    assert_eq!(flow.confirm().await.unwrap(), Step::Chatting);
    assert!(flow.has_chat_session());
    match &flow.log().last().unwrap().content {
        MessageContent::Recommendation(result) => {
            assert_eq!(result.career_paths.len(), 3);
            assert_eq!(result.universities[4].kind, "Private");
        }
        other => panic!("expected recommendations, got {other:?}"),
    }

    assert!(flow.send_follow_up("What JAMB score do I need?").await.unwrap());
    let last = flow.log().last().unwrap();
    assert_eq!(last.speaker, Speaker::Model);
    assert!(matches!(&last.content, MessageContent::Text(t) if t.contains("280+")));

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 2);

    let recommendation = &bodies[0];
    let prompt = recommendation["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Strong Subjects: Math, Physics"));
    assert!(prompt.contains("Interests: Coding"));
    assert!(prompt.contains("Financial Capacity: ₦200,000"));
    assert_eq!(
        recommendation["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(recommendation["generationConfig"]["temperature"].as_f64(), Some(0.7));

    let chat = &bodies[1];
    assert_eq!(chat["generationConfig"]["temperature"].as_f64(), Some(0.8));
    assert!(
        chat["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("You are SmartCareer Advisor")
    );
    assert_eq!(chat["contents"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn server_error_sends_student_back_to_budget() {
    let server = MockServer::start().await;
    mount_recommendation(
        &server,
        ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}
        })),
    )
    .await;

    let mut flow = flow_for(&server);
    answer_questionnaire(&mut flow).await;
    let before = flow.log().len();

    assert_eq!(flow.confirm().await.unwrap(), Step::Budget);

    let added = flow.log().since(before);
    assert_eq!(added.len(), 2, "transition line plus one error");
    assert!(added.iter().all(|m| !m.is_pending()));
    assert_eq!(added.iter().filter(|m| m.is_error()).count(), 1);
    assert!(!flow.has_chat_session());
    assert_eq!(request_bodies(&server).await.len(), 1);
}

#[tokio::test]
async fn unparseable_reply_is_a_recommendation_failure() {
    let server = MockServer::start().await;
    mount_recommendation(
        &server,
        ResponseTemplate::new(200).set_body_json(gemini_reply("I'd suggest Medicine at UNILAG!")),
    )
    .await;

    let mut flow = flow_for(&server);
    answer_questionnaire(&mut flow).await;

    assert_eq!(flow.confirm().await.unwrap(), Step::Budget);
    assert!(flow.log().last().unwrap().is_error());
}

#[tokio::test]
async fn failed_follow_up_keeps_chatting() {
    let server = MockServer::start().await;
    mount_recommendation(
        &server,
        ResponseTemplate::new(200).set_body_json(gemini_reply(&recommendations())),
    )
    .await;
    mount_chat(
        &server,
        ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}
        })),
    )
    .await;

    let mut flow = flow_for(&server);
    answer_questionnaire(&mut flow).await;
    flow.confirm().await.unwrap();

    assert!(flow.send_follow_up("Is UNIMAID affordable?").await.unwrap());
    assert_eq!(flow.step(), Step::Chatting);
    match &flow.log().last().unwrap().content {
        MessageContent::Error(text) => assert!(text.contains("Resource has been exhausted")),
        other => panic!("expected an error message, got {other:?}"),
    }
}

#[tokio::test]
async fn api_key_stays_out_of_requests_and_errors() {
    let server = MockServer::start().await;
    mount_recommendation(
        &server,
        ResponseTemplate::new(200).set_body_json(gemini_reply(&recommendations())),
    )
    .await;
    mount_chat(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(gemini_reply("too late"))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let mut flow = flow_with_timeout(&server, Duration::from_secs(1));
    answer_questionnaire(&mut flow).await;
    assert_eq!(flow.confirm().await.unwrap(), Step::Chatting);

    assert!(flow.send_follow_up("Which is cheapest?").await.unwrap());
    let error = match &flow.log().last().unwrap().content {
        MessageContent::Error(text) => text.clone(),
        other => panic!("expected an error message, got {other:?}"),
    };
    assert!(error.contains("timed out"), "unexpected error: {error}");

    for message in flow.log().messages() {
        let text = match &message.content {
            MessageContent::Text(t) | MessageContent::Error(t) | MessageContent::Pending(t) => t,
            MessageContent::Recommendation(_) => continue,
        };
        assert!(!text.contains("test-key"), "key shown to the user: {text}");
    }

    for request in server.received_requests().await.unwrap() {
        assert!(!request.url.as_str().contains("test-key"));
    }
}
