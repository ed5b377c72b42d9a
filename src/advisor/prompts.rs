//! Fixed texts: the advisor persona and the wizard's scripted lines.

use crate::advisor::profile::Profile;

pub const SYSTEM_INSTRUCTION: &str = "You are SmartCareer Advisor, a professional Nigerian career counselor designed by \
Rayyanu Abdullahi (Rayyanu Digital Academy). Your role is to guide students in selecting the right career paths, universities, and courses based on their \
interests and talents, academic performance, financial situation, preferred region of study, and long-term career goals.

Always be friendly, motivational, and clear.

When recommending schools or courses, use real Nigerian examples such as:
- University of Lagos (UNILAG)
- Bayero University Kano (BUK)
- University of Maiduguri (UNIMAID)
- Ahmadu Bello University (ABU Zaria)
- Federal University of Technology, Minna (FUTMinna)

If the user mentions a budget, recommend schools that fit their range. For example: \
“Based on your interest in technology and your ₦200,000 budget, consider studying Computer Science at UNIMAID \
or Software Engineering at FUTMinna.”

End responses with a motivational tone — e.g., “Remember, success begins with self-awareness. Believe in your path!”

For the initial set of recommendations, always return your response in the specified JSON format. \
For follow-up chat, respond conversationally.";

pub const GREETING: &str = "Hello! I'm SmartCareer Advisor, your personal guide to a successful career in Nigeria, \
designed by Rayyanu Abdullahi. To get started, let's explore your academic strengths. Which subjects are you best at?";

pub const ASK_INTERESTS: &str =
    "Great! Now, what are your hobbies and interests outside of school?";

pub const ASK_BUDGET: &str =
    "Excellent. Lastly, what's your estimated budget for university tuition?";

pub const GENERATING: &str = "Thank you! I have all the information I need. \
Generating your personalized career and university recommendations now.";

pub const PENDING_RECOMMENDATIONS: &str = "Crafting your personalized recommendations...";

pub const PENDING_REPLY: &str = "Thinking...";

pub const RECOMMENDATION_FAILED: &str = "Failed to get recommendations from AI. Please try again.";

pub const SUBJECTS_TITLE: &str = "Which subjects are you best at? (Select all that apply)";
pub const INTERESTS_TITLE: &str = "What do you enjoy doing? (Select all that apply)";
pub const BUDGET_TITLE: &str = "What is your financial capacity for university?";

pub fn recommendation_error(reason: &str) -> String {
    format!("Sorry, I couldn't generate recommendations. {}", reason)
}

pub fn follow_up_error(reason: &str) -> String {
    format!("Sorry, I ran into an error: {}", reason)
}

/// User prompt for the structured recommendation request.
pub fn recommendation_prompt(profile: &Profile) -> String {
    format!(
        "Generate career, course, and university recommendations in Nigeria for a student with these details:\n\
         - Strong Subjects: {}\n\
         - Interests: {}\n\
         - Financial Capacity: {}",
        profile.subjects.join(", "),
        profile.interests.join(", "),
        profile.budget
    )
}
