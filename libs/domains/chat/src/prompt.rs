//! Context assembly for the completion model.
//!
//! Deterministic: the same history, listings and policy always produce the
//! same prompt. Whether the assistant is still qualifying the user or already
//! recommending is left to the model, which reads it from the history.

use domain_listings::ListingMatch;

use crate::models::ConversationEntry;

const EMPTY_SECTION: &str = "(none)";

const RULE_USE_MEMORY: &str = "1. Use the memory context to work out what kind of property the \
    user wants (place, price, bedrooms, location) and do not ask again for details already given.";

const RULE_RECOMMEND: &str = "3. Once the requirements are gathered, recommend the listings from \
    the property context that match them.";

const RULE_CASUAL: &str = "4. Answer casual questions naturally.";

/// A detail the assistant asks about before recommending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifyingTopic {
    pub name: String,
    pub question: String,
}

impl QualifyingTopic {
    fn new(name: &str, question: &str) -> Self {
        Self {
            name: name.to_string(),
            question: question.to_string(),
        }
    }
}

/// One worked exchange shown to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FewShotExample {
    pub user: String,
    pub assistant: String,
}

impl FewShotExample {
    fn new(user: &str, assistant: &str) -> Self {
        Self {
            user: user.to_string(),
            assistant: assistant.to_string(),
        }
    }
}

/// Persona and conversation rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaPolicy {
    pub assistant_name: String,
    pub mission: String,
    pub tone: String,
    /// Upper bound on qualifying questions before recommending
    pub max_questions: usize,
    pub topics: Vec<QualifyingTopic>,
    pub examples: Vec<FewShotExample>,
}

impl Default for PersonaPolicy {
    fn default() -> Self {
        Self {
            assistant_name: "Property Recommender".to_string(),
            mission: "Guide the user with property-related inquiries. If they are interested in \
                      buying, ask about location, budget and property type."
                .to_string(),
            tone: "Friendly and professional, like JARVIS from Iron Man.".to_string(),
            max_questions: 6,
            topics: vec![
                QualifyingTopic::new(
                    "location",
                    "which city they want to search in and the preferred area within it",
                ),
                QualifyingTopic::new("budget", "what their budget is"),
                QualifyingTopic::new("bedrooms", "how many bedrooms they need"),
                QualifyingTopic::new(
                    "amenities",
                    "which amenities they want nearby, such as schools or colleges",
                ),
                QualifyingTopic::new(
                    "purpose",
                    "why they are buying, for example to live in or as an investment",
                ),
            ],
            examples: vec![
                FewShotExample::new("Hello", "Hello, how can I assist you?"),
                FewShotExample::new(
                    "Can you suggest properties in Indore?",
                    "Sure, can you specify a preferred area within Indore?",
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    policy: PersonaPolicy,
}

impl PromptBuilder {
    pub fn new(policy: PersonaPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PersonaPolicy {
        &self.policy
    }

    /// System prompt for one turn
    pub fn build(&self, history: &[ConversationEntry], listings: &[ListingMatch]) -> String {
        let policy = &self.policy;

        let mut sections = vec![
            format!(
                "Given the following memory context:\n{}",
                render_history(history)
            ),
            format!(
                "And the following property context:\n{}",
                render_listings(listings)
            ),
            format!(
                "You are {}, a professional yet friendly AI assistant.",
                policy.assistant_name
            ),
            format!("**Mission:** {}\n**Tone:** {}", policy.mission, policy.tone),
            self.render_rules(),
        ];

        if !policy.examples.is_empty() {
            sections.push(render_examples(&policy.examples));
        }

        sections.join("\n\n")
    }

    fn render_rules(&self) -> String {
        let policy = &self.policy;
        let mut lines = vec![
            "**Response Rules:**".to_string(),
            RULE_USE_MEMORY.to_string(),
            format!(
                "2. When a property search starts, ask at most {} qualifying questions, covering:",
                policy.max_questions
            ),
        ];
        lines.extend(
            policy
                .topics
                .iter()
                .map(|topic| format!("   - {}: {}", topic.name, topic.question)),
        );
        lines.push(RULE_RECOMMEND.to_string());
        lines.push(RULE_CASUAL.to_string());

        lines.join("\n")
    }
}

fn render_examples(examples: &[FewShotExample]) -> String {
    let rendered = examples
        .iter()
        .map(|example| format!("User: \"{}\"\nAssistant: {}", example.user, example.assistant))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Example Interactions:\n{}", rendered)
}

/// `User: ..` / `Assistant: ..` lines, oldest first
pub fn render_history(history: &[ConversationEntry]) -> String {
    if history.is_empty() {
        return EMPTY_SECTION.to_string();
    }

    history
        .iter()
        .map(|entry| format!("User: {}\nAssistant: {}", entry.req, entry.res))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `- [<id>] <text>` line per listing, closest first
pub fn render_listings(listings: &[ListingMatch]) -> String {
    if listings.is_empty() {
        return EMPTY_SECTION.to_string();
    }

    listings
        .iter()
        .map(|listing| {
            format!(
                "- [{}] {}",
                listing.id_string(),
                listing.text.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
