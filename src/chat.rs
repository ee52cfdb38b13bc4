//! Farming assistant chat helper.
//!
//! Replies are canned: `match_intent` walks an ordered rule list (crops from
//! the registry first, then `TOPIC_RULES`) and falls back to a general help
//! message. There is no model inference.
//!
//! Matching works on lower-cased word tokens. A keyword matches a token that
//! equals it, or (for keywords of four letters or more) a token that starts
//! with it, so "pests" hits "pest" but "price" does not hit "rice".
//!
//! Conversation state lives in `ChatState` and only changes through
//! `ChatState::reduce`. `ask` answers from the local rules; `ask_service`
//! goes through `POST /api/chatbot` and records a failure as an error
//! message.

use chrono::{DateTime, Utc};

use crate::api::ApiClient;
use crate::crops::{self, AgronomySheet};

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub reply: String,
    pub suggestions: Vec<String>,
    pub category: String,
}

pub const GENERAL_SUGGESTIONS: &[&str] = &[
    "Tell me about rice cultivation",
    "Government schemes for farmers",
    "Soil testing importance",
    "Modern farming technologies",
    "Organic farming practices",
    "Water conservation methods",
];

const CROP_SUGGESTIONS: &[&str] = &[
    "Tell me about soil requirements",
    "What are common diseases?",
    "How to increase yield?",
    "Market price information",
];

const PRACTICE_SUGGESTIONS: &[&str] = &[
    "Tell me about organic farming",
    "Water management techniques",
    "Integrated pest management",
    "Crop rotation benefits",
];

const SOIL_SUGGESTIONS: &[&str] = &[
    "How to improve soil fertility?",
    "Soil testing process",
    "Organic matter importance",
    "pH management",
];

const SCHEME_SUGGESTIONS: &[&str] = &[
    "PM-KISAN details",
    "Crop insurance schemes",
    "Kisan Credit Card",
    "Soil Health Card",
];

const TECHNOLOGY_SUGGESTIONS: &[&str] = &[
    "Precision agriculture",
    "Greenhouse farming",
    "Drip irrigation",
    "Drone technology",
];

const MARKET_SUGGESTIONS: &[&str] = &[
    "Best time to sell",
    "Storage techniques",
    "Market trends",
    "e-NAM platform",
];

// ---------------------------------------------------------------------------
// Knowledge base
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Practice {
    CropRotation,
    OrganicFarming,
    IntegratedPestManagement,
    WaterManagement,
}

impl Practice {
    pub fn title(self) -> &'static str {
        match self {
            Practice::CropRotation => "Crop Rotation",
            Practice::OrganicFarming => "Organic Farming",
            Practice::IntegratedPestManagement => "Integrated Pest Management",
            Practice::WaterManagement => "Water Management",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Practice::CropRotation => {
                "Practice of growing different crops in sequence on the same land"
            }
            Practice::OrganicFarming => "Farming without synthetic chemicals, using natural inputs",
            Practice::IntegratedPestManagement => {
                "Eco-friendly approach to manage pests using multiple strategies"
            }
            Practice::WaterManagement => "Efficient use of water resources in agriculture",
        }
    }

    /// (heading, bullet, items) sections in display order.
    fn sections(self) -> &'static [(&'static str, &'static str, &'static [&'static str])] {
        match self {
            Practice::CropRotation => &[
                (
                    "Benefits",
                    "✓",
                    &[
                        "Improves soil fertility",
                        "Reduces pest and disease buildup",
                        "Breaks weed cycles",
                        "Improves soil structure",
                        "Reduces soil erosion",
                    ],
                ),
                (
                    "Examples",
                    "•",
                    &[
                        "Rice → Wheat → Legume",
                        "Cotton → Wheat → Chickpea",
                        "Maize → Potato → Wheat",
                    ],
                ),
            ],
            Practice::OrganicFarming => &[
                (
                    "Key Practices",
                    "•",
                    &[
                        "Use of compost and farmyard manure",
                        "Green manuring with leguminous crops",
                        "Biological pest control",
                        "Crop rotation and mixed cropping",
                        "Use of bio-fertilizers (Rhizobium, Azotobacter)",
                    ],
                ),
                (
                    "Benefits",
                    "✓",
                    &[
                        "Improves soil health",
                        "Environmentally sustainable",
                        "Better product quality",
                        "Higher market price for organic produce",
                    ],
                ),
            ],
            Practice::IntegratedPestManagement => &[
                (
                    "Strategies",
                    "•",
                    &[
                        "Cultural methods: crop rotation, resistant varieties",
                        "Mechanical methods: traps, hand picking",
                        "Biological control: natural predators, parasites",
                        "Chemical control: as last resort, selective pesticides",
                    ],
                ),
                (
                    "Benefits",
                    "✓",
                    &[
                        "Reduced pesticide use",
                        "Cost-effective",
                        "Environmentally safe",
                        "Sustainable pest control",
                    ],
                ),
            ],
            Practice::WaterManagement => &[
                (
                    "Techniques",
                    "•",
                    &[
                        "Drip irrigation: 40-60% water saving",
                        "Sprinkler irrigation: 30-40% water saving",
                        "Mulching: reduces evaporation",
                        "Rainwater harvesting",
                        "Laser land leveling",
                    ],
                ),
                (
                    "Benefits",
                    "✓",
                    &[
                        "Water conservation",
                        "Reduced waterlogging",
                        "Better crop yields",
                        "Energy savings",
                    ],
                ),
            ],
        }
    }
}

struct Scheme {
    name: &'static str,
    description: &'static str,
    details: &'static [(&'static str, &'static str)],
}

const SCHEMES: &[Scheme] = &[
    Scheme {
        name: "PM-KISAN (Pradhan Mantri Kisan Samman Nidhi)",
        description: "Direct income support of ₹6000/year to farmers",
        details: &[
            ("Eligibility", "All landholding farmers"),
            ("Benefits", "₹2000 in three equal installments"),
        ],
    },
    Scheme {
        name: "PM Fasal Bima Yojana",
        description: "Crop insurance scheme",
        details: &[
            ("Coverage", "Yield losses, prevented sowing, post-harvest losses"),
            ("Premium", "1.5-2% of sum insured for farmers"),
        ],
    },
    Scheme {
        name: "Soil Health Card Scheme",
        description: "Free soil testing for farmers",
        details: &[(
            "Benefits",
            "Crop-wise nutrient recommendations, saves fertilizer cost",
        )],
    },
    Scheme {
        name: "Kisan Credit Card (KCC)",
        description: "Credit facility for farmers",
        details: &[(
            "Benefits",
            "Short-term credit for cultivation, interest subvention of 2-3%",
        )],
    },
];

struct Technology {
    description: &'static str,
    list_heading: &'static str,
    items: &'static [&'static str],
    benefits: &'static [&'static str],
}

const TECHNOLOGIES: &[Technology] = &[
    Technology {
        description: "Using technology for precise farm management",
        list_heading: "Tools",
        items: &[
            "GPS-guided tractors",
            "Drones for monitoring",
            "Soil sensors",
            "Variable rate applicators",
        ],
        benefits: &[
            "Optimized input use",
            "Higher yields",
            "Reduced environmental impact",
        ],
    },
    Technology {
        description: "Growing crops in controlled environment",
        list_heading: "Types",
        items: &["Polyhouse", "Greenhouse", "Net house", "Shade house"],
        benefits: &[
            "Year-round production",
            "Higher yields",
            "Quality produce",
            "Protection from weather",
        ],
    },
];

const SOIL_TEST_PARAMETERS: &[&str] = &[
    "Nitrogen (N)",
    "Phosphorus (P)",
    "Potassium (K)",
    "pH",
    "Organic carbon",
    "Micronutrients",
];
const SOIL_TEST_BENEFITS: &[&str] = &[
    "Optimal fertilizer use",
    "Cost savings",
    "Better yields",
    "Prevents soil degradation",
];
const SOIL_HEALTH_INDICATORS: &[&str] = &[
    "Organic matter content: >0.5% is good",
    "pH level: 6.0-7.5 for most crops",
    "NPK levels: balanced nutrients",
    "Soil structure: good aggregation",
    "Biological activity: earthworms, microbes",
];
const SOIL_IMPROVEMENTS: &[&str] = &[
    "Add organic matter regularly",
    "Practice crop rotation",
    "Avoid over-tillage",
    "Use cover crops",
    "Balance fertilizer application",
];

const SELLING_TIPS: &[&str] = &[
    "Check daily market rates before selling",
    "Sell during peak demand seasons",
    "Consider direct marketing to consumers",
    "Form farmer producer organizations (FPOs)",
    "Use e-NAM platform for better prices",
];
const STORAGE_TIPS: &[&str] = &[
    "Proper cleaning and drying before storage",
    "Use improved storage structures",
    "Protect from pests and moisture",
    "Consider warehouse receipt system",
];

const WELCOME_REPLY: &str = "👋 **Welcome to Agriculture Assistant!**

I'm here to help you with comprehensive farming information. I can assist you with:

🌾 **Crop Information**
- Cultivation guides for rice, wheat, maize, cotton, sugarcane, chickpea, potato and tomato
- Season, soil, climate, and irrigation requirements
- Disease and pest management
- Expected yields and market prices

🌱 **Farming Practices**
- Organic farming, crop rotation, integrated pest management, water management

🌍 **Soil Management**
- Soil testing, fertility, pH and nutrient management

🏛️ **Government Schemes**
- PM-KISAN, PM Fasal Bima Yojana, Soil Health Card, Kisan Credit Card

🚀 **Modern Technologies**
- Precision agriculture, protected cultivation, drip irrigation, drones

💰 **Market Intelligence**
- Selling strategies and storage best practices

**How can I help you today? Ask me anything about farming!**";

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Practice(Practice),
    Soil,
    Schemes,
    Technology,
    Market,
}

struct TopicRule {
    keywords: &'static [&'static str],
    topic: Topic,
}

/// Tried in order after the crop rule; first hit wins.
static TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        keywords: &["rotation"],
        topic: Topic::Practice(Practice::CropRotation),
    },
    TopicRule {
        keywords: &["organic"],
        topic: Topic::Practice(Practice::OrganicFarming),
    },
    TopicRule {
        keywords: &["pest"],
        topic: Topic::Practice(Practice::IntegratedPestManagement),
    },
    TopicRule {
        keywords: &["water", "irrigation"],
        topic: Topic::Practice(Practice::WaterManagement),
    },
    TopicRule {
        keywords: &["soil", "testing", "fertility", "ph", "nutrients"],
        topic: Topic::Soil,
    },
    TopicRule {
        keywords: &[
            "scheme",
            "subsidy",
            "government",
            "pm kisan",
            "insurance",
            "credit",
            "loan",
        ],
        topic: Topic::Schemes,
    },
    TopicRule {
        keywords: &["technology", "precision", "drone", "greenhouse", "polyhouse", "modern"],
        topic: Topic::Technology,
    },
    TopicRule {
        keywords: &["market", "price", "selling", "storage", "sell"],
        topic: Topic::Market,
    },
];

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn keyword_matches(tokens: &[String], keyword: &str) -> bool {
    if keyword.contains(' ') {
        let phrase: Vec<&str> = keyword.split(' ').collect();
        return tokens
            .windows(phrase.len())
            .any(|window| window.iter().zip(&phrase).all(|(t, p)| t == p));
    }
    tokens
        .iter()
        .any(|t| t == keyword || (keyword.len() >= 4 && t.starts_with(keyword)))
}

/// Registry key and sheet of the first crop named in `tokens`.
fn find_crop_sheet(tokens: &[String]) -> Option<(&'static str, &'static AgronomySheet)> {
    crops::crops_with_agronomy()
        .find(|(crop, sheet)| {
            keyword_matches(tokens, crop.key)
                || sheet.aliases.iter().any(|alias| keyword_matches(tokens, alias))
        })
        .map(|(crop, sheet)| (crop.key, sheet))
}

fn find_topic(tokens: &[String]) -> Option<Topic> {
    TOPIC_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| keyword_matches(tokens, k)))
        .map(|rule| rule.topic)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Picks a canned reply for `text`. Never fails; unmatched or blank input
/// gets the general help message.
pub fn match_intent(text: &str) -> ChatReply {
    let tokens = tokenize(text);

    if let Some((crop, sheet)) = find_crop_sheet(&tokens) {
        return ChatReply {
            reply: format_crop_reply(crop, sheet),
            suggestions: owned(CROP_SUGGESTIONS),
            category: format!("Crop Information - {}", sheet.title),
        };
    }

    match find_topic(&tokens) {
        Some(Topic::Practice(practice)) => ChatReply {
            reply: format_practice_reply(practice),
            suggestions: owned(PRACTICE_SUGGESTIONS),
            category: "Farming Practices".to_string(),
        },
        Some(Topic::Soil) => ChatReply {
            reply: format_soil_reply(),
            suggestions: owned(SOIL_SUGGESTIONS),
            category: "Soil Management".to_string(),
        },
        Some(Topic::Schemes) => ChatReply {
            reply: format_schemes_reply(),
            suggestions: owned(SCHEME_SUGGESTIONS),
            category: "Government Schemes".to_string(),
        },
        Some(Topic::Technology) => ChatReply {
            reply: format_technology_reply(),
            suggestions: owned(TECHNOLOGY_SUGGESTIONS),
            category: "Agricultural Technology".to_string(),
        },
        Some(Topic::Market) => ChatReply {
            reply: format_market_reply(),
            suggestions: owned(MARKET_SUGGESTIONS),
            category: "Market Intelligence".to_string(),
        },
        None => ChatReply {
            reply: WELCOME_REPLY.to_string(),
            suggestions: owned(GENERAL_SUGGESTIONS),
            category: "General Information".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

fn push_list(out: &mut String, bullet: &str, items: &[&str]) {
    for item in items {
        out.push_str(&format!("{} {}\n", bullet, item));
    }
}

fn format_crop_reply(key: &str, sheet: &AgronomySheet) -> String {
    let mut out = format!("🌾 **{}** Information:\n\n", sheet.title);
    out.push_str(&format!("**Season:** {}\n", crops::season_for(key)));
    out.push_str(&format!("**Duration:** {}\n\n", sheet.duration));
    out.push_str(&format!("**Soil Requirements:**\n{}\n", sheet.soil));
    out.push_str(&format!("**pH:** {}\n\n", sheet.ph));
    out.push_str("**Climate:**\n");
    out.push_str(&format!("- Temperature: {}\n", sheet.temperature));
    out.push_str(&format!("- Rainfall: {}\n\n", sheet.rainfall));
    out.push_str(&format!("**Irrigation:** {}\n\n", sheet.irrigation));
    out.push_str(&format!("**Fertilizer Requirements:**\n{}\n\n", sheet.npk));
    out.push_str(&format!("**Common Diseases:** {}\n", sheet.diseases));
    out.push_str(&format!("**Common Pests:** {}\n\n", sheet.pests));
    out.push_str(&format!("**Expected Yield:** {}\n", sheet.typical_yield));
    out.push_str(&format!("**Market Price:** {}\n\n", sheet.market_price));
    out.push_str(&format!("**💡 Farming Tips:**\n{}", sheet.tips));
    out
}

fn format_practice_reply(practice: Practice) -> String {
    let mut out = format!("🌱 **{}**\n\n{}\n", practice.title(), practice.description());
    for (heading, bullet, items) in practice.sections() {
        out.push_str(&format!("\n**{}:**\n", heading));
        push_list(&mut out, bullet, items);
    }
    out
}

fn format_soil_reply() -> String {
    let mut out = String::from("🌍 **Soil Management**\n\n");
    out.push_str("**Soil Testing:**\nEssential for knowing nutrient status and pH of soil\n\n");
    out.push_str(&format!(
        "**Parameters to Test:** {}\n",
        SOIL_TEST_PARAMETERS.join(", ")
    ));
    out.push_str("**Frequency:** Once every 2-3 years\n\n**Benefits:**\n");
    push_list(&mut out, "✓", SOIL_TEST_BENEFITS);
    out.push_str("\n**Soil Health Indicators:**\n");
    push_list(&mut out, "•", SOIL_HEALTH_INDICATORS);
    out.push_str("\n**Ways to Improve Soil Health:**\n");
    push_list(&mut out, "✓", SOIL_IMPROVEMENTS);
    out
}

fn format_schemes_reply() -> String {
    let mut out = String::from("🏛️ **Government Schemes for Farmers**\n\n");
    for scheme in SCHEMES {
        out.push_str(&format!("**{}**\n{}\n", scheme.name, scheme.description));
        for (label, value) in scheme.details {
            out.push_str(&format!("{}: {}\n", label, value));
        }
        out.push('\n');
    }
    out
}

fn format_technology_reply() -> String {
    let mut out = String::from("🚀 **Modern Agricultural Technologies**\n\n");
    for tech in TECHNOLOGIES {
        out.push_str(&format!("**{}**\n\n{}:\n", tech.description, tech.list_heading));
        push_list(&mut out, "•", tech.items);
        out.push_str("\nBenefits:\n");
        push_list(&mut out, "✓", tech.benefits);
        out.push('\n');
    }
    out
}

fn format_market_reply() -> String {
    let mut out = String::from("💰 **Market Intelligence & Selling Tips**\n\n");
    out.push_str("**Smart Selling Strategies:**\n");
    push_list(&mut out, "✓", SELLING_TIPS);
    out.push_str("\n**Storage Best Practices:**\n");
    push_list(&mut out, "✓", STORAGE_TIPS);
    out
}

// ---------------------------------------------------------------------------
// Conversation state
// ---------------------------------------------------------------------------

pub const CONNECTION_ERROR_REPLY: &str = "Sorry, I'm having trouble connecting right now. \
     Please make sure the backend server is running and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub category: Option<String>,
    pub is_error: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatAction {
    UserSent { text: String, at: DateTime<Utc> },
    BotReplied { reply: ChatReply, at: DateTime<Utc> },
    ReplyFailed { at: DateTime<Utc> },
    Reset { at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub suggestions: Vec<String>,
    pub awaiting_reply: bool,
    next_id: u64,
}

impl ChatState {
    /// Conversation opened with the welcome message.
    pub fn new(at: DateTime<Utc>) -> Self {
        let welcome = ChatMessage {
            id: 1,
            sender: Sender::Bot,
            text: WELCOME_REPLY.to_string(),
            category: Some("Welcome".to_string()),
            is_error: false,
            timestamp: at,
        };
        Self {
            messages: vec![welcome],
            suggestions: owned(&GENERAL_SUGGESTIONS[..4]),
            awaiting_reply: false,
            next_id: 2,
        }
    }

    fn push(
        &mut self,
        sender: Sender,
        text: String,
        category: Option<String>,
        is_error: bool,
        at: DateTime<Utc>,
    ) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            sender,
            text,
            category,
            is_error,
            timestamp: at,
        });
        self.next_id += 1;
    }

    pub fn reduce(mut self, action: ChatAction) -> Self {
        match action {
            ChatAction::UserSent { text, at } => {
                let text = text.trim();
                if text.is_empty() {
                    return self;
                }
                self.push(Sender::User, text.to_string(), None, false, at);
                self.awaiting_reply = true;
            }
            ChatAction::BotReplied { reply, at } => {
                self.push(Sender::Bot, reply.reply, Some(reply.category), false, at);
                if !reply.suggestions.is_empty() {
                    self.suggestions = reply.suggestions;
                }
                self.awaiting_reply = false;
            }
            ChatAction::ReplyFailed { at } => {
                self.push(
                    Sender::Bot,
                    CONNECTION_ERROR_REPLY.to_string(),
                    Some("Error".to_string()),
                    true,
                    at,
                );
                self.awaiting_reply = false;
            }
            ChatAction::Reset { at } => return ChatState::new(at),
        }
        self
    }

    /// Sends `text` and applies the local canned reply.
    pub fn ask(self, text: &str, at: DateTime<Utc>) -> Self {
        if text.trim().is_empty() {
            return self;
        }
        let reply = match_intent(text);
        self.reduce(ChatAction::UserSent {
            text: text.to_string(),
            at,
        })
        .reduce(ChatAction::BotReplied { reply, at })
    }

    /// Sends `text` to the service assistant. Any failure becomes the
    /// connection error message; suggestions are left as they were.
    pub fn ask_service(self, client: &ApiClient, text: &str, at: DateTime<Utc>) -> Self {
        if text.trim().is_empty() {
            return self;
        }
        let state = self.reduce(ChatAction::UserSent {
            text: text.to_string(),
            at,
        });
        match client.send_chat_message(text) {
            Ok(reply) => state.reduce(ChatAction::BotReplied { reply, at }),
            Err(_) => state.reduce(ChatAction::ReplyFailed { at }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap()
    }

    #[test]
    fn test_crop_question_gets_crop_sheet() {
        let reply = match_intent("Tell me about rice cultivation");
        assert_eq!(reply.category, "Crop Information - Rice");
        assert!(reply.reply.contains("Monsoon (Kharif)"));
        assert!(reply.reply.contains("Stem borer"));
        assert_eq!(reply.suggestions.len(), 4);
    }

    #[test]
    fn test_crop_alias_matches() {
        assert_eq!(match_intent("growing CORN?").category, "Crop Information - Maize/Corn");
        assert_eq!(match_intent("gram yield").category, "Crop Information - Chickpea/Gram");
    }

    #[test]
    fn test_plural_crop_name_matches() {
        assert_eq!(match_intent("potatoes in winter").category, "Crop Information - Potato");
    }

    #[test]
    fn test_price_question_is_not_mistaken_for_rice() {
        let reply = match_intent("Market price information");
        assert_eq!(reply.category, "Market Intelligence");
    }

    #[test]
    fn test_crop_rule_runs_before_topics() {
        // "pest" would hit the IPM rule, but the crop rule comes first.
        assert_eq!(match_intent("wheat pests").category, "Crop Information - Wheat");
    }

    #[test]
    fn test_topic_rules_follow_declared_order() {
        assert_eq!(match_intent("crop rotation benefits").category, "Farming Practices");
        assert!(match_intent("crop rotation benefits").reply.contains("Crop Rotation"));
        assert!(match_intent("drip irrigation").reply.contains("Water Management"));
        assert_eq!(match_intent("How to improve soil fertility?").category, "Soil Management");
        assert_eq!(match_intent("pm kisan details").category, "Government Schemes");
        assert_eq!(match_intent("Drone technology").category, "Agricultural Technology");
        assert_eq!(match_intent("best time to sell").category, "Market Intelligence");
    }

    #[test]
    fn test_short_keyword_needs_whole_word() {
        // "ph" must not fire on "photos".
        assert_eq!(match_intent("photos").category, "General Information");
        assert_eq!(match_intent("what ph is best").category, "Soil Management");
    }

    #[test]
    fn test_unmatched_and_blank_input_fall_back() {
        for text in ["hello there", "", "   "] {
            let reply = match_intent(text);
            assert_eq!(reply.category, "General Information");
            assert_eq!(reply.suggestions.len(), GENERAL_SUGGESTIONS.len());
        }
    }

    #[test]
    fn test_new_state_has_welcome_and_default_suggestions() {
        let state = ChatState::new(fixed_now());
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].sender, Sender::Bot);
        assert_eq!(state.suggestions.len(), 4);
        assert!(!state.awaiting_reply);
    }

    #[test]
    fn test_ask_appends_user_and_bot_messages() {
        let state = ChatState::new(fixed_now()).ask("soil testing", fixed_now());
        assert_eq!(state.messages.len(), 3);
        assert_eq!(state.messages[1].sender, Sender::User);
        assert_eq!(state.messages[2].category.as_deref(), Some("Soil Management"));
        assert_eq!(state.suggestions, owned(SOIL_SUGGESTIONS));
        let ids: Vec<u64> = state.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let state = ChatState::new(fixed_now());
        let after = state.clone().reduce(ChatAction::UserSent {
            text: "  ".to_string(),
            at: fixed_now(),
        });
        assert_eq!(after, state);
    }

    #[test]
    fn test_reply_failure_adds_error_message_and_keeps_suggestions() {
        let state = ChatState::new(fixed_now())
            .reduce(ChatAction::UserSent {
                text: "hi".to_string(),
                at: fixed_now(),
            })
            .reduce(ChatAction::ReplyFailed { at: fixed_now() });
        let last = state.messages.last().unwrap();
        assert!(last.is_error);
        assert_eq!(last.text, CONNECTION_ERROR_REPLY);
        assert_eq!(state.suggestions.len(), 4);
        assert!(!state.awaiting_reply);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let state = ChatState::new(fixed_now())
            .ask("rice", fixed_now())
            .reduce(ChatAction::Reset { at: fixed_now() });
        assert_eq!(state, ChatState::new(fixed_now()));
    }
}
