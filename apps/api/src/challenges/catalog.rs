//! Static challenge catalog. Ids are stable; the submission flow reads title and XP from here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Serialize)]
pub struct Challenge {
    pub id: u32,
    pub title: &'static str,
    pub category: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub objective: &'static str,
    pub tips: &'static [&'static str],
    pub xp: u32,
    /// Display-only counters shown on the challenge list.
    pub completions: u32,
    pub avg_score: u32,
}

/// Card-sized view used by the list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeSummary {
    pub id: u32,
    pub title: &'static str,
    pub category: &'static str,
    pub difficulty: Difficulty,
    pub description: &'static str,
    pub xp: u32,
    pub completions: u32,
    pub avg_score: u32,
}

impl From<&Challenge> for ChallengeSummary {
    fn from(c: &Challenge) -> Self {
        Self {
            id: c.id,
            title: c.title,
            category: c.category,
            difficulty: c.difficulty,
            description: c.description,
            xp: c.xp,
            completions: c.completions,
            avg_score: c.avg_score,
        }
    }
}

pub fn all() -> &'static [Challenge] {
    CHALLENGES
}

pub fn find(id: u32) -> Option<&'static Challenge> {
    CHALLENGES.iter().find(|c| c.id == id)
}

static CHALLENGES: &[Challenge] = &[
    Challenge {
        id: 1,
        title: "Clear Instructions",
        category: "Prompt Clarity",
        difficulty: Difficulty::Beginner,
        description: "Create a prompt that gives clear and specific instructions to the AI.",
        objective: "Write a prompt that instructs an AI to generate a step-by-step guide for making a peanut butter and jelly sandwich. The prompt should be clear, specific, and leave no room for misinterpretation.",
        tips: &[
            "Be specific about what the AI should do",
            "Include clear action verbs (e.g., 'list', 'describe', 'explain')",
            "Avoid ambiguity in instructions",
            "Define structure or format if needed",
        ],
        xp: 100,
        completions: 1243,
        avg_score: 82,
    },
    Challenge {
        id: 2,
        title: "Context Setting",
        category: "Prompt Clarity",
        difficulty: Difficulty::Beginner,
        description: "Help the AI by providing background and context for better responses.",
        objective: "Write a prompt that helps an AI provide customer support for a mobile banking app. Include enough context so it understands the tone, audience, and purpose.",
        tips: &[
            "Describe the company, user, and problem briefly",
            "Specify tone (friendly, professional, etc.)",
            "Mention intended outcome",
            "Avoid irrelevant context",
        ],
        xp: 150,
        completions: 876,
        avg_score: 78,
    },
    Challenge {
        id: 3,
        title: "Persona Creation",
        category: "Role-based Prompts",
        difficulty: Difficulty::Intermediate,
        description: "Instruct the AI to act as a specific character, professional, or expert.",
        objective: "Create a prompt that tells the AI to act as a professional fitness coach helping someone build a 4-week beginner workout plan.",
        tips: &[
            "Clearly define persona (role, tone, expertise)",
            "Add context for the task or audience",
            "Set boundaries or tone expectations",
            "Ensure role stays consistent throughout",
        ],
        xp: 200,
        completions: 542,
        avg_score: 71,
    },
    Challenge {
        id: 4,
        title: "Creative Writing",
        category: "Creative Prompts",
        difficulty: Difficulty::Intermediate,
        description: "Encourage the AI to produce imaginative and compelling writing.",
        objective: "Write a prompt that asks the AI to craft a short story about a future where dreams can be recorded and shared.",
        tips: &[
            "Set a vivid scenario",
            "Encourage emotion or moral theme",
            "Define structure (intro, climax, ending)",
            "Limit word count or genre if needed",
        ],
        xp: 250,
        completions: 1087,
        avg_score: 85,
    },
    Challenge {
        id: 5,
        title: "Conversational Tone",
        category: "Style Control",
        difficulty: Difficulty::Intermediate,
        description: "Train the AI to maintain a friendly or natural conversation style.",
        objective: "Write a prompt that has the AI chat with a first-time gardener about choosing houseplants, keeping a warm, natural tone across several turns.",
        tips: &[
            "Describe the voice you want (warm, casual, encouraging)",
            "Give a short sample exchange",
            "Ask the AI to keep replies brief and ask follow-up questions",
        ],
        xp: 200,
        completions: 689,
        avg_score: 76,
    },
    Challenge {
        id: 6,
        title: "Data Extraction",
        category: "Structured Output",
        difficulty: Difficulty::Intermediate,
        description: "Make the AI extract structured data from messy or unstructured text.",
        objective: "Write a prompt that extracts names, dates, and locations from a historical text and outputs JSON.",
        tips: &[
            "Define the data fields clearly",
            "Specify output format (JSON, CSV, etc.)",
            "Provide example input",
            "Ensure consistent formatting",
        ],
        xp: 250,
        completions: 412,
        avg_score: 74,
    },
    Challenge {
        id: 7,
        title: "Chain-of-Thought Reasoning",
        category: "Advanced Reasoning",
        difficulty: Difficulty::Advanced,
        description: "Get the AI to think step-by-step and justify its reasoning.",
        objective: "Write a prompt that helps the AI solve a logic puzzle with detailed reasoning steps.",
        tips: &[
            "Ask for reasoning before the final answer",
            "Encourage structured explanation",
            "Test logical flow",
        ],
        xp: 300,
        completions: 321,
        avg_score: 65,
    },
    Challenge {
        id: 8,
        title: "Comparative Analysis",
        category: "Advanced Reasoning",
        difficulty: Difficulty::Advanced,
        description: "Instruct the AI to compare two or more concepts logically.",
        objective: "Write a prompt that makes the AI compare the pros and cons of nuclear vs. renewable energy for a national policy decision.",
        tips: &[
            "Define comparison criteria (cost, safety, environment)",
            "Ask for structured output (table, bullet points, etc.)",
            "Request balanced arguments",
        ],
        xp: 300,
        completions: 290,
        avg_score: 69,
    },
    Challenge {
        id: 9,
        title: "Error Correction",
        category: "Instruction Refinement",
        difficulty: Difficulty::Advanced,
        description: "Make the AI spot and fix issues in text or reasoning.",
        objective: "Create a prompt that instructs the AI to review a paragraph for grammar and clarity errors, then rewrite it professionally.",
        tips: &[
            "Specify what kind of errors to fix",
            "Ask for explanation of each change",
            "Set desired tone or audience level",
        ],
        xp: 280,
        completions: 410,
        avg_score: 73,
    },
    Challenge {
        id: 10,
        title: "Multi-Step Planning",
        category: "Complex Prompts",
        difficulty: Difficulty::Expert,
        description: "Make the AI plan multi-step projects or decisions logically.",
        objective: "Write a prompt that asks the AI to plan a 5-day marketing campaign for a startup launching a new product.",
        tips: &[
            "Define clear stages or milestones",
            "Ask for timelines and responsibilities",
            "Request summaries or deliverables per step",
        ],
        xp: 350,
        completions: 210,
        avg_score: 68,
    },
    Challenge {
        id: 11,
        title: "Fact Verification",
        category: "Critical Thinking",
        difficulty: Difficulty::Expert,
        description: "Encourage the AI to check or verify facts before answering.",
        objective: "Write a prompt that instructs the AI to verify historical claims before summarizing them for a report.",
        tips: &[
            "Ask AI to cite or cross-check information",
            "Encourage self-evaluation ('Is this accurate?')",
            "Request confidence scores or disclaimers",
        ],
        xp: 350,
        completions: 189,
        avg_score: 70,
    },
    Challenge {
        id: 12,
        title: "Prompt Optimization",
        category: "Meta-Prompting",
        difficulty: Difficulty::Expert,
        description: "Make the AI help you improve your own prompts.",
        objective: "Write a prompt that asks the AI to evaluate your prompt and suggest improvements in clarity, context, and tone.",
        tips: &[
            "Ask for structured critique (strengths, issues, fixes)",
            "Include scoring system or criteria",
            "Use for iterative prompt improvement",
        ],
        xp: 400,
        completions: 150,
        avg_score: 75,
    },
];
