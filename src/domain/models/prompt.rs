use serde::{Deserialize, Serialize};

/// Persona statement prefixed to every system role.
pub const IDENTITY: &str = "Your name is Aiva. You are a helpful AI study assistant. \
NEVER use '✨ Aiva' or your name as a header. ";

/// Response style selected for a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ConceptMentor,
    QuizMaster,
    MemoryArchitect,
    ChillPartner,
}

impl Category {
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::ConceptMentor => "Concept Mentor",
            Category::QuizMaster => "Quiz Master",
            Category::MemoryArchitect => "Memory Architect",
            Category::ChillPartner => "Chill Partner",
        }
    }

    pub fn temperature(&self) -> f32 {
        match self {
            Category::ConceptMentor | Category::QuizMaster => 0.4,
            Category::MemoryArchitect => 0.3,
            Category::ChillPartner => 0.7,
        }
    }

    /// The single header the model is told to use, if the category has one.
    pub fn header(&self) -> Option<&'static str> {
        match self {
            Category::ConceptMentor => Some("## 🎓 Deep Dive"),
            Category::QuizMaster => Some("## 📝 Quick Quiz"),
            Category::MemoryArchitect => Some("## 🧠 Reviewer"),
            Category::ChillPartner => None,
        }
    }

    pub fn system_role(&self) -> String {
        let persona = match self {
            Category::ConceptMentor => {
                "You are the Concept Mentor. Use the Feynman Technique to explain complex topics simply."
            }
            Category::QuizMaster => {
                "You are the Quiz Master. You write sharp multiple-choice questions that test real understanding."
            }
            Category::MemoryArchitect => {
                "You are the Memory Architect. You compress material into dense, high-yield review notes."
            }
            Category::ChillPartner => "You are a chill study partner.",
        };
        format!("{IDENTITY}{persona}")
    }

    /// Task text sent as the user message. `topic` keeps its original case.
    pub fn task_instruction(&self, topic: &str) -> String {
        let header = self.header().unwrap_or_default();
        match self {
            Category::ConceptMentor => format!(
                "Explain concisely: \"{topic}\". Rules: Use '{header}' as your ONLY header."
            ),
            Category::QuizMaster => format!(
                "Create a quiz on: \"{topic}\". Rules: Use '{header}' as your ONLY header. \
                 Write exactly 5 multiple-choice questions with options A-D, then list the answers at the end."
            ),
            Category::MemoryArchitect => format!(
                "Summarize for review: \"{topic}\". Rules: Use '{header}' as your ONLY header. \
                 Use dense bullet points and bold the key terms."
            ),
            Category::ChillPartner => format!(
                "The user says: \"{topic}\". Respond naturally and helpfully. Max 3 sentences."
            ),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Instruction bundle built per request and handed straight to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPrompt {
    category: Category,
    system_role: String,
    task_instruction: String,
    temperature: f32,
}

impl ClassifiedPrompt {
    pub fn new(category: Category, topic: &str) -> Self {
        Self {
            category,
            system_role: category.system_role(),
            task_instruction: category.task_instruction(topic),
            temperature: category.temperature(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn system_role(&self) -> &str {
        &self.system_role
    }

    pub fn task_instruction(&self) -> &str {
        &self.task_instruction
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}
