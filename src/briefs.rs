// Prompt assembly for the studio assistants

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Social-media content generation for the creative studio tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioBrief {
    pub topic: String,
    pub persona: String,
    pub tone: String,
    pub length: String,
    pub formats: Vec<String>,
}

impl StudioBrief {
    pub fn new(topic: impl Into<String>) -> Self {
        StudioBrief {
            topic: topic.into(),
            persona: "default".to_string(),
            tone: "professional".to_string(),
            length: "medium".to_string(),
            formats: vec!["facebook_post".to_string()],
        }
    }

    pub fn prompt(&self) -> String {
        let mut parts = vec![format!(
            "ROLE: Creative Content Strategist for a Myanmar Photo Studio.\n\
             TASK: Generate social media content.\n\
             Language: Burmese (Myanmar).\n\
             Persona: {}. Tone: {}. Length: {}.\n\
             Formats: {}.",
            self.persona,
            self.tone,
            self.length,
            self.formats.join(", ")
        )];
        parts.push(
            "IMPORTANT: Return ONLY a valid JSON object with keys matching the formats \
             (e.g., \"facebook_post\", \"tiktok_script\")."
                .to_string(),
        );
        parts.push(format!("User Request Topic: \"{}\"", self.topic));
        parts.push("Generate JSON now.".to_string());
        parts.join("\n\n")
    }
}

/// Lighting-assistant ("Lumi") setup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingBrief {
    pub goal: String,
}

impl LightingBrief {
    pub fn prompt(&self) -> String {
        // The JSON skeleton tells the model the exact shape the renderer expects.
        let structure = json!({
            "lighting_style_identification": "Name of Style",
            "creative_rationale": "Why this works",
            "final_setup_diagram": { "diagram_svg": "SVG Code for top-down view" },
            "step_by_step_improvement_plan": [
                { "action": "Place Key Light", "instruction": "45 degrees to subject..." }
            ]
        });

        format!(
            "You are 'Lumi', an expert Lighting Assistant. Provide a detailed lighting \
             setup plan in Burmese. Return Valid JSON ONLY.\n\n\
             JSON Structure: {}\n\n\
             Request: Generate a lighting setup for goal: \"{}\".",
            structure, self.goal
        )
    }
}

/// Weekly social-media plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerBrief {
    pub goal: String,
    pub posts: u8,
}

impl PlannerBrief {
    pub fn prompt(&self) -> String {
        format!(
            "Generate a {}-post weekly social media plan for a photo studio. Goal: {}. \
             Language: Burmese. Output JSON with \"weekly_strategy_title\" and \
             \"daily_plan\" array (day, content_type, idea).",
            self.posts, self.goal
        )
    }
}

/// Studio-director project plan request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBrief {
    pub name: String,
    pub brief: String,
}

impl ProjectBrief {
    pub fn prompt(&self) -> String {
        format!(
            "Act as Studio Director. Create a project plan for \"{}\". Brief: \"{}\".\n\
             Output JSON with: projectName, overallConcept, moodboard (description, \
             keywords), lightingSetups (array of title, description), posingIdeas \
             (array), socialMediaPost (content).\n\
             Language: Burmese.",
            self.name, self.brief
        )
    }
}

/// Post-idea suggestions; plain text, no JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeasBrief {
    pub topic: String,
}

impl IdeasBrief {
    pub fn prompt(&self) -> String {
        format!(
            "Give me 5 creative post ideas for \"{}\" in Burmese.",
            self.topic
        )
    }
}

/// Follow-up question for the lighting chat, with the current setup as context.
pub fn lighting_chat_prompt(question: &str, context: Option<&str>) -> String {
    let mut prompt = String::from(
        "You are Lumi. Answer the user's question about the lighting setup in Burmese. \
         Keep it short and helpful.\n",
    );
    if let Some(context) = context {
        prompt.push_str(context);
        prompt.push('\n');
    }
    prompt.push_str(&format!("User Question: \"{}\"", question));
    prompt
}

/// Follow-up question for the editing chat.
pub fn editing_chat_prompt(question: &str) -> String {
    format!("User asked about editing: \"{}\". Reply in Burmese.", question)
}
