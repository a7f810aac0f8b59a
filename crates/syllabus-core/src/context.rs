//! Context resolution and prompt construction for question generation.

use crate::{BloomLevel, Syllabus};

/// Topic text and Bloom level backing a course outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoContext {
    pub topics: String,
    pub bloom_level: BloomLevel,
}

impl Syllabus {
    /// Resolve the prompt context for an exact (already normalized) CO code.
    ///
    /// The Bloom level comes from the matching course outcome in the metadata;
    /// it falls back to [`BloomLevel::Remember`] when the outcome is missing
    /// there or carries an unrecognized code.
    pub fn resolve_context(&self, co_code: &str) -> Option<CoContext> {
        let entry = self.index().get(co_code)?;

        let bloom_level = self
            .document()
            .metadata
            .course_outcomes
            .iter()
            .find(|co| co.code == co_code)
            .and_then(|co| BloomLevel::from_code(&co.blooms_level))
            .unwrap_or_default();

        Some(CoContext {
            topics: entry.topic_text.clone(),
            bloom_level,
        })
    }
}

/// System message for the question generator.
///
/// With topic context the model gets the course topics and the Bloom tagging
/// rules; without it only the instructor persona.
pub fn build_system_message(context: Option<&str>) -> String {
    let Some(topics) = context.filter(|c| !c.trim().is_empty()) else {
        return "You are a course instructor.".to_string();
    };

    let mut message = format!("You are a course instructor. Here are the course topics:\n\n{topics}\n\n");
    message.push_str("CRITICAL: When generating questions, you MUST:\n");
    message.push_str("1. Provide ONLY QUESTIONS, no answers\n");
    message.push_str("2. Use DIFFERENT Bloom's taxonomy levels for different questions\n");
    message.push_str("3. Match Bloom's level to question complexity:\n");
    message.push_str("   - Simple recall → Remember\n");
    message.push_str("   - Explanation → Understand\n");
    message.push_str("   - Application → Apply\n");
    message.push_str("   - Analysis → Analyze\n");
    message.push_str("   - Evaluation → Evaluate\n");
    message.push_str("   - Creation → Create\n");
    message.push_str("4. Vary Bloom's levels naturally across questions\n");
    message.push_str("5. Include Bloom's level in brackets after each question\n");
    message.push_str("6. No multiple choice questions\n");
    message
}

/// Wrap the user's request in the fixed question-paper instructions.
pub fn build_question_prompt(user_prompt: &str) -> String {
    format!(
        r#"User Request: {user_prompt}

IMPORTANT INSTRUCTIONS:
1. Generate ONLY QUESTIONS, NO ANSWERS
2. Do NOT include any answers, solutions, or explanations
3. Questions should be appropriate for the marks requested:
   - 2 mark questions: Simple, direct questions (Use: Remember, Understand)
   - 5 mark questions: Questions requiring brief explanations (Use: Apply, Analyze)
   - 10 mark questions: Questions requiring detailed explanations or comparisons (Use: Evaluate, Create)
4. Format: Clear numbered questions grouped by marks
5. DO NOT create multiple choice questions (MCQs)
6. DISTRIBUTE questions proportionally across ALL topics in the course material
7. Ensure comprehensive coverage of ALL subtopics
8. For EACH question, include APPROPRIATE Bloom's taxonomy level in brackets at the end
9. USE DIFFERENT BLOOM'S LEVELS based on question complexity:
   - Remember: Recall facts, definitions (Simple recall questions)
   - Understand: Explain ideas, compare, summarize (Explanation questions)
   - Apply: Use information in new situations (Application questions)
   - Analyze: Break down concepts, identify relationships (Analysis questions)
   - Evaluate: Make judgments, critique, justify (Evaluation questions)
   - Create: Design, construct, develop new ideas (Creation questions)
10. DO NOT use the same Bloom's level for all questions
11. Vary the Bloom's levels appropriately
12. Match Bloom's level to question difficulty
13. Number questions clearly
14. Group by mark value

FORMAT:
2-MARK QUESTIONS:
1. Question text? [Bloom's Level]
2. Another question? [Different Bloom's Level]

5-MARK QUESTIONS:
1. Question requiring explanation? [Bloom's Level]

10-MARK QUESTIONS:
1. Detailed descriptive question? [Bloom's Level]

Now generate the requested questions: "{user_prompt}"
"#
    )
}
