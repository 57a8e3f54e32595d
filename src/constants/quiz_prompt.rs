use crate::models::dto::candidate::CandidateQuestion;

pub const QUIZ_GENERATION_PROMPT: &str = "You are a quiz question generator for an online learning platform. Your task is to read the lesson material below and produce multiple-choice questions that test a learner's understanding of it.

### Requirements:

1. **Question Count:** Produce exactly {count} questions. Do not produce more or fewer.
2. **Grounding:** Every question must be answerable from the lesson material alone. Do not rely on outside knowledge and do not invent facts that are not stated in the material.
3. **Options:** Each question has between 3 and 5 answer options. Exactly one option is correct; the others must be plausible but clearly wrong given the material.
4. **Correct Answer:** The correctAnswer field must be an exact, character-for-character copy of one entry in options.
5. **Explanation:** Each question includes a short explanation of why the correct answer is correct.
6. **Output Format:** Respond with a raw JSON array of question objects and nothing else. No prose, no commentary, no markdown code fences.

### JSON schema of one question object:

{schema}

### Lesson material:

{lesson_content}";

/// Renders the generation prompt for one synthesis run. The schema of the
/// expected wire object is embedded so the model has the exact contract.
pub fn build_quiz_generation_prompt(lesson_content: &str, count: u32) -> String {
    let schema = schemars::schema_for!(CandidateQuestion);
    let schema_text = serde_json::to_string_pretty(&schema)
        .unwrap_or_else(|_| "{\"type\": \"object\"}".to_string());

    QUIZ_GENERATION_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{schema}", &schema_text)
        .replace("{lesson_content}", lesson_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_count_and_content() {
        let prompt = build_quiz_generation_prompt("HTML is a markup language.", 5);

        assert!(prompt.contains("exactly 5 questions"));
        assert!(prompt.contains("HTML is a markup language."));
        assert!(!prompt.contains("{count}"));
        assert!(!prompt.contains("{lesson_content}"));
    }

    #[test]
    fn prompt_embeds_wire_schema() {
        let prompt = build_quiz_generation_prompt("content", 3);

        assert!(prompt.contains("correctAnswer"));
        assert!(!prompt.contains("{schema}"));
    }
}
