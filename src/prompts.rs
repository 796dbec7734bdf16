pub const DEFAULT_IMAGE_PROMPT: &str = include_str!("../data/prompts/default_image_prompt.txt");
pub const SCRIPT_INSTRUCTION: &str = include_str!("../data/prompts/script_instruction.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Instruction sent to the script model for `topic`.
pub fn script_instruction(topic: &str) -> String {
    render(SCRIPT_INSTRUCTION, &[("topic", topic.trim())])
}
