//! Prompt text for case summaries.

pub const SYSTEM_PROMPT: &str = "You are a legal expert specializing in case law summaries.";

/// Builds the user prompt asking for a structured summary of `citation`.
pub fn case_summary_prompt(citation: &str) -> String {
    format!(
        "Please provide a comprehensive summary of the legal case: {citation}\n\
         \n\
         Include the following information if available:\n\
         - Court and date\n\
         - Key facts\n\
         - Legal issues\n\
         - Holding/ruling\n\
         - Legal principles established\n\
         - Significance of the case\n\
         \n\
         If this is not a real case or you don't have information about it, please provide \
         a summary based on what you know about similar cases or legal principles that might \
         apply to a case with this name."
    )
}
