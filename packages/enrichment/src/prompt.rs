//! Prompt text and collaborator inputs.

/// System prompt for the spellcheck call.
pub const SPELLCHECK_SYSTEM_PROMPT: &str = "\
You correct text extracted from a PDF regulation. Fix spelling mistakes, \
words split or joined by the extraction and broken punctuation. Do not \
rephrase, summarise or add anything. Keep numbers, references and legal \
terms exactly as written. Reply with the corrected text only.";

/// Text sent to the embedding service for one row.
pub fn embedding_input(full_label: &str, corrected_body: &str) -> String {
    format!("Source: {full_label}; Content: {corrected_body}")
}
