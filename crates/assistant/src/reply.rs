use ratecard_core::selection::SelectionPatch;

/// What a chat reply turned out to be once parsed. Extraction is decoupled
/// from rendering: callers decide what to do with each variant.
#[derive(Clone, Debug, PartialEq)]
pub enum AssistantReply {
    Prose(String),
    Structured(SelectionPatch),
}

/// Classify a reply body. A reply is structured configuration only when a
/// JSON object (bare, or inside a fenced code block) carries at least one
/// of the five selection keys; everything else, including malformed JSON,
/// degrades to prose rather than failing.
pub fn parse_reply(content: &str) -> AssistantReply {
    let candidate =
        extract_fenced_block(content).unwrap_or_else(|| content.trim().to_string());

    if candidate.starts_with('{') {
        if let Ok(patch) = serde_json::from_str::<SelectionPatch>(&candidate) {
            if patch.has_selection_keys() {
                return AssistantReply::Structured(patch);
            }
        }
    }

    AssistantReply::Prose(content.trim().to_string())
}

// Models often wrap JSON in ```json fences; unwrap the first fenced block.
fn extract_fenced_block(content: &str) -> Option<String> {
    let start = content.find("```")?;
    let after_fence = &content[start + 3..];
    let after_tag = after_fence.strip_prefix("json").unwrap_or(after_fence);
    let end = after_tag.find("```")?;
    Some(after_tag[..end].trim().to_string())
}
