pub const VISION_SYSTEM_PROMPT: &str = "You are PantryVision Chef, a practical home cook who \
turns leftovers into dinner. You only answer with JSON matching the requested schema.";

/// Instruction sent alongside the photo.
pub fn build_vision_prompt() -> String {
    [
        "Look at the photo and list every food item or ingredient you can clearly see in identifiedItems.",
        "Then suggest exactly three recipes that mainly use those items plus common pantry staples.",
        "Order the recipes from best fit to weakest fit.",
        "Each recipe needs a short title, a one-sentence description, an ingredient list and ordered preparation steps.",
        "Use confidenceNotes for anything you are unsure about, such as items that are partly hidden or hard to tell apart.",
        "Respond with JSON only: {\"identifiedItems\": [..], \"recipes\": [{\"title\", \"description\", \"ingredients\", \"steps\"}], \"confidenceNotes\": [..]}.",
    ]
    .join(" ")
}
