use crate::domain::recipe::entities::AgentResponse;

pub const BRAND_HEADER: &str = "*PantryVision Chef*";
pub const PHOTO_PROMPT_MESSAGE: &str = "PantryVision Chef here! Please send a photo of your leftovers so I can whip up three tailored recipes for you.";
pub const IMAGE_NOT_FOUND_MESSAGE: &str =
    "I couldn't find the attached photo. Please try again with a clear image of your ingredients.";

// WhatsApp bodies are capped, so only the highlights are sent.
const MAX_ITEMS: usize = 6;
const MAX_RECIPES: usize = 3;
const MAX_CORE_INGREDIENTS: usize = 3;
const MAX_NOTES: usize = 2;

/// Message text already escaped for embedding in a TwiML envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage(String);

impl ChannelMessage {
    pub fn from_text(text: &str) -> Self {
        Self(escape_xml(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_twiml(self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>{}</Message></Response>"#,
            self.0
        )
    }
}

/// Renders a response as a short WhatsApp reply.
pub fn format_for_messaging_channel(response: &AgentResponse, app_url: &str) -> ChannelMessage {
    let detected = take_joined(&response.identified_items, MAX_ITEMS, ", ");

    let recipes = response
        .recipes
        .iter()
        .take(MAX_RECIPES)
        .enumerate()
        .map(|(index, recipe)| {
            format!(
                "{}) {} — {}\n   Core: {}",
                index + 1,
                recipe.title,
                recipe.description,
                take_joined(&recipe.ingredients, MAX_CORE_INGREDIENTS, ", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let notes = if response.confidence_notes.is_empty() {
        String::new()
    } else {
        format!(
            "\n\nNotes: {}",
            take_joined(&response.confidence_notes, MAX_NOTES, " • ")
        )
    };

    ChannelMessage::from_text(&format!(
        "{BRAND_HEADER}\nDetected: {detected}\n\n{recipes}{notes}\n\nSee full prep steps online → {app_url}"
    ))
}

fn take_joined(values: &[String], limit: usize, separator: &str) -> String {
    values
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' | '\r' | '\t' => escaped.push(c),
            // not representable in XML 1.0
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}
