use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::domain::recipe::{
    entities::{AgentResponse, Recipe},
    errors::ValidationError,
};

/// Pulls the JSON object out of a model reply.
///
/// Models sometimes wrap the payload in a markdown fence or add commentary
/// before and after it, so the outermost `{ ... }` span is tried when the
/// whole reply does not parse.
pub fn extract_structured_payload(reply: &str) -> Result<Value, ValidationError> {
    let body = strip_code_fence(reply);
    if body.is_empty() {
        return Err(ValidationError::NoStructuredPayload);
    }

    let mut candidates = vec![body];
    if let (Some(start), Some(end)) = (body.find('{'), body.rfind('}'))
        && end > start
    {
        candidates.push(&body[start..=end]);
    }

    candidates
        .into_iter()
        .filter_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .find(Value::is_object)
        .ok_or(ValidationError::NoStructuredPayload)
}

/// Converts an untrusted model payload into a canonical [`AgentResponse`].
pub fn validate(raw: &Value) -> Result<AgentResponse, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    let candidates = field(object, &["recipes"])
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingRecipes)?;

    let mut seen_titles = HashSet::new();
    let recipes: Vec<Recipe> = candidates
        .iter()
        .filter_map(coerce_recipe)
        .filter(|recipe| seen_titles.insert(recipe.title.to_lowercase()))
        .collect();

    if recipes.is_empty() {
        return Err(ValidationError::NoUsableRecipes);
    }

    let mut seen_items = HashSet::new();
    let identified_items = string_list(field(object, &["identifiedItems", "identified_items"]))
        .into_iter()
        .filter(|item| seen_items.insert(item.to_lowercase()))
        .collect();

    Ok(AgentResponse {
        identified_items,
        recipes,
        confidence_notes: string_list(field(object, &["confidenceNotes", "confidence_notes"])),
    })
}

fn coerce_recipe(value: &Value) -> Option<Recipe> {
    let object = value.as_object()?;

    let title = object.get("title")?.as_str()?.trim();
    if title.is_empty() {
        return None;
    }

    let ingredients = string_list(Some(object.get("ingredients")?));
    let steps = string_list(Some(object.get("steps")?));
    if ingredients.is_empty() || steps.is_empty() {
        return None;
    }

    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    Some(Recipe {
        title: title.to_string(),
        description: description.to_string(),
        ingredients,
        steps,
    })
}

fn field<'a>(object: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| object.get(*name))
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(rows)) = value else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let raw = text.trim();
    let Some(inner) = raw
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return raw;
    };

    let inner = inner.trim_start();
    match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => inner[4..].trim(),
        _ => inner.trim(),
    }
}
