use crate::domain::recipe::entities::AgentResponse;

/// The web client renders the canonical structure directly.
pub fn format_for_web(response: AgentResponse) -> AgentResponse {
    response
}
