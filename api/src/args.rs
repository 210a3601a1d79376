use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use pantryvision_core::domain::common::{LLMConfig, MessagingConfig, PantryVisionConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "pantryvision", version, about = "PantryVision Chef API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub twilio: TwilioArgs,

    #[command(flatten)]
    pub log: LogArgs,

    /// Public base URL linked from outbound messages
    #[arg(
        long,
        env = "APP_BASE_URL",
        default_value = "https://agentic-4c933fc2.vercel.app"
    )]
    pub app_base_url: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/pantry`
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(
        long = "metrics-enabled",
        env = "METRICS_ENABLED",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    #[arg(
        long = "openai-base-url",
        env = "OPENAI_BASE_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub base_url: String,

    #[arg(long = "openai-timeout-secs", env = "OPENAI_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct TwilioArgs {
    #[arg(long = "twilio-account-sid", env = "TWILIO_ACCOUNT_SID")]
    pub account_sid: Option<String>,

    /// Shared secret for webhook signatures. Unset disables verification.
    #[arg(long = "twilio-auth-token", env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Public URL Twilio posts to, used when signing requests
    #[arg(long = "twilio-webhook-url", env = "TWILIO_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    #[arg(long = "media-timeout-secs", env = "MEDIA_TIMEOUT_SECS", default_value_t = 8)]
    pub media_timeout_secs: u64,

    /// Webhook replies fall back to pantry recipes after this long
    #[arg(
        long = "reply-deadline-secs",
        env = "TWILIO_REPLY_DEADLINE_SECS",
        default_value_t = 12
    )]
    pub reply_deadline_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<Args> for PantryVisionConfig {
    fn from(args: Args) -> Self {
        PantryVisionConfig {
            llm: LLMConfig {
                api_key: non_blank(args.llm.api_key),
                model: args.llm.model,
                base_url: args.llm.base_url,
                timeout: Duration::from_secs(args.llm.timeout_secs),
            },
            messaging: MessagingConfig {
                account_sid: non_blank(args.twilio.account_sid),
                auth_token: non_blank(args.twilio.auth_token),
                media_timeout: Duration::from_secs(args.twilio.media_timeout_secs),
                reply_deadline: Duration::from_secs(args.twilio.reply_deadline_secs),
            },
            app_base_url: args.app_base_url,
        }
    }
}
