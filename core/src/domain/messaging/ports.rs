use std::future::Future;

use crate::domain::{
    channel::whatsapp::ChannelMessage,
    common::entities::app_errors::CoreError,
    messaging::value_objects::{InboundMessage, MediaContent, MediaCredentials},
};

/// Downloads media attached to an inbound message
#[cfg_attr(test, mockall::automock)]
pub trait MediaFetcher: Send + Sync {
    fn fetch_media(
        &self,
        url: String,
        credentials: Option<MediaCredentials>,
    ) -> impl Future<Output = Result<MediaContent, CoreError>> + Send;
}

/// Service trait for the messaging channel
#[cfg_attr(test, mockall::automock)]
pub trait MessagingService: Send + Sync {
    /// Produces the reply for one inbound message.
    ///
    /// Only a missing sender is an error; every other outcome, including a
    /// failed analysis, yields a reply.
    fn reply_to_inbound(
        &self,
        message: InboundMessage,
    ) -> impl Future<Output = Result<ChannelMessage, CoreError>> + Send;
}
