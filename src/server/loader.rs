use std::sync::Arc;

use crate::channel::channel_impl::RequestChannelImpl;
use crate::channel::local_channel::LocalRequestChannel;
use crate::channel::tcp_channel::TcpRequestChannel;
use crate::common::config::{ChannelType, ConsoleConfig};
use crate::server::dispatch::Executor;
use crate::traits::registry::NodeRegistry;

/// Pick the request-channel backend from the console settings. `local`
/// short-circuits every routed request to this process's own executor,
/// which is what a single-node deployment wants.
pub fn load_request_channel(
    console_config: &ConsoleConfig,
    registry: Arc<dyn NodeRegistry>,
    executor: Arc<Executor>,
) -> RequestChannelImpl {
    match console_config.channel_type {
        ChannelType::Tcp => {
            tracing::debug!("Using TCP request channel");
            RequestChannelImpl::Tcp(TcpRequestChannel::new(
                registry,
                console_config.max_frame_len,
            ))
        }
        ChannelType::Local => {
            tracing::debug!("Using in-process request channel");
            RequestChannelImpl::Local(LocalRequestChannel::single(executor))
        }
    }
}
