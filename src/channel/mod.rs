pub mod channel_impl;
pub mod local_channel;
pub mod tcp_channel;
