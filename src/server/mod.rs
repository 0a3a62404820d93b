pub mod dispatch;
pub mod loader;
pub mod rest_server;
pub mod router;
pub mod server;
pub mod transport;
