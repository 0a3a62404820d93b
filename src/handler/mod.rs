pub mod connections;
pub mod context;
pub mod dump;
pub mod modules;
pub mod rpc_surface;
pub mod servers;
pub mod show_config;
pub mod status;
