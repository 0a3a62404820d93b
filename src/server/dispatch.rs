use tracing::{debug, warn};

use crate::common::cluster::NodeId;
use crate::common::message::{Command, ConsoleRequest, ExecutorReply};
use crate::handler::{
    connections::handle_connections, context::ExecutorContext, dump::handle_dump_cpu,
    dump::handle_dump_memory, modules::handle_modules, rpc_surface::handle_handler,
    rpc_surface::handle_proxy, servers::handle_servers, show_config::handle_config,
    status::handle_status,
};

/// Executor-role entry point. Runs on the node being asked about and always
/// resolves the command locally: the remote call it answers is one leaf of
/// someone else's invocation, so it never routes further and never
/// aggregates.
pub struct Executor {
    ctx: ExecutorContext,
}

impl Executor {
    pub fn new(ctx: ExecutorContext) -> Self {
        Self { ctx }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.ctx.node.id
    }

    pub async fn dispatch(&self, request: &ConsoleRequest) -> ExecutorReply {
        debug!(comd = %request.comd, context = %request.context, "executor command");
        let result = match request.comd {
            Command::Servers => handle_servers(&self.ctx),
            Command::Connections | Command::Logins => handle_connections(&self.ctx),
            Command::Modules => handle_modules(&self.ctx),
            Command::Status => handle_status(&self.ctx),
            Command::Config => handle_config(&self.ctx, request.param.as_ref()),
            Command::Proxy => handle_proxy(&self.ctx, &request.context),
            Command::Handler => handle_handler(&self.ctx, &request.context),
            Command::DumpCpu => handle_dump_cpu(&self.ctx, request.param.as_ref()).await,
            Command::DumpMemory => handle_dump_memory(&self.ctx, request.param.as_ref()).await,
        };
        let source = self.ctx.node.id.clone();
        match result {
            Ok(body) => ExecutorReply::ok(source, body),
            Err(e) => {
                warn!(comd = %request.comd, error = %e, "command body failed");
                ExecutorReply::err(source, e.to_string())
            }
        }
    }
}
