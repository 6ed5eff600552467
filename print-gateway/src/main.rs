use print_gateway::{Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = print_gateway::setup_environment();
    print_gateway::print_banner();

    tracing::info!(
        environment = %config.environment,
        printer = %config.printer_name,
        printer_addr = %config.printer_addr,
        work_dir = %config.work_dir,
        "Starting print gateway"
    );

    let state = ServerState::initialize(&config)?;
    Server::with_state(config, state).run().await?;

    Ok(())
}
