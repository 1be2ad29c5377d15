//! FCR node binary.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    fcr_node_commands::run().await
}
