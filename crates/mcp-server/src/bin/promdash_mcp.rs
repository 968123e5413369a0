use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    promdash_mcp::main_entry().await
}
