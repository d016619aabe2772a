use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    farmer_cli::main_entry().await
}
