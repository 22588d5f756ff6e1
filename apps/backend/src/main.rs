#[tokio::main]
async fn main() -> anyhow::Result<()> {
    woordjes_backend::run().await
}
