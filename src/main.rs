#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lms_lib::run().await
}
