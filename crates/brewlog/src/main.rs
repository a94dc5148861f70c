use anyhow::Result;
use brewlog::runtime::{boot, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let state = boot::boot()?;
    serve::serve(state).await
}
