use bot::runtime::{boot, serve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (state, telegram, config) = boot::boot().await?;
    serve::serve(state, telegram, config).await
}
