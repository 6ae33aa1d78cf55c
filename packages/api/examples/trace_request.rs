//! # Request tracing example
//!
//! Sends one GET with instrumentation on and prints the response status.
//! The timing breakdown is logged as a JSON `"http trace"` event.
//!
//! ```text
//! cargo run -p greq --example trace_request -- https://www.rust-lang.org
//! ```

use std::sync::Arc;
use std::time::Duration;

use greq::{Client, Params, TracingSink, Worker};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> greq::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_target(true).with_level(true))
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.rust-lang.org".to_string());

    let client = Client::builder()
        .pool(Arc::new(Worker::new(4)?))
        .timeout(Duration::from_secs(10))
        .trace(true)
        .sink(TracingSink::new().with_name("trace_request"))
        .build()?;
    client.set_header("accept", "text/html");

    let params = Params::from([("source", "greq")]);
    let response = client.get(&url, Some(&params)).await?;
    println!("{} ({} bytes)", response.status(), response.body().len());
    Ok(())
}
