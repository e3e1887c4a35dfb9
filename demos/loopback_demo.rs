//! Loopback demo: the diagnostic override
//!
//! Run with: cargo run --example loopback_demo
//!
//! Shows how switching a single connection into loopback mode suppresses
//! fan-out for the whole endpoint even while other connections still form a
//! valid reader/writer pair.

use mediasplit::{ConnectionMode, ConnectionType, SplitterEndpoint};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediasplit=debug".parse()?),
        )
        .init();

    let endpoint = SplitterEndpoint::with_defaults("loopback-demo");
    endpoint.start();

    let outside = endpoint.create_connection(ConnectionType::Outside).await?;
    let inside = endpoint.create_connection(ConnectionType::Inside).await?;

    endpoint.set_connection_mode(&outside, ConnectionMode::SendRecv);
    endpoint.set_connection_mode(&inside, ConnectionMode::SendRecv);
    println!("Duplex pair:              active={}", endpoint.is_active());

    // Putting one leg into loopback stops all fan-out on the endpoint
    endpoint.set_connection_mode(&outside, ConnectionMode::Loopback);
    println!("Outside leg in loopback:  active={}", endpoint.is_active());

    let totals = endpoint.totals();
    println!(
        "Totals: readers={} writers={} loopbacks={}",
        totals.readers, totals.writers, totals.loopbacks
    );

    // Leaving loopback restores normal operation
    endpoint.set_connection_mode(&outside, ConnectionMode::SendRecv);
    println!("Loopback cleared:         active={}", endpoint.is_active());

    endpoint.delete_connection(&outside).await?;
    endpoint.delete_connection(&inside).await?;
    endpoint.stop();
    Ok(())
}
