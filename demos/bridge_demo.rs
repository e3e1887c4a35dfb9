//! Bridge demo: audio and event fan-out between connection groups
//!
//! Run with: cargo run --example bridge_demo
//!
//! Creates one wire-facing (outside) connection and two bridging (inside)
//! connections on a splitter endpoint, feeds PCM audio and a DTMF-style
//! event into the outside leg, and shows the media arriving on the inside
//! legs once both sides have an effective reader and writer.

use std::time::Duration;

use bytes::Bytes;

use mediasplit::{AudioFrame, ConnectionMode, ConnectionType, OobFrame, SplitterEndpoint};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mediasplit=debug".parse()?),
        )
        .init();

    let endpoint = SplitterEndpoint::with_defaults("bridge-demo");
    endpoint.start();

    // One remote party, two server-side bridge legs
    let outside = endpoint.create_connection(ConnectionType::Outside).await?;
    let bridge_a = endpoint.create_connection(ConnectionType::Inside).await?;
    let bridge_b = endpoint.create_connection(ConnectionType::Inside).await?;

    println!(
        "Attached connections: outside={} inside={} inside={}",
        outside.id(),
        bridge_a.id(),
        bridge_b.id()
    );

    // No modes set yet: nothing is read or written, splitters stay idle
    println!("Splitters active before modes: {}", endpoint.is_active());

    endpoint.set_connection_mode(&outside, ConnectionMode::SendRecv);
    endpoint.set_connection_mode(&bridge_a, ConnectionMode::SendRecv);
    endpoint.set_connection_mode(&bridge_b, ConnectionMode::SendRecv);
    println!("Splitters active after modes:  {}", endpoint.is_active());

    // Feed media into the outside leg as its transport would
    for n in 0..5u32 {
        let samples: Vec<i16> = (0..160i16).map(|i| ((i + n as i16 * 7) % 64) * 100).collect();
        outside.component().audio().push(AudioFrame::from_samples(n * 20, &samples));
    }
    outside
        .component()
        .oob()
        .push(OobFrame::new(0, Bytes::from_static(b"dtmf:5")));

    // Let a few scheduler ticks run
    tokio::time::sleep(Duration::from_millis(150)).await;

    let mut relayed = 0;
    while bridge_a.component().audio().take().is_some() {
        relayed += 1;
    }
    println!("Audio frames delivered to bridge leg {}: {}", bridge_a.id(), relayed);

    if let Some(event) = bridge_b.component().oob().take() {
        println!(
            "Event delivered to bridge leg {}: {:?}",
            bridge_b.id(),
            event.data
        );
    }

    let stats = endpoint.stats().await;
    println!(
        "Stats: connections={} readers={} writers={} loopbacks={} relayed={}",
        stats.connections,
        stats.readers,
        stats.writers,
        stats.loopbacks,
        stats.frames_relayed()
    );

    // Tear everything down; the endpoint goes idle again
    endpoint.delete_connection(&outside).await?;
    endpoint.delete_connection(&bridge_a).await?;
    endpoint.delete_connection(&bridge_b).await?;
    println!("Splitters active after teardown: {}", endpoint.is_active());

    endpoint.stop();
    Ok(())
}
