//! Example: Driving a tag through its lifecycle
//!
//! Run with: cargo run --example simple_tag
//!
//! This example demonstrates:
//! - Creating tags from attribute strings
//! - Reading and writing typed values
//! - Watching read/write events through a callback
//! - Handling rejected accesses

use plctag_stub::{PlcStub, StubConfig, TagError};
use tracing_subscriber::EnvFilter;

fn main() -> plctag_stub::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let stub = PlcStub::new(StubConfig::default());
    stub.set_debug_level(5);

    // =========================================================================
    // Creating tags
    // =========================================================================

    println!("=== Creating Tags ===\n");

    let counter = stub.create_tag(
        "protocol=ab_eip&gateway=10.0.0.2&path=1,0&name=Counter&elem_size=4&elem_count=4",
        1000,
    )?;
    let setpoint = stub.create_tag("name=Setpoint&elem_size=8&elem_count=1", 1000)?;

    for tag in stub.tags() {
        println!(
            "tag {} = {} ({} x {} bytes)",
            tag,
            stub.name(tag)?,
            stub.element_count(tag)?,
            stub.element_size(tag)?
        );
    }

    // =========================================================================
    // Events
    // =========================================================================

    println!("\n=== Events ===\n");

    stub.register_callback(counter, |tag, event, status| {
        println!("  tag {} -> {} ({})", tag, event, status);
    })?;

    stub.read(counter, 1000)?;
    for i in 0..4 {
        stub.set_int32(counter, i * 4, i * 100)?;
    }
    println!("Counter[2] = {}", stub.get_int32(counter, 8)?);

    stub.unregister_callback(counter)?;

    // =========================================================================
    // Typed values
    // =========================================================================

    println!("\n=== Typed Values ===\n");

    stub.set_float64(setpoint, 0, 72.5)?;
    println!("Setpoint = {}", stub.get_float64(setpoint, 0)?);
    println!("Raw bytes = {:?}", stub.get_raw_bytes(setpoint, 0, 8)?);

    // =========================================================================
    // Rejected accesses
    // =========================================================================

    println!("\n=== Errors ===\n");

    match stub.get_int32(counter, 16) {
        Err(e @ TagError::OutOfBounds { .. }) => {
            println!("rejected: {} (code {})", e, e.status().code())
        }
        other => println!("unexpected: {:?}", other),
    }

    match stub.create_tag("elem_size=4", 0) {
        Err(e) => println!("rejected: {}", e),
        Ok(tag) => println!("unexpected tag {}", tag),
    }

    Ok(())
}
