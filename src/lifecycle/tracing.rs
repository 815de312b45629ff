//! # Logging
//!
//! [`setup_tracing`] installs the `tracing` subscriber for the console binary. Call it once,
//! before the [`ConsoleSystem`](super::ConsoleSystem) is built.
//!
//! The level comes from `RUST_LOG`:
//!
//! ```bash
//! # Store lifecycle, confirmed writes and refused transitions
//! RUST_LOG=info elevator-console summary
//!
//! # Every request with its payload, cache hits of the geocoder
//! RUST_LOG=debug elevator-console geocode
//!
//! # Only the order store
//! RUST_LOG=elevator_console::order_actor=debug elevator-console finalize <id>
//! ```
//!
//! The format is compact and hides module paths; the actors tag their lines with
//! `entity_type` instead. A finalize at `info` reads:
//!
//! ```text
//! INFO Actor started entity_type="ServiceOrder"
//! INFO Status changed order=OS-2024-001 from=in-progress to=completed
//! INFO Action ok entity_type="ServiceOrder" id=o1
//! INFO Stock debited order=OS-2024-001 part=p1 before=10 after=8
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
