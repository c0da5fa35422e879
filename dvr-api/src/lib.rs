//! Typed client for a network recorder's JSON control API
//!
//! The recorder splits its API across two ports by functional area and
//! answers every request with loosely-structured JSON. This crate hides both:
//! [`Transport`] picks the port and decodes the body, [`shape`] finds the
//! current-program record wherever a firmware put it, and [`DvrClient`]
//! exposes the channel, reservation and recording operations.
//!
//! ```no_run
//! use dvr_api::{DeviceEndpoint, DvrClient, NewReservation, TuningIds};
//!
//! let client = DvrClient::new(DeviceEndpoint::new("192.168.1.20"));
//! if !client.test_connection() {
//!     return Ok(());
//! }
//!
//! let tuning = TuningIds { network_id: 32736, transport_stream_id: 32736, service_id: 1024 };
//! let lookup = client.program_detail(&tuning)?;
//! if let Some(program) = lookup.program {
//!     client.create_reservation(&NewReservation::from_program(tuning, &program))?;
//! }
//! # Ok::<(), dvr_api::ApiError>(())
//! ```

pub mod client;
pub mod error;
mod json;
pub mod models;
pub mod operation;
pub mod operations;
pub mod service;
pub mod shape;
pub mod transport;

pub use client::DvrClient;
pub use error::{ApiError, Result};
pub use models::{
    BroadcastBand, Channel, DeviceStatus, NewReservation, ProgramLookup, ProgramRecord, Recording,
    Reservation, TuningIds,
};
pub use operation::DeviceOperation;
pub use operations::Page;
pub use service::{DeviceEndpoint, DevicePorts, Service};
pub use shape::extract_program;
pub use transport::{Params, RequestDescriptor, Transport};
