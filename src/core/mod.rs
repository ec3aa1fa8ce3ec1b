//! Shared handles to the long-lived GPU objects.
//!
//! The device, the queue and the buffer registry are each created once and
//! then reached from the camera, the pipeline and every mesh resource.
//! Everything runs on the event loop thread, so a reference-counted cell is
//! enough.

pub mod st_system;

pub use st_system::StSystem;
