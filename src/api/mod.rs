//! HTTP access to the maintenance API.

pub mod rest;

pub use rest::{RestResource, UpdateMethod};
