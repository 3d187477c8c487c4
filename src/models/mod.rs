//! Data models for the MyRepairApp API.
//!
//! This module contains type definitions for the service's domain
//! objects: inventory items with their category/type taxonomy, checkin
//! tickets with their activity log, and customers. Each type converts
//! to and from the service's JSON wire format.

mod common;
mod customer;
mod inventory;
mod ticket;

pub use common::RecordKind;
pub use customer::*;
pub use inventory::*;
pub use ticket::*;
