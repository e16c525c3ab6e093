//! Per-SID request handlers (C6). Each module owns parsing, validation, and
//! positive/negative response construction for exactly one request shape;
//! every `handle` function finishes by calling exactly one of
//! [`crate::instance::Instance::send_positive`] or
//! [`crate::instance::Instance::send_negative`] (§4.2).

pub mod communication_control;
pub mod diagnostic_session_control;
pub mod download;
pub mod ecu_reset;
pub mod read_data_by_identifier;
pub mod routine_control;
pub mod tester_present;
pub mod write_data_by_identifier;
