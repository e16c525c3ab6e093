//! `uds_server_core`: a from-scratch ISO 14229-1 (UDS) diagnostic server
//! dispatcher and protocol state machine.
//!
//! An [`Instance`](instance::Instance) owns the service dispatch table,
//! session/reset state, P2 timer, and the routine/download registries; the
//! host calls [`Instance::poll`](instance::Instance::poll) cooperatively,
//! handing it the two transport links (physical and functional addressing)
//! and the current millisecond clock reading each time. Ten services are
//! implemented: DiagnosticSessionControl, ECUReset, ReadDataByIdentifier,
//! CommunicationControl, WriteDataByIdentifier, RoutineControl,
//! RequestDownload, TransferData, RequestTransferExit, and TesterPresent.

pub mod communication_type;
pub mod config;
pub mod download;
pub mod error;
pub mod instance;
pub mod middleware;
pub mod negative_response_code;
pub mod registry;
pub mod reset_type;
pub mod response_buffer;
pub mod routine;
pub mod service_id;
pub mod services;
pub mod session;
pub mod session_type;
pub mod suppress;
pub mod transport;
pub mod wire;

pub use communication_type::CommunicationType;
pub use config::ServerConfig;
pub use error::Error;
pub use instance::Instance;
pub use middleware::Middleware;
pub use negative_response_code::NegativeResponseCode;
pub use reset_type::ResetType;
pub use service_id::ServiceId;
pub use session_type::SessionType;

/// `ISO14229_USER_DEFINED_MAX_ROUTINES` in the original source's
/// `iso14229_config.h`.
pub const MAX_ROUTINES: usize = 10;

/// `ISO14229_USER_DEFINED_MAX_DOWNLOAD_HANDLERS` in the original source.
pub const MAX_DOWNLOAD_HANDLERS: usize = 1;
