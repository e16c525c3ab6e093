use thiserror::Error;

/// Programmer-facing failures: registration/initialization mistakes made by the
/// integrator. These are never placed on the wire — protocol-level failures are
/// always expressed as a [`crate::NegativeResponseCode`] instead (see §7 of the
/// design: the two regimes are kept deliberately distinct).
#[derive(Error, Debug)]
pub enum Error {
    #[error("service id {0:#04X} is not one of the services this core implements")]
    UnknownServiceId(u8),
    #[error("routine registry is full (max {max} entries)", max = crate::MAX_ROUTINES)]
    RoutineRegistryFull,
    #[error("routine id {0:#06X} is already registered")]
    DuplicateRoutineId(u16),
    #[error(
        "download handler registry is full (max {max} entries)",
        max = crate::MAX_DOWNLOAD_HANDLERS
    )]
    DownloadHandlerRegistryFull,
}
