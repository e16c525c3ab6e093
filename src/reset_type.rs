/// Reset type, the sub-function of ECUReset (0x11). Every value decodes —
/// unlike [`crate::SessionType`] there is no invalid encoding, the server
/// always echoes `reset_type` back in the positive response (§4.4); only
/// [`ResetType::HardReset`] arms the deferred-reset latch.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ResetType {
    HardReset = Self::HARD_RESET,
    KeyOffOnReset = Self::KEY_OFF_ON_RESET,
    SoftReset = Self::SOFT_RESET,
    EnableRapidPowerShutDown = Self::ENABLE_RAPID_POWER_SHUTDOWN,
    DisableRapidPowerShutDown = Self::DISABLE_RAPID_POWER_SHUTDOWN,
    /// Anything else in the low 6 bits: reserved/manufacturer-specific
    /// ranges the original source also just echoes back unexamined.
    Other(u8),
}

impl ResetType {
    pub const HARD_RESET: u8 = 0x01;
    pub const KEY_OFF_ON_RESET: u8 = 0x02;
    pub const SOFT_RESET: u8 = 0x03;
    pub const ENABLE_RAPID_POWER_SHUTDOWN: u8 = 0x04;
    pub const DISABLE_RAPID_POWER_SHUTDOWN: u8 = 0x05;
    /// Sub-function byte carries the reset type in its low 6 bits; bit 7 is
    /// the suppress-positive-response bit and is stripped before this point.
    pub const SUBFUNCTION_MASK: u8 = 0x3F;
}

impl From<u8> for ResetType {
    fn from(value: u8) -> Self {
        let masked = value & Self::SUBFUNCTION_MASK;
        match masked {
            Self::HARD_RESET => Self::HardReset,
            Self::KEY_OFF_ON_RESET => Self::KeyOffOnReset,
            Self::SOFT_RESET => Self::SoftReset,
            Self::ENABLE_RAPID_POWER_SHUTDOWN => Self::EnableRapidPowerShutDown,
            Self::DISABLE_RAPID_POWER_SHUTDOWN => Self::DisableRapidPowerShutDown,
            other => Self::Other(other),
        }
    }
}

impl From<ResetType> for u8 {
    fn from(value: ResetType) -> Self {
        match value {
            ResetType::HardReset => ResetType::HARD_RESET,
            ResetType::KeyOffOnReset => ResetType::KEY_OFF_ON_RESET,
            ResetType::SoftReset => ResetType::SOFT_RESET,
            ResetType::EnableRapidPowerShutDown => ResetType::ENABLE_RAPID_POWER_SHUTDOWN,
            ResetType::DisableRapidPowerShutDown => ResetType::DISABLE_RAPID_POWER_SHUTDOWN,
            ResetType::Other(value) => value,
        }
    }
}
