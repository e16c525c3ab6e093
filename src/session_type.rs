/// Diagnostic session type, the sub-function of DiagnosticSessionControl
/// (0x10). Unlike [`crate::ResetType`], values outside the three sessions
/// this core recognizes are rejected rather than echoed back — the design
/// calls for `ServiceNotSupported` on anything else. The conversion's error
/// carries no payload: callers translate a failed `TryFrom` directly into
/// that negative response code.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum SessionType {
    Default = Self::DEFAULT,
    Programming = Self::PROGRAMMING,
    Extended = Self::EXTENDED,
}

impl SessionType {
    pub const DEFAULT: u8 = 0x01;
    pub const PROGRAMMING: u8 = 0x02;
    pub const EXTENDED: u8 = 0x03;
}

impl From<SessionType> for u8 {
    fn from(value: SessionType) -> Self {
        match value {
            SessionType::Default => SessionType::DEFAULT,
            SessionType::Programming => SessionType::PROGRAMMING,
            SessionType::Extended => SessionType::EXTENDED,
        }
    }
}

impl TryFrom<u8> for SessionType {
    type Error = ();
    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            Self::DEFAULT => Ok(Self::Default),
            Self::PROGRAMMING => Ok(Self::Programming),
            Self::EXTENDED => Ok(Self::Extended),
            _ => Err(()),
        }
    }
}
