use std::fmt;

/// The ten service identifiers this core dispatches (§4.1). Requests
/// carrying any other SID are rejected by the registry with
/// `ServiceNotSupported` before a handler is ever looked up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ServiceId {
    DiagnosticSessionControl = Self::DIAGNOSTIC_SESSION_CONTROL,
    EcuReset = Self::ECU_RESET,
    ReadDataByIdentifier = Self::READ_DATA_BY_IDENTIFIER,
    CommunicationControl = Self::COMMUNICATION_CONTROL,
    WriteDataByIdentifier = Self::WRITE_DATA_BY_IDENTIFIER,
    RoutineControl = Self::ROUTINE_CONTROL,
    RequestDownload = Self::REQUEST_DOWNLOAD,
    TransferData = Self::TRANSFER_DATA,
    RequestTransferExit = Self::REQUEST_TRANSFER_EXIT,
    TesterPresent = Self::TESTER_PRESENT,
}

impl ServiceId {
    pub const DIAGNOSTIC_SESSION_CONTROL: u8 = 0x10;
    pub const ECU_RESET: u8 = 0x11;
    pub const READ_DATA_BY_IDENTIFIER: u8 = 0x22;
    pub const COMMUNICATION_CONTROL: u8 = 0x28;
    pub const WRITE_DATA_BY_IDENTIFIER: u8 = 0x2E;
    pub const ROUTINE_CONTROL: u8 = 0x31;
    pub const REQUEST_DOWNLOAD: u8 = 0x34;
    pub const TRANSFER_DATA: u8 = 0x36;
    pub const REQUEST_TRANSFER_EXIT: u8 = 0x37;
    pub const TESTER_PRESENT: u8 = 0x3E;

    /// Positive-response SID: request SID + 0x40 (§6 Wire format).
    #[must_use]
    pub const fn response_sid(self) -> u8 {
        (self as u8) + 0x40
    }

    pub const ALL: [ServiceId; 10] = [
        Self::DiagnosticSessionControl,
        Self::EcuReset,
        Self::ReadDataByIdentifier,
        Self::CommunicationControl,
        Self::WriteDataByIdentifier,
        Self::RoutineControl,
        Self::RequestDownload,
        Self::TransferData,
        Self::RequestTransferExit,
        Self::TesterPresent,
    ];
}

impl TryFrom<u8> for ServiceId {
    type Error = ();
    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            Self::DIAGNOSTIC_SESSION_CONTROL => Ok(Self::DiagnosticSessionControl),
            Self::ECU_RESET => Ok(Self::EcuReset),
            Self::READ_DATA_BY_IDENTIFIER => Ok(Self::ReadDataByIdentifier),
            Self::COMMUNICATION_CONTROL => Ok(Self::CommunicationControl),
            Self::WRITE_DATA_BY_IDENTIFIER => Ok(Self::WriteDataByIdentifier),
            Self::ROUTINE_CONTROL => Ok(Self::RoutineControl),
            Self::REQUEST_DOWNLOAD => Ok(Self::RequestDownload),
            Self::TRANSFER_DATA => Ok(Self::TransferData),
            Self::REQUEST_TRANSFER_EXIT => Ok(Self::RequestTransferExit),
            Self::TESTER_PRESENT => Ok(Self::TesterPresent),
            _ => Err(()),
        }
    }
}

impl From<ServiceId> for u8 {
    fn from(value: ServiceId) -> Self {
        value as u8
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DiagnosticSessionControl => "DiagnosticSessionControl",
            Self::EcuReset => "ECUReset",
            Self::ReadDataByIdentifier => "ReadDataByIdentifier",
            Self::CommunicationControl => "CommunicationControl",
            Self::WriteDataByIdentifier => "WriteDataByIdentifier",
            Self::RoutineControl => "RoutineControl",
            Self::RequestDownload => "RequestDownload",
            Self::TransferData => "TransferData",
            Self::RequestTransferExit => "RequestTransferExit",
            Self::TesterPresent => "TesterPresent",
        };
        write!(f, "{name} ({:#04X})", *self as u8)
    }
}
