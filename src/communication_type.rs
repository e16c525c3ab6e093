/// `communicationType` parameter of CommunicationControl (0x28). Only the
/// four base values are accepted by this core; anything else is rejected
/// with `IncorrectMessageLengthOrInvalidFormat` (§4.6).
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum CommunicationType {
    EnableRxAndTx = 0x00,
    EnableRxAndDisableTx = 0x01,
    DisableRxAndEnableTx = 0x02,
    DisableRxAndTx = 0x03,
}

impl From<CommunicationType> for u8 {
    fn from(value: CommunicationType) -> Self {
        match value {
            CommunicationType::EnableRxAndTx => 0x00,
            CommunicationType::EnableRxAndDisableTx => 0x01,
            CommunicationType::DisableRxAndEnableTx => 0x02,
            CommunicationType::DisableRxAndTx => 0x03,
        }
    }
}

impl TryFrom<u8> for CommunicationType {
    type Error = ();
    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x00 => Ok(Self::EnableRxAndTx),
            0x01 => Ok(Self::EnableRxAndDisableTx),
            0x02 => Ok(Self::DisableRxAndEnableTx),
            0x03 => Ok(Self::DisableRxAndTx),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_all_u8_values() {
        for i in 0..=u8::MAX {
            let result = CommunicationType::try_from(i);
            match i {
                0..=3 => assert!(result.is_ok()),
                _ => assert!(result.is_err()),
            }
        }
    }
}
