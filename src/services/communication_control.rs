//! CommunicationControl (0x28, §4.6).

use crate::communication_type::CommunicationType;
use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::ServiceRequest;

pub fn handle<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    if req.data.len() < 4 {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    }
    let control_type = req.data[0];
    if CommunicationType::try_from(req.data[1]).is_err() {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    }
    // node_id (req.data[2..4]) selects which subnet to apply the change to;
    // this core has nowhere further to route it and only echoes controlType.
    instance.send_positive(req.sid, &[control_type]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::service_id::ServiceId;

    fn hard_reset(_ctx: &mut ()) {}

    fn instance() -> Instance<()> {
        let config = ServerConfig::new(0x7A0, 0x7DF, 0x7A8, hard_reset, 50, 2000, 5000);
        let mut instance = Instance::new(config, (), 0);
        instance
            .enable(ServiceId::CommunicationControl.into())
            .unwrap();
        instance
    }

    #[test]
    fn echoes_control_type_on_success() {
        let mut instance = instance();
        handle(
            &mut instance,
            ServiceRequest {
                sid: 0x28,
                data: &[0x03, 0x00, 0x12, 0x34],
                now_ms: 0,
            },
        );
        assert_eq!(instance.response.bytes(), &[0x68, 0x03]);
    }

    #[test]
    fn invalid_communication_type_is_rejected() {
        let mut instance = instance();
        handle(
            &mut instance,
            ServiceRequest {
                sid: 0x28,
                data: &[0x00, 0x04, 0x12, 0x34],
                now_ms: 0,
            },
        );
        assert_eq!(instance.response.bytes(), &[0x7F, 0x28, 0x13]);
    }

    #[test]
    fn short_request_is_rejected() {
        let mut instance = instance();
        handle(
            &mut instance,
            ServiceRequest {
                sid: 0x28,
                data: &[0x00, 0x00, 0x12],
                now_ms: 0,
            },
        );
        assert_eq!(instance.response.bytes(), &[0x7F, 0x28, 0x13]);
    }
}
