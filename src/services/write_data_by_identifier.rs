//! WriteDataByIdentifier (0x2E, §4.7).

use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::ServiceRequest;
use crate::wire::{be16, from_be16};

pub fn handle<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    if req.data.len() < 3 {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    }
    let Some(wdbi) = instance.config.wdbi else {
        instance.send_negative(req.sid, NegativeResponseCode::ServiceNotSupported);
        return;
    };
    let did = from_be16([req.data[0], req.data[1]]);
    let record = &req.data[2..];
    let code = wdbi(&mut instance.ctx, did, record);
    if code != NegativeResponseCode::PositiveResponse {
        instance.send_negative(req.sid, code);
        return;
    }
    instance.send_positive(req.sid, &be16(did));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::service_id::ServiceId;

    fn hard_reset(_ctx: &mut ()) {}

    fn wdbi(_ctx: &mut (), data_id: u16, _data: &[u8]) -> NegativeResponseCode {
        match data_id {
            0x0001 => NegativeResponseCode::PositiveResponse,
            _ => NegativeResponseCode::RequestOutOfRange,
        }
    }

    fn instance() -> Instance<()> {
        let config = ServerConfig::new(0x7A0, 0x7DF, 0x7A8, hard_reset, 50, 2000, 5000)
            .with_wdbi(wdbi);
        let mut instance = Instance::new(config, (), 0);
        instance
            .enable(ServiceId::WriteDataByIdentifier.into())
            .unwrap();
        instance
    }

    #[test]
    fn echoes_did_on_success() {
        let mut instance = instance();
        handle(
            &mut instance,
            ServiceRequest {
                sid: 0x2E,
                data: &[0x00, 0x01, 0xAB],
                now_ms: 0,
            },
        );
        assert_eq!(instance.response.bytes(), &[0x6E, 0x00, 0x01]);
    }

    #[test]
    fn callback_negative_code_propagates() {
        let mut instance = instance();
        handle(
            &mut instance,
            ServiceRequest {
                sid: 0x2E,
                data: &[0xFF, 0xFF, 0xAB],
                now_ms: 0,
            },
        );
        assert_eq!(instance.response.bytes(), &[0x7F, 0x2E, 0x31]);
    }

    #[test]
    fn short_request_is_rejected() {
        let mut instance = instance();
        handle(
            &mut instance,
            ServiceRequest {
                sid: 0x2E,
                data: &[0x00, 0x01],
                now_ms: 0,
            },
        );
        assert_eq!(instance.response.bytes(), &[0x7F, 0x2E, 0x13]);
    }

    #[test]
    fn missing_callback_is_service_not_supported() {
        let config = ServerConfig::new(0x7A0, 0x7DF, 0x7A8, hard_reset, 50, 2000, 5000);
        let mut instance = Instance::new(config, (), 0);
        instance
            .enable(ServiceId::WriteDataByIdentifier.into())
            .unwrap();
        handle(
            &mut instance,
            ServiceRequest {
                sid: 0x2E,
                data: &[0x00, 0x01, 0xAB],
                now_ms: 0,
            },
        );
        assert_eq!(instance.response.bytes(), &[0x7F, 0x2E, 0x11]);
    }
}
