//! RequestDownload / TransferData / RequestTransferExit (0x34/0x36/0x37,
//! §4.9). Only the `4-byte address, 4-byte size` addressAndLengthFormat is
//! accepted; anything else is out of range for this core.

use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::ServiceRequest;
use crate::wire::{be16, from_be32};

const SUPPORTED_ADDR_AND_LEN_FORMAT: u8 = 0x44;

pub fn handle_request_download<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    if req.data.len() < 2 {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    }
    let data_format_identifier = req.data[0];
    let addr_and_len_format = req.data[1];
    // Checked ahead of the full 10-byte length requirement: a request built
    // for some other address/size width (§4.9) is out of range regardless
    // of how many bytes of address/size it actually carries.
    if addr_and_len_format != SUPPORTED_ADDR_AND_LEN_FORMAT {
        instance.send_negative(req.sid, NegativeResponseCode::RequestOutOfRange);
        return;
    }
    if req.data.len() < 10 {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    }
    let address = from_be32([req.data[2], req.data[3], req.data[4], req.data[5]]);
    let size = from_be32([req.data[6], req.data[7], req.data[8], req.data[9]]);

    let Some(handler) = instance.downloads.selected_mut() else {
        instance.send_negative(req.sid, NegativeResponseCode::UploadDownloadNotAccepted);
        return;
    };
    let on_request = handler.config.on_request;
    let mut max_block_length: u16 = 0;
    let code = on_request(&mut instance.ctx, data_format_identifier, address, size, &mut max_block_length);
    if code != NegativeResponseCode::PositiveResponse {
        instance.send_negative(req.sid, code);
        return;
    }
    if max_block_length == 0 {
        instance.send_negative(req.sid, NegativeResponseCode::GeneralProgrammingFailure);
        return;
    }

    let handler = instance.downloads.selected_mut().expect("checked above");
    handler.activate();

    let clamped = max_block_length.min(4095);
    let mut payload = Vec::with_capacity(3);
    payload.push(0x20); // lengthFormatIdentifier: one nibble each for length-of-length / unused
    payload.extend_from_slice(&be16(clamped));
    instance.send_positive(req.sid, &payload);
}

pub fn handle_transfer_data<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    let Some((&block_sequence_counter, data)) = req.data.split_first() else {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    };

    let Some(handler) = instance.downloads.selected_mut() else {
        instance.send_negative(req.sid, NegativeResponseCode::UploadDownloadNotAccepted);
        return;
    };
    // No separate "not active" gate: an inactive handler's counter sits at
    // its reset value of 1 (§4.9), so TransferData sent with no prior
    // RequestDownload already falls through to the counter-mismatch
    // rejection below unless it happens to guess counter 1.
    if block_sequence_counter != handler.block_sequence_counter() {
        handler.reinitialize();
        instance.send_negative(req.sid, NegativeResponseCode::RequestSequenceError);
        return;
    }

    let on_transfer = handler.config.on_transfer;
    let code = on_transfer(&mut instance.ctx, data);
    let handler = instance.downloads.selected_mut().expect("checked above");
    if code != NegativeResponseCode::PositiveResponse {
        handler.reinitialize();
        instance.send_negative(req.sid, code);
        return;
    }
    handler.advance_counter();
    instance.send_positive(req.sid, &[block_sequence_counter]);
}

pub fn handle_request_transfer_exit<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    let Some(handler) = instance.downloads.selected_mut() else {
        instance.send_negative(req.sid, NegativeResponseCode::UploadDownloadNotAccepted);
        return;
    };
    if !handler.is_active() {
        instance.send_negative(req.sid, NegativeResponseCode::UploadDownloadNotAccepted);
        return;
    }
    let on_exit = handler.config.on_exit;
    let code = on_exit(&mut instance.ctx);
    if code != NegativeResponseCode::PositiveResponse {
        instance.send_negative(req.sid, code);
        return;
    }
    let handler = instance.downloads.selected_mut().expect("checked above");
    handler.reinitialize();
    instance.send_positive(req.sid, &[]);
}
