use crate::error::Error;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Frames a sealed message for the wire.
///
/// Format: standard base64 of msg_num (4 bytes, big endian) || AEAD output.
pub(crate) fn encode_message(msg_num: u32, sealed: &[u8]) -> String {
    let mut framed = Vec::with_capacity(4 + sealed.len());
    framed.extend_from_slice(&msg_num.to_be_bytes());
    framed.extend_from_slice(sealed);
    BASE64.encode(framed)
}

/// Splits a wire string into its message number and AEAD ciphertext.
pub(crate) fn decode_message(input: &str) -> Result<(u32, Vec<u8>), Error> {
    let data = BASE64
        .decode(input)
        .map_err(|err| Error::InvalidEncoding(err.to_string()))?;

    if data.len() < 4 {
        return Err(Error::InvalidEncoding(
            "message shorter than its number prefix".to_string(),
        ));
    }

    let msg_num = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    Ok((msg_num, data[4..].to_vec()))
}
