// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Captured body payload decoding.

use base64::Engine;
use bytes::Bytes;

/// Decode a base64 body payload into raw bytes.
///
/// Missing `=` padding is restored before decoding. Absent, empty or
/// undecodable payloads all yield an empty body.
pub fn decode_body(data: Option<&str>) -> Bytes {
    let Some(data) = data.filter(|d| !d.is_empty()) else {
        return Bytes::new();
    };

    let mut padded = data.to_string();
    let rem = padded.len() % 4;
    if rem != 0 {
        padded.extend(std::iter::repeat('=').take(4 - rem));
    }

    match base64::engine::general_purpose::STANDARD.decode(padded.as_bytes()) {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            tracing::debug!(error = %e, "body payload is not valid base64, using empty body");
            Bytes::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("aGVsbG8="), b"hello".as_slice())]
    #[case(Some("aGVsbG8"), b"hello".as_slice())]
    #[case(Some("aGk"), b"hi".as_slice())]
    #[case(Some("YQ"), b"a".as_slice())]
    #[case(Some(""), b"".as_slice())]
    #[case(None, b"".as_slice())]
    #[case(Some("!!not base64!!"), b"".as_slice())]
    #[case(Some("aGVsb"), b"".as_slice())]
    fn decode_cases(#[case] input: Option<&str>, #[case] expected: &[u8]) {
        assert_eq!(decode_body(input).as_ref(), expected);
    }

    #[test]
    fn binary_payload_survives() {
        let raw: Vec<u8> = (0u8..=255).collect();
        let encoded = base64::engine::general_purpose::STANDARD.encode(&raw);
        let trimmed = encoded.trim_end_matches('=');
        assert_eq!(decode_body(Some(trimmed)).as_ref(), raw.as_slice());
    }
}
