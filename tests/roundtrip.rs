//! End-to-end tests: bytes -> text -> bytes through every public entry point.

use base262144::decode::{
    decode_bytes, decode_chars, decode_str_with, decode_to_vec, DecodeConfig,
    DecodeError,
};
use base262144::encode::{
    encode_to_bytes, encode_to_chars, encode_to_string, encoded_len,
    padding_bits,
};
use base262144::symbol::{symbol_to_value, value_to_symbol, OutOfRange};
use base262144::{count_scalars, decode, encode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn header(text: &str) -> u32 {
    let first = text.chars().next().expect("encoded text is never empty");
    symbol_to_value(first).expect("header is a valid symbol")
}

/// Lengths 1, 2, 3, 17, 18, 19 together cover every padding remainder.
#[test]
fn test_round_trip_small_lengths() {
    for len in [0, 1, 2, 3, 17, 18, 19] {
        let data: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
        let text = encode(&data);
        assert_eq!(decode(&text).unwrap(), data, "len = {}", len);
    }
}

#[test]
fn test_round_trip_every_padding() {
    let mut seen = [false; 18];
    for len in 0..=64_usize {
        let data = vec![0xff_u8; len];
        let text = encode(&data);
        let pad = header(&text);
        assert_eq!(pad, (18 - (8 * len as u32) % 18) % 18);
        assert_eq!(pad, padding_bits(len));
        seen[pad as usize] = true;
        assert_eq!(decode(&text).unwrap(), data, "len = {}", len);
    }
    // Only even paddings occur, because byte lengths are multiples of 8.
    for (pad, seen) in seen.iter().enumerate() {
        assert_eq!(*seen, pad % 2 == 0, "pad = {}", pad);
    }
}

#[test]
fn test_round_trip_random() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x4_0000);
    for _ in 0..200 {
        let len = rng.gen_range(0..600);
        let mut data = vec![0_u8; len];
        rng.fill(&mut data[..]);

        let text = encode(&data);
        assert_eq!(count_scalars(&text), encoded_len(len).unwrap());
        assert_eq!(text.len(), 4 * count_scalars(&text));
        assert_eq!(decode(&text).unwrap(), data);
    }
}

#[test]
fn test_empty_identity() {
    let text = encode(&[]);
    assert_eq!(text, "\u{10000}");
    assert_eq!(count_scalars(&text), 1);
    assert_eq!(decode(&text).unwrap(), Vec::<u8>::new());
    assert_eq!(decode("").unwrap(), Vec::<u8>::new());
}

#[test]
fn test_single_byte_scenario() {
    let text = encode(&[0x41]);
    let values: Vec<u32> =
        text.chars().map(|c| symbol_to_value(c).unwrap()).collect();
    assert_eq!(values, [10, 0x10400]);
    assert_eq!(decode(&text).unwrap(), [0x41]);
}

#[test]
fn test_three_zero_bytes_scenario() {
    let text = encode(&[0, 0, 0]);
    let values: Vec<u32> =
        text.chars().map(|c| symbol_to_value(c).unwrap()).collect();
    assert_eq!(values, [12, 0, 0]);
    assert_eq!(decode(&text).unwrap(), [0, 0, 0]);
}

#[test]
fn test_payload_digit_count() {
    for n in 0..200_usize {
        let text = encode(&vec![0x5a; n]);
        assert_eq!(count_scalars(&text) - 1, (8 * n + 17) / 18, "n = {}", n);
    }
}

#[test]
fn test_symbol_range() {
    for v in [0, 1, 17, 18, 0x10400, 0x3fffe, 0x3ffff] {
        assert_eq!(symbol_to_value(value_to_symbol(v).unwrap()), Ok(v));
    }
    assert_eq!(value_to_symbol(0x40000), Err(OutOfRange(0x40000)));
}

#[test]
fn test_malformed_header_rejected() {
    for v in [18, 19, 100, 0x3ffff] {
        let mut text = String::new();
        text.push(value_to_symbol(v).unwrap());
        text.push_str(&encode(b"payload")[4..]);
        assert_eq!(
            decode(&text),
            Err(DecodeError::MalformedHeader {
                padding: v,
            }),
        );
    }
}

#[test]
fn test_foreign_symbols_rejected() {
    let text = encode(b"some payload");
    let symbols: Vec<char> = text.chars().collect();
    for bad in ['\u{ffff}', '\u{50000}', 'Z', '\u{10ffff}'] {
        for at in 0..symbols.len() {
            let mut corrupted = symbols.clone();
            corrupted[at] = bad;
            let corrupted: String = corrupted.into_iter().collect();
            assert_eq!(
                decode(&corrupted),
                Err(DecodeError::InvalidSymbol {
                    symbol: bad,
                    position: at,
                }),
            );
        }
    }
}

#[test]
fn test_streaming_apis_agree() {
    let mut rng = ChaCha8Rng::seed_from_u64(18);
    for _ in 0..50 {
        let len = rng.gen_range(0..100);
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        let text = encode_to_string(data.iter().copied());
        let chars: Vec<char> = encode_to_chars(data.iter().copied()).collect();
        let utf8: Vec<u8> = encode_to_bytes(data.iter().copied()).collect();
        assert_eq!(chars.iter().collect::<String>(), text);
        assert_eq!(utf8, text.as_bytes());

        assert_eq!(decode_to_vec(decode_chars(chars)).unwrap(), data);
        assert_eq!(decode_to_vec(decode_bytes(utf8)).unwrap(), data);
    }
}

#[test]
fn test_relaxed_decoding_of_wrapped_text() {
    let data: Vec<u8> = (0..=255).collect();
    let text = encode(&data);
    let mut wrapped = String::new();
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % 16 == 0 {
            wrapped.push('\n');
        }
        wrapped.push(c);
    }
    wrapped.push('\n');

    let mut config = DecodeConfig::new();
    assert!(decode_to_vec(decode_str_with(&wrapped, config)).is_err());
    config.relaxed = true;
    assert_eq!(
        decode_to_vec(decode_str_with(&wrapped, config)).unwrap(),
        data,
    );
}

#[test]
fn test_padding_bits_are_zero() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for len in 1..50_usize {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let text = encode(&data);
        let pad = header(&text);
        let last = text.chars().last().unwrap();
        let value = symbol_to_value(last).unwrap();
        assert_eq!(value & ((1 << pad) - 1), 0, "len = {}", len);
    }
}
