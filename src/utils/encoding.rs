//! Encoding utilities for converting between UTF-8 and SHIFT-JIS / EUC-JP.
//!
//! Uses encoding_rs crate instead of platform APIs for portability. The
//! transformers in `core` only ever ask this module to encode or decode a
//! single code point, so every failure stays local to that one attempt.

use std::fmt;
use std::str::FromStr;

use encoding_rs::{DecoderResult, Encoding, EncoderResult, EUC_JP, SHIFT_JIS, UTF_8};

use crate::error::ConvError;

/// Size of the per-call scratch array used for one code point.
///
/// Large enough for any single character in the supported encodings in
/// either direction (UTF-8 needs at most 4 bytes, the legacy encodings 3).
pub const MAX_CHAR_BYTES: usize = 8;

/// Longest byte sequence that can make up one code point on the decode side.
pub const MAX_SEQUENCE_LEN: usize = 4;

/// Target encoding chosen once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingSelector {
    #[default]
    ShiftJis,
    EucJp,
    Utf8,
}

impl EncodingSelector {
    /// Resolve a user supplied label.
    ///
    /// Accepts the short names `sjis`, `shiftjis`, `eucjp`, `euc` and `utf8`
    /// as well as any WHATWG label that resolves to one of the supported
    /// encodings (`Shift_JIS`, `windows-31j`, `EUC-JP`, `UTF-8`, ...).
    pub fn from_label(label: &str) -> Result<Self, ConvError> {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "sjis" | "shiftjis" => return Ok(Self::ShiftJis),
            "eucjp" | "euc" => return Ok(Self::EucJp),
            "utf8" => return Ok(Self::Utf8),
            _ => {}
        }

        match Encoding::for_label(trimmed.as_bytes()) {
            Some(encoding) if encoding == SHIFT_JIS => Ok(Self::ShiftJis),
            Some(encoding) if encoding == EUC_JP => Ok(Self::EucJp),
            Some(encoding) if encoding == UTF_8 => Ok(Self::Utf8),
            _ => Err(ConvError::UnsupportedEncoding(label.to_string())),
        }
    }

    pub fn encoding(self) -> &'static Encoding {
        match self {
            Self::ShiftJis => SHIFT_JIS,
            Self::EucJp => EUC_JP,
            Self::Utf8 => UTF_8,
        }
    }

    pub fn codec(self) -> LegacyCodec {
        LegacyCodec::new(self.encoding())
    }
}

impl FromStr for EncodingSelector {
    type Err = ConvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for EncodingSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encoding().name())
    }
}

/// Capability to encode exactly one code point.
pub trait CharEncoder {
    /// Encode `c` into `scratch`, returning the produced bytes or `None` when
    /// the target encoding has no representation for it.
    fn encode_char<'a>(&self, c: char, scratch: &'a mut [u8; MAX_CHAR_BYTES]) -> Option<&'a [u8]>;
}

/// Outcome of decoding one code point from the front of a byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStep {
    /// `consumed` source bytes produced `written` UTF-8 bytes in the scratch.
    Decoded { consumed: usize, written: usize },
    /// The slice ends inside a sequence and more input may still arrive.
    Incomplete,
    /// The leading byte does not start a valid sequence.
    Malformed,
}

/// Capability to decode exactly one code point.
pub trait CharDecoder {
    fn decode_char(&self, src: &[u8], last: bool, scratch: &mut [u8; MAX_CHAR_BYTES]) -> DecodeStep;
}

/// Per-code-point codec backed by an `encoding_rs` encoding.
#[derive(Debug, Clone, Copy)]
pub struct LegacyCodec {
    encoding: &'static Encoding,
}

impl LegacyCodec {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }
}

impl CharEncoder for LegacyCodec {
    fn encode_char<'a>(&self, c: char, scratch: &'a mut [u8; MAX_CHAR_BYTES]) -> Option<&'a [u8]> {
        let mut utf8 = [0u8; 4];
        let text: &str = c.encode_utf8(&mut utf8);

        // The Japanese encoders are stateless, so a fresh encoder per
        // character costs nothing and never leaks state between attempts.
        let mut encoder = self.encoding.new_encoder();
        let (result, _read, written) =
            encoder.encode_from_utf8_without_replacement(text, &mut scratch[..], true);

        match result {
            EncoderResult::InputEmpty => Some(&scratch[..written]),
            EncoderResult::Unmappable(_) | EncoderResult::OutputFull => None,
        }
    }
}

impl CharDecoder for LegacyCodec {
    fn decode_char(&self, src: &[u8], last: bool, scratch: &mut [u8; MAX_CHAR_BYTES]) -> DecodeStep {
        let mut decoder = self.encoding.new_decoder_without_bom_handling();
        let limit = src.len().min(MAX_SEQUENCE_LEN);

        // Feed one byte at a time so the decoder stops right after the first
        // complete character instead of running ahead.
        for (index, byte) in src[..limit].iter().enumerate() {
            let (result, _read, written) = decoder.decode_to_utf8_without_replacement(
                std::slice::from_ref(byte),
                &mut scratch[..],
                false,
            );
            match result {
                DecoderResult::InputEmpty if written > 0 => {
                    return DecodeStep::Decoded {
                        consumed: index + 1,
                        written,
                    };
                }
                DecoderResult::InputEmpty => {}
                DecoderResult::Malformed(_, _) | DecoderResult::OutputFull => {
                    return DecodeStep::Malformed;
                }
            }
        }

        if last || limit == MAX_SEQUENCE_LEN {
            DecodeStep::Malformed
        } else {
            DecodeStep::Incomplete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(selector: EncodingSelector, c: char) -> Option<Vec<u8>> {
        let mut scratch = [0u8; MAX_CHAR_BYTES];
        selector.codec().encode_char(c, &mut scratch).map(|b| b.to_vec())
    }

    fn decode(selector: EncodingSelector, src: &[u8], last: bool) -> (DecodeStep, String) {
        let mut scratch = [0u8; MAX_CHAR_BYTES];
        let step = selector.codec().decode_char(src, last, &mut scratch);
        let text = match step {
            DecodeStep::Decoded { written, .. } => {
                String::from_utf8(scratch[..written].to_vec()).unwrap()
            }
            _ => String::new(),
        };
        (step, text)
    }

    #[test]
    fn test_selector_short_names() {
        assert_eq!(EncodingSelector::from_label("sjis").unwrap(), EncodingSelector::ShiftJis);
        assert_eq!(EncodingSelector::from_label("ShiftJIS").unwrap(), EncodingSelector::ShiftJis);
        assert_eq!(EncodingSelector::from_label("eucjp").unwrap(), EncodingSelector::EucJp);
        assert_eq!(EncodingSelector::from_label("euc").unwrap(), EncodingSelector::EucJp);
        assert_eq!(EncodingSelector::from_label("utf8").unwrap(), EncodingSelector::Utf8);
    }

    #[test]
    fn test_selector_whatwg_labels() {
        assert_eq!(EncodingSelector::from_label("SHIFT_JIS").unwrap(), EncodingSelector::ShiftJis);
        assert_eq!(EncodingSelector::from_label("windows-31j").unwrap(), EncodingSelector::ShiftJis);
        assert_eq!(EncodingSelector::from_label(" EUC-JP ").unwrap(), EncodingSelector::EucJp);
        assert_eq!("utf-8".parse::<EncodingSelector>().unwrap(), EncodingSelector::Utf8);
    }

    #[test]
    fn test_selector_rejects_other_encodings() {
        let err = EncodingSelector::from_label("iso-2022-jp").unwrap_err();
        assert!(matches!(err, ConvError::UnsupportedEncoding(ref l) if l == "iso-2022-jp"));
        assert!(EncodingSelector::from_label("big5").is_err());
        assert!(EncodingSelector::from_label("INVALID_ENCODING_LABEL").is_err());
    }

    #[test]
    fn test_selector_display_uses_encoding_name() {
        assert_eq!(EncodingSelector::ShiftJis.to_string(), "Shift_JIS");
        assert_eq!(EncodingSelector::EucJp.to_string(), "EUC-JP");
    }

    #[test]
    fn test_encode_ascii_and_kanji() {
        assert_eq!(encode(EncodingSelector::ShiftJis, 'A'), Some(vec![0x41]));
        // SHIFT-JIS encoding of "日"
        assert_eq!(encode(EncodingSelector::ShiftJis, '日'), Some(vec![0x93, 0xFA]));
        // EUC-JP encoding of "日"
        assert_eq!(encode(EncodingSelector::EucJp, '日'), Some(vec![0xC6, 0xFC]));
    }

    #[test]
    fn test_encode_unmappable() {
        assert_eq!(encode(EncodingSelector::ShiftJis, '😀'), None);
        assert_eq!(encode(EncodingSelector::EucJp, '😀'), None);
        assert_eq!(encode(EncodingSelector::Utf8, '😀'), Some("😀".as_bytes().to_vec()));
    }

    #[test]
    fn test_decode_single_and_double_byte() {
        assert_eq!(
            decode(EncodingSelector::ShiftJis, b"ab", false),
            (DecodeStep::Decoded { consumed: 1, written: 1 }, "a".to_string())
        );
        assert_eq!(
            decode(EncodingSelector::ShiftJis, &[0x93, 0xFA, 0x96, 0x7B], false),
            (DecodeStep::Decoded { consumed: 2, written: 3 }, "日".to_string())
        );
    }

    #[test]
    fn test_decode_split_lead_byte() {
        assert_eq!(decode(EncodingSelector::ShiftJis, &[0x93], false).0, DecodeStep::Incomplete);
        assert_eq!(decode(EncodingSelector::ShiftJis, &[0x93], true).0, DecodeStep::Malformed);
    }

    #[test]
    fn test_decode_malformed_lead() {
        // 0xA0 and 0xFD..=0xFF are not valid Shift_JIS bytes
        assert_eq!(decode(EncodingSelector::ShiftJis, &[0xA0, 0x41], false).0, DecodeStep::Malformed);
        assert_eq!(decode(EncodingSelector::ShiftJis, &[0xFF], true).0, DecodeStep::Malformed);
    }
}
