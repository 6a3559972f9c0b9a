//! # Decoder Test Utilities

use crate::{
    alloc::{string::String, vec::Vec},
    decoders::TokenDecoder,
    encoders::{PieceEncoder, TokenEncoder},
    support::traits::static_is_send_sync_check,
    types::TokenType,
    vocab::testing::build_test_vocab,
};

/// Common [`TokenDecoder`] tests.
///
/// Expects a decoder over [`build_test_vocab`].
pub fn common_decoder_tests<T: TokenType, D: TokenDecoder<T>>(decoder: &D) {
    static_is_send_sync_check(decoder);

    let vocab = build_test_vocab::<T>();
    let piece = |text: &str| vocab.lookup_piece(text).unwrap();
    let reserved = |text: &str| vocab.lookup_reserved(text).unwrap();
    let byte = |b: u8| vocab.byte_table().unwrap().get_token(b);

    let (bos, eos, pad, unk) = (
        reserved("<bos>"),
        reserved("<eos>"),
        reserved("<pad>"),
        vocab.unk_id(),
    );

    let samples: Vec<(Vec<T>, &str)> = Vec::from([
        (Vec::new(), ""),
        (Vec::from([piece("hello"), piece("▁world")]), "hello world"),
        (
            Vec::from([piece("hi"), piece("▁"), piece("<td>"), piece("▁bye")]),
            "hi <td> bye",
        ),
        (Vec::from([piece("▁▁"), piece("hi")]), "  hi"),
        (Vec::from([byte(0xC2), byte(0xA3)]), "£"),
        // Control ids are elided; byte runs around them still decode.
        (Vec::from([bos, byte(0xC2), byte(0xA3)]), "£"),
        (
            Vec::from([bos, byte(0xC2), byte(0xA3), pad, eos, bos, pad]),
            "£",
        ),
        (Vec::from([unk, byte(0xC2), byte(0xA3)]), " ⁇ £"),
        (Vec::from([unk, unk, piece("he"), unk]), " ⁇  ⁇ he ⁇ "),
        // Malformed UTF-8: one replacement character per bad byte.
        (
            Vec::from([byte(0xFF), byte(0xFF), byte(0xFF)]),
            "\u{FFFD}\u{FFFD}\u{FFFD}",
        ),
        (
            Vec::from([piece("hi"), byte(0x80), piece("ye"), byte(0x80)]),
            "hi\u{FFFD}ye\u{FFFD}",
        ),
        // A run split by a control id decodes each half on its own.
        (
            Vec::from([byte(0xC2), eos, byte(0xA3)]),
            "\u{FFFD}\u{FFFD}",
        ),
    ]);

    for (tokens, expected) in &samples {
        assert_eq!(&decoder.decode(tokens), expected, "decode({tokens:?})");
        assert_eq!(&decoder.try_decode(tokens).unwrap(), expected);
    }

    let batch = samples
        .iter()
        .map(|(tokens, _)| tokens.as_slice())
        .collect::<Vec<_>>();
    let expected = samples
        .iter()
        .map(|(_, text)| String::from(*text))
        .collect::<Vec<_>>();
    assert_eq!(decoder.decode_batch(&batch), expected);
    assert_eq!(decoder.try_decode_batch(&batch).unwrap(), expected);

    // Round trip through the encoder, for text without separators.
    let encoder = PieceEncoder::new(vocab.into());
    for text in [
        "hello world",
        "hi <td>  bye<mask>",
        "hiƻ 🤨 ส£",
        "tidy herd ",
    ] {
        let tokens = encoder.encode(text);
        assert_eq!(decoder.decode_tokens(&tokens), text);
        assert_eq!(decoder.decode(&encoder.encode_ids(text)), text);
    }
}
