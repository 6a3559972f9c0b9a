//! # Encoder Test Utilities

use crate::{
    Token,
    alloc::vec::Vec,
    encoders::TokenEncoder,
    support::traits::static_is_send_sync_check,
    types::TokenType,
};

/// Project the ids out of a token list.
pub fn token_ids<T: TokenType>(tokens: &[Token<T>]) -> Vec<T> {
    tokens.iter().map(|token| token.id).collect()
}

/// Common [`TokenEncoder`] tests.
///
/// Expects an encoder over [`crate::vocab::testing::build_test_vocab`].
pub fn common_encoder_tests<T: TokenType, E: TokenEncoder<T>>(encoder: &E) {
    static_is_send_sync_check(encoder);

    let vocab = encoder.vocab().clone();
    let piece = |text: &str| Token::new(vocab.lookup_piece(text).unwrap(), text);
    let byte = |b: u8| vocab.byte_token(b).unwrap();

    let samples: Vec<(&str, Vec<Token<T>>)> = Vec::from([
        ("", Vec::new()),
        ("hello world", Vec::from([piece("hello"), piece("▁world")])),
        (
            "hi <td> bye",
            Vec::from([piece("hi"), piece("▁"), piece("<td>"), piece("▁bye")]),
        ),
        ("hiƻ", Vec::from([piece("hi"), byte(0xC6), byte(0xBB)])),
        (" hello", Vec::from([piece("▁"), piece("hello")])),
        ("🤨", "🤨".bytes().map(byte).collect()),
    ]);

    for (text, expected) in &samples {
        assert_eq!(&encoder.encode(text), expected, "encode({text:?})");
        assert_eq!(encoder.encode_ids(text), token_ids(expected));
    }

    let batch = samples.iter().map(|(text, _)| *text).collect::<Vec<_>>();
    let expected = samples
        .iter()
        .map(|(_, tokens)| tokens.clone())
        .collect::<Vec<_>>();
    assert_eq!(encoder.encode_batch(&batch), expected);
}
