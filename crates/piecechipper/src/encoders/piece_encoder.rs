//! # Piece Encoder
//!
//! Greedy, score-ranked BPE over a [`SymbolChain`].
//!
//! The text is split into single characters (and whole user-defined symbols),
//! then the adjacent pair whose concatenation is the highest scoring piece is
//! merged, until no mergeable pair remains. Equal scores merge leftmost first.

use crate::{
    EncoderOptions,
    Token,
    TokenEncoder,
    TokenType,
    alloc::{sync::Arc, vec::Vec},
    encoders::{
        merge_queue::{MergeCandidate, MergeQueue},
        symbol_chain::SymbolChain,
    },
    support::strings::replace_spaces_by_separator,
    vocab::PieceVocab,
};

/// A SentencePiece BPE [`TokenEncoder`].
#[derive(Debug, Clone)]
pub struct PieceEncoder<T: TokenType> {
    vocab: Arc<PieceVocab<T>>,
    options: EncoderOptions,
}

impl<T: TokenType> PieceEncoder<T> {
    /// Create a new encoder with default options.
    pub fn new(vocab: Arc<PieceVocab<T>>) -> Self {
        Self::new_with_options(vocab, EncoderOptions::default())
    }

    /// Create a new encoder.
    pub fn new_with_options(
        vocab: Arc<PieceVocab<T>>,
        options: EncoderOptions,
    ) -> Self {
        Self { vocab, options }
    }

    /// Get the encoder options.
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Queue the merge of `left` and `right`, if both exist and their
    /// concatenation is a piece.
    fn suggest_merge(
        &self,
        chain: &SymbolChain,
        queue: &mut MergeQueue,
        left: Option<usize>,
        right: Option<usize>,
    ) {
        let (Some(left), Some(right)) = (left, right) else {
            return;
        };
        let Some(text) = chain.pair_text(left, right) else {
            return;
        };
        if let Some(score) = self.vocab.merge_score(text) {
            queue.push(MergeCandidate {
                left,
                right,
                merged_len: text.len(),
                score,
            });
        }
    }

    /// Run the merge loop to completion.
    fn merge_all(
        &self,
        chain: &mut SymbolChain,
    ) {
        let mut queue = MergeQueue::with_capacity(chain.len());
        for right in 1..chain.len() {
            self.suggest_merge(chain, &mut queue, Some(right - 1), Some(right));
        }

        while let Some(candidate) = queue.pop() {
            if chain.is_stale(&candidate) {
                queue.note_stale_pop();
                continue;
            }

            queue.maybe_compact(self.options.compaction_factor, |c| !chain.is_stale(c));

            let (prev, next) = chain.merge(candidate.left, candidate.right);
            queue.note_merge();

            self.suggest_merge(chain, &mut queue, prev, Some(candidate.left));
            self.suggest_merge(chain, &mut queue, Some(candidate.left), next);
        }
    }

    /// Append the token(s) for a final symbol.
    fn emit_symbol(
        &self,
        symbol: &str,
        tokens: &mut Vec<Token<T>>,
    ) {
        let id = self.vocab.symbol_to_id(symbol);
        if id == self.vocab.unk_id() && self.vocab.byte_fallback() {
            tokens.extend(symbol.bytes().filter_map(|b| self.vocab.byte_token(b)));
        } else {
            tokens.push(Token::new(id, symbol));
        }
    }
}

impl<T: TokenType> TokenEncoder<T> for PieceEncoder<T> {
    fn vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self, text, tokens))
    )]
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<Token<T>>,
    ) {
        let text = replace_spaces_by_separator(text);
        let mut chain = SymbolChain::segment(&text, self.vocab.user_defined_matcher());
        if chain.is_empty() {
            return;
        }

        self.merge_all(&mut chain);

        tokens.reserve(chain.live_len());
        for symbol in chain.symbols() {
            self.emit_symbol(symbol, tokens);
        }
    }
}
