//! Canonical ordered list of committed tokens.
//!
//! Indices handed to the store are always derived from its current length by
//! the editing controller, so out-of-range operations are absorbed as no-ops
//! (or clamped, for inserts) instead of being reported.

use crate::models::Token;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    tokens: Vec<Token>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Add a token at the end.
    pub fn append(&mut self, token: Token) {
        tracing::debug!(kind = token.kind().as_str(), value = token.value(), "append token");
        self.tokens.push(token);
    }

    /// Insert before `index`, clamping `index` to `0..=len`.
    pub fn insert_at(&mut self, index: usize, token: Token) {
        let index = index.min(self.tokens.len());
        self.tokens.insert(index, token);
    }

    /// Remove the token at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Token> {
        if index < self.tokens.len() {
            let removed = self.tokens.remove(index);
            tracing::debug!(index, value = removed.value(), "remove token");
            Some(removed)
        } else {
            None
        }
    }

    /// Replace the token at `index`. Out-of-range indices are ignored.
    pub fn replace_at(&mut self, index: usize, token: Token) -> Option<Token> {
        let slot = self.tokens.get_mut(index)?;
        Some(std::mem::replace(slot, token))
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}
