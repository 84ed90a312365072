//! # Índice de Caracteres
//!
//! Os spans usam offsets em **caracteres** (valores escalares Unicode), que é o
//! que as ferramentas de treino esperam. Já o Rust indexa `&str` por **bytes**,
//! e o crate `regex` devolve posições em bytes.
//!
//! O [`TextIndex`] guarda, para um texto, o offset em bytes de cada caractere,
//! permitindo converter nos dois sentidos sem percorrer o texto a cada consulta.
//!
//! ```text
//! "Mé DUPONT"
//!  M  é     ' '  D ...
//!  0  1     3    4      <- bytes
//!  0  1     2    3      <- caracteres
//! ```

use crate::error::{Result, SpanError};
use crate::span::Span;

/// Tabela de conversão caractere ↔ byte para um texto.
#[derive(Debug, Clone)]
pub struct TextIndex<'a> {
    text: &'a str,
    /// Offset em bytes de cada caractere, seguido de `text.len()` (sentinela).
    boundaries: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Número de caracteres do texto.
    pub fn len_chars(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Caractere na posição `offset` (em caracteres), se existir.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        let byte = *self.boundaries.get(offset)?;
        self.text[byte..].chars().next()
    }

    /// Converte um offset em caracteres para bytes. Aceita `len_chars()`.
    pub fn byte_offset(&self, char_offset: usize) -> Option<usize> {
        self.boundaries.get(char_offset).copied()
    }

    /// Converte um offset em bytes para caracteres.
    ///
    /// Retorna `None` se o byte não estiver numa fronteira de caractere.
    pub fn char_offset(&self, byte_offset: usize) -> Option<usize> {
        self.boundaries.binary_search(&byte_offset).ok()
    }

    /// Verifica `start < end <= len_chars()`.
    pub fn check(&self, span: &Span) -> Result<()> {
        span.check_bounds(self.len_chars())
    }

    /// Trecho do texto coberto pelo span.
    pub fn slice(&self, span: &Span) -> Result<&'a str> {
        self.check(span)?;
        let out_of_bounds = || SpanError::OutOfBounds {
            start: span.start,
            end: span.end,
            len: self.len_chars(),
        };
        let start = self.byte_offset(span.start).ok_or_else(out_of_bounds)?;
        let end = self.byte_offset(span.end).ok_or_else(out_of_bounds)?;
        Ok(&self.text[start..end])
    }
}
