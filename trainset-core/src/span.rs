//! # Spans Anotados
//!
//! Um span é um intervalo semiaberto `[start, end)` de **caracteres** dentro de
//! um texto, associado a uma tag (ex: `"PERSONNE"`, `"ADRESSE"`, `"PARTIE_PP"`).
//!
//! Os spans chegam da extração estrutural dos documentos em qualquer ordem,
//! podem se sobrepor e frequentemente estão deslocados por poucos caracteres.
//! Os demais módulos do crate transformam essa lista em alvos de treino limpos.
//!
//! ## Formato serializado
//!
//! Um span é serializado como a tripla usada nos dados de treino:
//!
//! ```text
//! [3, 9, "PERSONNE"]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanError};

/// Tag reservada para candidatos detectados heuristicamente, sem tipo confirmado.
pub const UNKNOWN_TAG: &str = "UNKNOWN";

/// Representa um span (intervalo) de caracteres com uma tag associada.
///
/// # Exemplo
/// Em `"Mr DUPONT went to PARIS."`, o nome `"DUPONT"`:
/// `Span { start: 3, end: 9, tag: "PERSONNE" }`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize, String)", into = "(usize, usize, String)")]
pub struct Span {
    /// Offset do primeiro caractere (inclusivo)
    pub start: usize,
    /// Offset do último caractere (exclusivo)
    pub end: usize,
    /// Rótulo da entidade (ex: "PERSONNE", "UNKNOWN")
    pub tag: String,
}

impl Span {
    pub fn new(start: usize, end: usize, tag: impl Into<String>) -> Self {
        Self {
            start,
            end,
            tag: tag.into(),
        }
    }

    /// Número de caracteres cobertos. Zero se `end <= start`.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn is_unknown(&self) -> bool {
        self.has_tag(UNKNOWN_TAG)
    }

    /// Verifica o invariante `start < end <= text_len`.
    pub fn check_bounds(&self, text_len: usize) -> Result<()> {
        if self.start < self.end && self.end <= text_len {
            Ok(())
        } else {
            Err(SpanError::OutOfBounds {
                start: self.start,
                end: self.end,
                len: text_len,
            })
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) {}", self.start, self.end, self.tag)
    }
}

impl From<(usize, usize, String)> for Span {
    fn from((start, end, tag): (usize, usize, String)) -> Self {
        Self { start, end, tag }
    }
}

impl From<(usize, usize, &str)> for Span {
    fn from((start, end, tag): (usize, usize, &str)) -> Self {
        Self::new(start, end, tag)
    }
}

impl From<Span> for (usize, usize, String) {
    fn from(span: Span) -> Self {
        (span.start, span.end, span.tag)
    }
}

/// Ordena por `start`. A ordenação é estável: empates mantêm a ordem de entrada.
pub fn sort_by_start(spans: &mut [Span]) {
    spans.sort_by_key(|s| s.start);
}

/// Ordena por `(start, end)`, também de forma estável.
pub fn sort_by_start_end(spans: &mut [Span]) {
    spans.sort_by_key(|s| (s.start, s.end));
}

/// Valida todos os spans contra o comprimento do texto, parando no primeiro erro.
pub fn check_all(spans: &[Span], text_len: usize) -> Result<()> {
    spans.iter().try_for_each(|s| s.check_bounds(text_len))
}
