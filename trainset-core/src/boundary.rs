//! # Ajuste de Fronteiras
//!
//! Spans vindos da extração estrutural às vezes carregam um espaço inicial ou
//! final copiado da formatação do documento. Um consumidor que divide o texto
//! em tokens não encontra token que comece (ou termine) num espaço, e a tag
//! daquele token é perdida silenciosamente.
//!
//! O [`BoundarySnapper`] contrai cada span em no máximo um caractere de cada lado:
//!
//! ```text
//! "Mr DUPONT went"      " DUPONT"  [2, 9)  →  "DUPONT"  [3, 9)
//! ```
//!
//! Para diagnóstico, [`BoundarySnapper::misaligned`] lista os spans cujas bordas
//! não coincidem com fronteiras de palavra (segmentação Unicode UAX #29).

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;
use crate::span::Span;
use crate::text::TextIndex;

/// Ajusta as bordas dos spans de um texto.
pub struct BoundarySnapper<'a> {
    index: TextIndex<'a>,
}

impl<'a> BoundarySnapper<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            index: TextIndex::new(text),
        }
    }

    pub fn with_index(index: TextIndex<'a>) -> Self {
        Self { index }
    }

    /// Remove um espaço inicial e/ou final do span.
    ///
    /// Nunca expande o span. Um span de um único caractere em branco vira um span
    /// vazio em `start + 1`.
    ///
    /// # Erros
    /// [`crate::SpanError::OutOfBounds`] se o span não satisfaz `start < end <= len`.
    pub fn snap(&self, span: &Span) -> Result<Span> {
        self.index.check(span)?;

        let is_space = |offset: usize| {
            self.index
                .char_at(offset)
                .map_or(false, is_space_char)
        };

        let start = if is_space(span.start) { span.start + 1 } else { span.start };
        let end = if is_space(span.end - 1) { span.end - 1 } else { span.end };

        Ok(Span::new(start, end.max(start), span.tag.clone()))
    }

    /// Aplica [`Self::snap`] a todos os spans, parando no primeiro erro.
    pub fn snap_all(&self, spans: &[Span]) -> Result<Vec<Span>> {
        spans.iter().map(|s| self.snap(s)).collect()
    }

    /// Spans cujas bordas não caem em início/fim de uma palavra não-branca.
    ///
    /// Spans fora dos limites do texto também são reportados.
    pub fn misaligned(&self, spans: &[Span]) -> Vec<Span> {
        let text = self.index.text();
        let mut starts = HashSet::new();
        let mut ends = HashSet::new();
        for (byte, segment) in text.split_word_bound_indices() {
            if segment.chars().all(is_space_char) {
                continue;
            }
            starts.insert(byte);
            ends.insert(byte + segment.len());
        }

        spans
            .iter()
            .filter(|span| {
                let start = self.index.byte_offset(span.start);
                let end = self.index.byte_offset(span.end);
                match (start, end) {
                    (Some(s), Some(e)) => !(starts.contains(&s) && ends.contains(&e)),
                    _ => true,
                }
            })
            .cloned()
            .collect()
    }
}

/// Espaço em branco Unicode, incluindo os separadores de informação
/// U+001C a U+001F, que também ocorrem como separadores nos textos extraídos.
fn is_space_char(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Atalho para ajustar um único span sem reaproveitar o índice do texto.
pub fn snap(text: &str, span: &Span) -> Result<Span> {
    BoundarySnapper::new(text).snap(span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpanError;
    use proptest::prelude::*;

    const TEXT: &str = "Mr DUPONT went to PARIS.";

    #[test]
    fn test_trims_leading_space() {
        let snapped = snap(TEXT, &Span::new(2, 9, "PERSONNE")).unwrap();
        assert_eq!(snapped, Span::new(3, 9, "PERSONNE"));
    }

    #[test]
    fn test_trims_trailing_space() {
        let snapped = snap(TEXT, &Span::new(3, 10, "PERSONNE")).unwrap();
        assert_eq!(snapped, Span::new(3, 9, "PERSONNE"));
    }

    #[test]
    fn test_trims_at_most_one_char_per_side() {
        let text = "a  BOB  b";
        let snapped = snap(text, &Span::new(1, 8, "X")).unwrap();
        assert_eq!(snapped, Span::new(2, 7, "X"));
    }

    #[test]
    fn test_clean_span_unchanged() {
        let span = Span::new(18, 23, "LIEU");
        assert_eq!(snap(TEXT, &span).unwrap(), span);
    }

    #[test]
    fn test_single_space_collapses_to_empty() {
        let snapped = snap(TEXT, &Span::new(2, 3, "X")).unwrap();
        assert!(snapped.is_empty());
        assert_eq!(snapped.start, 3);
    }

    #[test]
    fn test_trims_information_separators() {
        let text = "\u{1c}DUPONT\u{1f}";
        let snapped = snap(text, &Span::new(0, 8, "PERSONNE")).unwrap();
        assert_eq!(snapped, Span::new(1, 7, "PERSONNE"));
    }

    #[test]
    fn test_multibyte_text() {
        let text = "à Mme LÉA";
        let snapped = snap(text, &Span::new(5, 9, "PERSONNE")).unwrap();
        assert_eq!(snapped, Span::new(6, 9, "PERSONNE"));
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(matches!(
            snap(TEXT, &Span::new(20, 30, "X")),
            Err(SpanError::OutOfBounds { .. })
        ));
        assert!(matches!(
            snap(TEXT, &Span::new(5, 5, "X")),
            Err(SpanError::OutOfBounds { .. })
        ));
        assert!(snap("", &Span::new(0, 1, "X")).is_err());
    }

    #[test]
    fn test_misaligned_detects_space_and_mid_word() {
        let snapper = BoundarySnapper::new(TEXT);
        let spans = vec![
            Span::new(3, 9, "OK"),
            Span::new(2, 9, "SPACE"),
            Span::new(4, 9, "MID"),
            Span::new(18, 40, "OUT"),
        ];
        let bad: Vec<String> = snapper.misaligned(&spans).into_iter().map(|s| s.tag).collect();
        assert_eq!(bad, vec!["SPACE", "MID", "OUT"]);
    }

    #[test]
    fn test_snapped_spans_become_aligned() {
        let snapper = BoundarySnapper::new(TEXT);
        let spans = vec![Span::new(2, 9, "P"), Span::new(17, 23, "L")];
        let snapped = snapper.snap_all(&spans).unwrap();
        assert!(snapper.misaligned(&snapped).is_empty());
    }

    proptest! {
        #[test]
        fn test_snap_never_grows(text in "[a-z ]{1,30}", a in 0usize..30, b in 0usize..30) {
            let len = text.chars().count();
            let start = a % len;
            let end = start + 1 + b % (len - start);
            let span = Span::new(start, end, "T");
            let snapped = snap(&text, &span).unwrap();
            prop_assert!(snapped.start >= span.start);
            prop_assert!(snapped.end <= span.end);
            prop_assert!(snapped.len() <= span.len());
        }
    }
}
