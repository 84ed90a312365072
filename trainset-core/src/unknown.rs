//! # Candidatos UNKNOWN — Detecção e Fusão
//!
//! Em decisões judiciais, nomes de partes, sociedades e lugares aparecem com
//! frequência total ou parcialmente em maiúsculas ("Mr DUPONT", "SCI LES-PINS").
//! Muitos deles não foram capturados pela extração estrutural.
//!
//! ## Detecção
//!
//! O [`UnknownSpanDetector`] procura sequências máximas de palavras separadas por
//! espaços em que cada palavra começa com uma ou mais maiúsculas ou hífens:
//!
//! ```text
//! (\s*[A-Z\-]+\w*)+
//! ```
//!
//! O `\s*` inicial faz parte do match: `" PARIS"` é detectado com o espaço, que
//! o [`crate::boundary::BoundarySnapper`] remove no final do processo.
//!
//! ## Fusão
//!
//! O [`UnknownSpanMerger`] é conservador: um candidato só sobrevive se estiver
//! estritamente separado dos vizinhos imediatos (sem sobreposição nem contato).

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::span::{sort_by_start_end, Span, UNKNOWN_TAG};
use crate::text::TextIndex;

/// Padrão de sequências de palavras iniciadas por maiúsculas ou hífens.
pub const UPCASE_WORDS_PATTERN: &str = r"(\s*[A-Z\-]+\w*)+";

fn upcase_words_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(UPCASE_WORDS_PATTERN).expect("padrão de maiúsculas válido"))
}

/// Detector de candidatos a entidade escritos em maiúsculas.
#[derive(Debug, Clone)]
pub struct UnknownSpanDetector {
    tag: String,
}

impl UnknownSpanDetector {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Todos os matches do padrão, com offsets em caracteres.
    ///
    /// Não resolve sobreposição com spans conhecidos: isso é papel do [`UnknownSpanMerger`].
    pub fn detect(&self, index: &TextIndex<'_>) -> Vec<Span> {
        upcase_words_regex()
            .find_iter(index.text())
            .filter_map(|m| {
                let start = index.char_offset(m.start())?;
                let end = index.char_offset(m.end())?;
                let span = Span::new(start, end, self.tag.as_str());
                trace!(span = %span, text = ?index.slice(&span).ok(), "candidato detectado");
                Some(span)
            })
            .collect()
    }

    pub fn detect_text(&self, text: &str) -> Vec<Span> {
        self.detect(&TextIndex::new(text))
    }
}

impl Default for UnknownSpanDetector {
    fn default() -> Self {
        Self::new(UNKNOWN_TAG)
    }
}

/// Combina candidatos UNKNOWN com spans conhecidos.
#[derive(Debug, Clone)]
pub struct UnknownSpanMerger {
    tag: String,
}

impl UnknownSpanMerger {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Concatena as duas listas, ordena por `(start, end)` e descarta todo
    /// candidato UNKNOWN que toca ou sobrepõe um vizinho imediato.
    ///
    /// Spans com outras tags são sempre mantidos. Os vizinhos considerados são
    /// os da sequência ordenada completa, inclusive candidatos descartados.
    pub fn merge(&self, known: Vec<Span>, unknown: Vec<Span>) -> Vec<Span> {
        let mut all = known;
        all.extend(unknown);
        sort_by_start_end(&mut all);

        let keep: Vec<bool> = (0..all.len())
            .map(|i| {
                let span = &all[i];
                if !span.has_tag(&self.tag) {
                    return true;
                }
                let start_ok = i == 0 || all[i - 1].end < span.start;
                let end_ok = all.get(i + 1).map_or(true, |next| span.end < next.start);
                if !(start_ok && end_ok) {
                    debug!(span = %span, "candidato UNKNOWN descartado por contato com vizinho");
                }
                start_ok && end_ok
            })
            .collect();

        all.into_iter()
            .zip(keep)
            .filter_map(|(span, keep)| keep.then_some(span))
            .collect()
    }
}

impl Default for UnknownSpanMerger {
    fn default() -> Self {
        Self::new(UNKNOWN_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Mr DUPONT went to PARIS.";

    fn offsets(spans: &[Span]) -> Vec<(usize, usize)> {
        spans.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn test_detects_uppercase_runs() {
        let spans = UnknownSpanDetector::default().detect_text(TEXT);
        // "Mr" começa com maiúscula e se junta a "DUPONT"; " PARIS" inclui o espaço
        assert_eq!(offsets(&spans), vec![(0, 9), (17, 23)]);
        assert!(spans.iter().all(Span::is_unknown));
        assert_eq!(&TEXT[3..9], "DUPONT");
        assert_eq!(&TEXT[18..23], "PARIS");
    }

    #[test]
    fn test_hyphenated_words_are_one_run() {
        let text = "la SCI LES-PINS, société";
        let spans = UnknownSpanDetector::default().detect_text(text);
        assert_eq!(offsets(&spans), vec![(2, 15)]);
    }

    #[test]
    fn test_mixed_case_word_joins_run() {
        let spans = UnknownSpanDetector::default().detect_text("Jean-PIERRE Martin est");
        assert_eq!(offsets(&spans), vec![(0, 18)]);
    }

    #[test]
    fn test_any_whitespace_separates_words() {
        let spans = UnknownSpanDetector::default().detect_text("DUPONT\n\tMARTIN");
        assert_eq!(offsets(&spans), vec![(0, 14)]);
    }

    #[test]
    fn test_run_stops_at_digits_and_lowercase() {
        let spans = UnknownSpanDetector::default().detect_text("ARTICLE 700 du code");
        assert_eq!(offsets(&spans), vec![(0, 7)]);
        assert!(UnknownSpanDetector::default().detect_text("bonjour à tous").is_empty());
    }

    #[test]
    fn test_non_ascii_capital_does_not_start_word() {
        // `[A-Z]` é ASCII: "É" não inicia palavra, mas os caracteres seguintes sim
        let spans = UnknownSpanDetector::default().detect_text("ÉLISE");
        assert_eq!(offsets(&spans), vec![(1, 5)]);
    }

    #[test]
    fn test_offsets_are_in_chars() {
        let spans = UnknownSpanDetector::default().detect_text("à côté de MARTIN");
        assert_eq!(offsets(&spans), vec![(9, 16)]);
    }

    #[test]
    fn test_custom_tag() {
        let spans = UnknownSpanDetector::new("CANDIDAT").detect_text(TEXT);
        assert!(spans.iter().all(|s| s.tag == "CANDIDAT"));
    }

    #[test]
    fn test_merge_drops_overlapping_candidate() {
        let merged = UnknownSpanMerger::default().merge(
            vec![Span::new(3, 9, "PERSON")],
            vec![Span::new(3, 9, UNKNOWN_TAG), Span::new(19, 24, UNKNOWN_TAG)],
        );
        assert_eq!(
            merged,
            vec![Span::new(3, 9, "PERSON"), Span::new(19, 24, UNKNOWN_TAG)]
        );
    }

    #[test]
    fn test_merge_drops_touching_candidate() {
        let merged = UnknownSpanMerger::default().merge(
            vec![Span::new(3, 9, "PERSON")],
            vec![Span::new(9, 14, UNKNOWN_TAG), Span::new(0, 3, UNKNOWN_TAG)],
        );
        assert_eq!(merged, vec![Span::new(3, 9, "PERSON")]);
    }

    #[test]
    fn test_merge_unknown_neighbors_conflict_too() {
        let merged = UnknownSpanMerger::default().merge(
            vec![],
            vec![
                Span::new(0, 5, UNKNOWN_TAG),
                Span::new(4, 8, UNKNOWN_TAG),
                Span::new(20, 25, UNKNOWN_TAG),
            ],
        );
        assert_eq!(merged, vec![Span::new(20, 25, UNKNOWN_TAG)]);
    }

    #[test]
    fn test_merge_keeps_overlapping_known_spans() {
        let merged = UnknownSpanMerger::default().merge(
            vec![Span::new(5, 9, "B"), Span::new(0, 6, "A")],
            vec![],
        );
        assert_eq!(merged, vec![Span::new(0, 6, "A"), Span::new(5, 9, "B")]);
    }

    #[test]
    fn test_merge_detected_with_known() {
        let known = vec![Span::new(3, 9, "PERSONNE")];
        let detected = UnknownSpanDetector::default().detect_text(TEXT);
        let merged = UnknownSpanMerger::default().merge(known, detected);
        assert_eq!(
            merged,
            vec![Span::new(3, 9, "PERSONNE"), Span::new(17, 23, UNKNOWN_TAG)]
        );
    }
}
