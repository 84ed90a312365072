//! # Configuração da Preparação de Spans
//!
//! Os limiares e a política de prioridade de tags são valores explícitos,
//! não constantes espalhadas pelo código. Isso permite testar o algoritmo com
//! vocabulários de tags sintéticos e reproduzir corpora antigos.
//!
//! A configuração pode ser lida de JSON; campos ausentes mantêm o padrão:
//!
//! ```json
//! { "generic_tags": ["PARTIE_PP", "PARTIE_PM"], "adjacency_gap": 2 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::span::UNKNOWN_TAG;

/// Tags genéricas padrão: sempre cedem prioridade a uma tag mais específica.
pub const DEFAULT_GENERIC_TAGS: &[&str] = &["PARTIE_PP", "PARTIE_PM"];

/// Como o passo de fusão por adjacência atualiza o fim do span ativo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeExtent {
    /// **Ampliar**: `end = max(ativo.end, candidato.end)`. Um span aninhado
    /// nunca encurta o span que o contém.
    Widen,
    /// **Candidato**: `end = candidato.end`, mesmo quando isso encurta o span ativo.
    /// Aproxima o comportamento dos corpora gerados anteriormente. A diferença:
    /// um span repetido em sequência na saída é emitido uma única vez, enquanto
    /// aqueles corpora podiam conter a duplicata.
    Candidate,
}

impl Default for MergeExtent {
    fn default() -> Self {
        MergeExtent::Widen
    }
}

/// Parâmetros de todo o processo de preparação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainsetConfig {
    /// Tags de baixa prioridade (ver [`crate::priority::TagPriority`]).
    pub generic_tags: Vec<String>,
    /// Tag atribuída aos candidatos do detector de maiúsculas.
    pub unknown_tag: String,
    /// Distância máxima (em caracteres) entre dois spans para fundi-los.
    pub adjacency_gap: usize,
    /// Spans com comprimento menor ou igual a este valor são descartados.
    pub min_span_len: usize,
    pub merge_extent: MergeExtent,
    /// Se falso, o detector de candidatos UNKNOWN não é executado.
    pub detect_unknown: bool,
}

impl Default for TrainsetConfig {
    fn default() -> Self {
        Self {
            generic_tags: DEFAULT_GENERIC_TAGS.iter().map(|s| s.to_string()).collect(),
            unknown_tag: UNKNOWN_TAG.to_string(),
            adjacency_gap: 2,
            min_span_len: 2,
            merge_extent: MergeExtent::default(),
            detect_unknown: true,
        }
    }
}

impl TrainsetConfig {
    /// Lê a configuração de um documento JSON, mantendo os padrões para campos ausentes.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpanError;

    #[test]
    fn test_defaults() {
        let config = TrainsetConfig::default();
        assert_eq!(config.generic_tags, vec!["PARTIE_PP", "PARTIE_PM"]);
        assert_eq!(config.unknown_tag, "UNKNOWN");
        assert_eq!(config.adjacency_gap, 2);
        assert_eq!(config.min_span_len, 2);
        assert_eq!(config.merge_extent, MergeExtent::Widen);
        assert!(config.detect_unknown);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TrainsetConfig::from_json(r#"{"adjacency_gap": 0, "merge_extent": "candidate"}"#)
            .unwrap();
        assert_eq!(config.adjacency_gap, 0);
        assert_eq!(config.merge_extent, MergeExtent::Candidate);
        assert_eq!(config.min_span_len, 2);
        assert_eq!(config.generic_tags.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = TrainsetConfig::from_json(r#"{"adjacency_gap": "dois"}"#).unwrap_err();
        assert!(matches!(err, SpanError::Config(_)));
    }
}
