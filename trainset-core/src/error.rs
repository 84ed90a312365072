//! Erros do núcleo de normalização.
//!
//! Todas as funções são puras e falham imediatamente diante de entrada
//! malformada. Regras de desempate (prioridade de tags, limiar de adjacência)
//! nunca geram erro.

use thiserror::Error;

/// Erros produzidos durante a preparação dos spans
#[derive(Debug, Error)]
pub enum SpanError {
    /// Offset fora de `[0, len]` ou `start >= end`.
    #[error("Span fora dos limites: [{start}, {end}) em texto de {len} caracteres")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("Configuração inválida: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpanError>;
