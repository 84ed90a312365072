//! # Normalização de Offsets — Fusão de Intervalos
//!
//! Offsets de anotação em documentos jurídicos frequentemente estão errados por
//! poucos caracteres, ou uma mesma entidade é partida em fragmentos adjacentes
//! pelas fronteiras da marcação. Este módulo reduz a lista de spans a uma lista
//! mínima, ordenada e sem fragmentos.
//!
//! ## Algoritmo
//!
//! Os spans são ordenados por `start` (ordenação estável) e percorridos com um
//! único **span ativo** (acumulador). Para cada candidato, a transição executa,
//! nesta ordem:
//!
//! 1. **Fusão por adjacência**: se `ativo.end + 2 >= cand.start`, o ativo é
//!    estendido até o candidato e sua tag resolvida por [`TagPriority`].
//! 2. **Emissão**: se `ativo.end < cand.end`, o ativo está completo e é emitido.
//! 3. **Contenção**: se `ativo.end >= cand.end`, o candidato passa a ter os
//!    limites do ativo (o span mais longo continua).
//! 4. **Span degenerado**: se o candidato tem 2 caracteres ou menos, ele é
//!    descartado e o ativo permanece como está.
//! 5. O candidato (transformado) vira o novo ativo.
//!
//! Cada passo lê o estado alterado pelo anterior, por isso a transição é uma
//! função explícita ([`OffsetNormalizer::step`]) e a normalização é um `fold`.
//!
//! ## Exemplo
//!
//! ```text
//! [0,5) A   [6,10) B     →  [0,10) B      (distância 1 ≤ 2: fundidos)
//! [0,10) A  [2,5) B      →  [0,10) B      (aninhado: mantém o mais longo)
//! [0,5) A   [9,14) B     →  [0,5) A, [9,14) B
//! ```

use tracing::{debug, trace};

use crate::config::{MergeExtent, TrainsetConfig};
use crate::priority::TagPriority;
use crate::span::{sort_by_start, Span};

/// Resultado de uma transição: o próximo span ativo e, se houver, o span concluído.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub active: Option<Span>,
    pub emitted: Option<Span>,
}

/// Normalizador de listas de spans.
#[derive(Debug, Clone)]
pub struct OffsetNormalizer {
    priority: TagPriority,
    adjacency_gap: usize,
    min_span_len: usize,
    merge_extent: MergeExtent,
}

impl OffsetNormalizer {
    pub fn new(priority: TagPriority) -> Self {
        let defaults = TrainsetConfig::default();
        Self {
            priority,
            adjacency_gap: defaults.adjacency_gap,
            min_span_len: defaults.min_span_len,
            merge_extent: defaults.merge_extent,
        }
    }

    pub fn from_config(config: &TrainsetConfig) -> Self {
        Self {
            priority: TagPriority::new(config.generic_tags.iter().cloned()),
            adjacency_gap: config.adjacency_gap,
            min_span_len: config.min_span_len,
            merge_extent: config.merge_extent,
        }
    }

    pub fn with_merge_extent(mut self, merge_extent: MergeExtent) -> Self {
        self.merge_extent = merge_extent;
        self
    }

    /// Uma transição da máquina de estados (passos 1 a 5).
    pub fn step(&self, active: Option<Span>, candidate: Span) -> Transition {
        let mut active = active;

        // 1. Fusão por adjacência
        if let Some(current) = active.as_mut() {
            if current.end.saturating_add(self.adjacency_gap) >= candidate.start {
                current.end = match self.merge_extent {
                    MergeExtent::Widen => current.end.max(candidate.end),
                    MergeExtent::Candidate => candidate.end,
                };
                let tag = self.priority.resolve(&candidate.tag, &current.tag).to_string();
                current.tag = tag;
            }
        }

        // 2. Emissão
        let emitted = active
            .as_ref()
            .filter(|current| current.end < candidate.end)
            .cloned();

        // 3. Contenção
        let mut candidate = candidate;
        if let Some(current) = active.as_ref() {
            if current.end >= candidate.end {
                let tag = self.priority.resolve(&candidate.tag, &current.tag).to_string();
                candidate = Span::new(current.start, current.end, tag);
            }
        }

        // 4. Span degenerado
        if candidate.len() <= self.min_span_len {
            debug!(span = %candidate, "span degenerado descartado");
            return Transition { active, emitted };
        }

        // 5.
        Transition {
            active: Some(candidate),
            emitted,
        }
    }

    /// Normaliza uma lista de spans (em qualquer ordem).
    pub fn normalize(&self, spans: Vec<Span>) -> Vec<Span> {
        let mut spans = spans;
        sort_by_start(&mut spans);

        let mut output = Vec::new();
        let last = spans.into_iter().fold(None, |active, candidate| {
            trace!(candidate = %candidate, "transição");
            let transition = self.step(active, candidate);
            if let Some(span) = transition.emitted {
                emit(&mut output, span);
            }
            transition.active
        });
        if let Some(span) = last {
            emit(&mut output, span);
        }
        output
    }
}

impl Default for OffsetNormalizer {
    fn default() -> Self {
        Self::new(TagPriority::default())
    }
}

/// Um ativo restaurado após um candidato degenerado pode ser emitido de novo.
fn emit(output: &mut Vec<Span>, span: Span) {
    if output.last() != Some(&span) {
        output.push(span);
    }
}
