//! # trainset-core — Preparação de Spans para Treino de NER
//!
//! Este crate transforma os spans extraídos de decisões judiciais (nomes de
//! partes, endereços, sociedades) em alvos de treino limpos para um modelo de
//! rotulagem de sequências.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui por um pipeline linear, sem estado entre parágrafos:
//!
//! 1.  **Entrada**: texto do parágrafo + spans `(start, end, tag)` em caracteres.
//! 2.  **Detecção** ([`unknown`]): nomes em maiúsculas não capturados viram candidatos `UNKNOWN`.
//! 3.  **Fusão de candidatos** ([`unknown`]): candidatos que tocam outro span são descartados.
//! 4.  **Normalização** ([`normalize`]): fusão de fragmentos, contenção e prioridade de tags ([`priority`]).
//! 5.  **Ajuste de bordas** ([`boundary`]): remove espaços nas extremidades dos spans.
//! 6.  **Saída**: [`TrainingExample`] pronto para o formatador de dados de treino.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use trainset_core::{Pipeline, Span};
//!
//! let pipeline = Pipeline::default();
//! let text = "Mr DUPONT went to PARIS.";
//!
//! let example = pipeline
//!     .prepare(text, vec![Span::new(3, 9, "PERSONNE")])
//!     .expect("spans dentro do texto");
//!
//! for span in &example.entities {
//!     println!("{}", span);
//! }
//! ```
//!
//! ## Módulos Principais
//!
//! - [`pipeline`]: Orquestrador que conecta todos os estágios.
//! - [`normalize`]: Fusão de intervalos com desempate por prioridade de tags.
//! - [`config`]: Limiares e tags genéricas.

pub mod boundary;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod priority;
pub mod span;
pub mod text;
pub mod unknown;

pub use boundary::BoundarySnapper;
pub use config::{MergeExtent, TrainsetConfig};
pub use error::{Result, SpanError};
pub use normalize::{OffsetNormalizer, Transition};
pub use pipeline::{Paragraph, Pipeline, PipelineEvent, TrainingExample};
pub use priority::TagPriority;
pub use span::{Span, UNKNOWN_TAG};
pub use text::TextIndex;
pub use unknown::{UnknownSpanDetector, UnknownSpanMerger};
