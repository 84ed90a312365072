//! # Pipeline de Preparação — Orquestrador com Eventos Observáveis
//!
//! Conecta todos os estágios para um parágrafo:
//!
//! 1. **Validação**: todo span deve satisfazer `0 <= start < end <= len(texto)`.
//! 2. **Detecção** ([`crate::unknown`]): candidatos UNKNOWN em maiúsculas.
//! 3. **Fusão** ([`crate::unknown`]): descarta candidatos em conflito com vizinhos.
//! 4. **Normalização** ([`crate::normalize`]): fusão de intervalos e prioridade de tags.
//! 5. **Ajuste de bordas** ([`crate::boundary`]): remove espaços nas extremidades.
//!
//! O resultado é um [`TrainingExample`], entregue ao formatador de dados de treino.
//! Cada estágio pode emitir um [`PipelineEvent`] por um canal `mpsc`, permitindo
//! inspecionar o que aconteceu com os spans de um parágrafo.

use std::sync::mpsc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::boundary::BoundarySnapper;
use crate::config::TrainsetConfig;
use crate::error::Result;
use crate::normalize::OffsetNormalizer;
use crate::span::{check_all, Span};
use crate::text::TextIndex;
use crate::unknown::{UnknownSpanDetector, UnknownSpanMerger};

/// Um parágrafo com os spans extraídos da estrutura do documento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            text: text.into(),
            spans,
        }
    }
}

/// Exemplo de treino: texto e entidades limpas.
///
/// Serializado no formato de tupla esperado pelo treinamento:
///
/// ```text
/// ["Mr DUPONT went to PARIS.", {"entities": [[3, 9, "PERSONNE"], [18, 23, "UNKNOWN"]]}]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Annotations)", into = "(String, Annotations)")]
pub struct TrainingExample {
    pub text: String,
    pub entities: Vec<Span>,
}

#[derive(Serialize, Deserialize)]
struct Annotations {
    entities: Vec<Span>,
}

impl From<(String, Annotations)> for TrainingExample {
    fn from((text, annotations): (String, Annotations)) -> Self {
        Self {
            text,
            entities: annotations.entities,
        }
    }
}

impl From<TrainingExample> for (String, Annotations) {
    fn from(example: TrainingExample) -> Self {
        (
            example.text,
            Annotations {
                entities: example.entities,
            },
        )
    }
}

impl TrainingExample {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Eventos emitidos pelo pipeline durante o processamento de um parágrafo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: Todos os spans de entrada estão dentro do texto.
    Validated { spans: usize, text_chars: usize },
    /// **Passo 2**: Candidatos encontrados pelo detector de maiúsculas.
    UnknownDetected { candidates: Vec<Span> },
    /// **Passo 3**: Lista combinada após descartar candidatos em conflito.
    UnknownMerged { spans: Vec<Span>, dropped: usize },
    /// **Passo 4**: Saída da fusão de intervalos.
    Normalized { spans: Vec<Span> },
    /// **Passo 5**: Bordas ajustadas. `misaligned` lista o que ainda não
    /// coincide com fronteiras de palavra.
    Snapped {
        spans: Vec<Span>,
        misaligned: Vec<Span>,
    },
    /// **Conclusão**: Exemplo de treino pronto.
    Done { example: TrainingExample },
    /// **Falha**: O parágrafo foi rejeitado.
    Error { message: String },
}

/// O pipeline de preparação de spans.
///
/// Não guarda estado entre chamadas: pode ser compartilhado entre threads e
/// usado em paralelo por [`Pipeline::prepare_batch`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: TrainsetConfig,
    detector: UnknownSpanDetector,
    merger: UnknownSpanMerger,
    normalizer: OffsetNormalizer,
}

impl Pipeline {
    pub fn new(config: TrainsetConfig) -> Self {
        Self {
            detector: UnknownSpanDetector::new(config.unknown_tag.as_str()),
            merger: UnknownSpanMerger::new(config.unknown_tag.as_str()),
            normalizer: OffsetNormalizer::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &TrainsetConfig {
        &self.config
    }

    /// Processa um parágrafo e retorna o exemplo de treino.
    pub fn prepare(&self, text: &str, spans: Vec<Span>) -> Result<TrainingExample> {
        self.run(text, spans, None)
    }

    /// Processa um parágrafo enviando eventos de progresso pelo canal `tx`.
    ///
    /// # Fluxo de Eventos
    /// `Validated` → `UnknownDetected` → `UnknownMerged` → `Normalized` → `Snapped` → `Done`,
    /// ou `Error` no lugar do primeiro estágio que falhar. Os eventos de candidatos
    /// UNKNOWN não são emitidos se a detecção estiver desativada.
    pub fn prepare_streaming(
        &self,
        text: &str,
        spans: Vec<Span>,
        tx: mpsc::Sender<PipelineEvent>,
    ) -> Result<TrainingExample> {
        let result = self.run(text, spans, Some(&tx));
        match &result {
            Ok(example) => {
                let _ = tx.send(PipelineEvent::Done {
                    example: example.clone(),
                });
            }
            Err(err) => {
                let _ = tx.send(PipelineEvent::Error {
                    message: err.to_string(),
                });
            }
        }
        result
    }

    /// Processa vários parágrafos em paralelo.
    ///
    /// Cada parágrafo tem seu próprio resultado: um span malformado rejeita
    /// apenas o parágrafo que o contém. A ordem de saída é a de entrada.
    pub fn prepare_batch(&self, paragraphs: &[Paragraph]) -> Vec<Result<TrainingExample>> {
        paragraphs
            .par_iter()
            .enumerate()
            .map(|(i, paragraph)| {
                let result = self.prepare(&paragraph.text, paragraph.spans.clone());
                if let Err(err) = &result {
                    warn!(paragraph = i, error = %err, "parágrafo rejeitado");
                }
                result
            })
            .collect()
    }

    fn run(
        &self,
        text: &str,
        spans: Vec<Span>,
        tx: Option<&mpsc::Sender<PipelineEvent>>,
    ) -> Result<TrainingExample> {
        let index = TextIndex::new(text);

        // === Passo 1: Validação ===
        check_all(&spans, index.len_chars())?;
        notify(tx, || PipelineEvent::Validated {
            spans: spans.len(),
            text_chars: index.len_chars(),
        });
        let input_count = spans.len();

        // === Passos 2 e 3: Candidatos UNKNOWN ===
        let combined = if self.config.detect_unknown {
            let candidates = self.detector.detect(&index);
            let candidate_count = candidates.len();
            notify(tx, || PipelineEvent::UnknownDetected {
                candidates: candidates.clone(),
            });

            let merged = self.merger.merge(spans, candidates);
            let dropped = input_count + candidate_count - merged.len();
            notify(tx, || PipelineEvent::UnknownMerged {
                spans: merged.clone(),
                dropped,
            });
            merged
        } else {
            spans
        };

        // === Passo 4: Normalização ===
        let normalized = self.normalizer.normalize(combined);
        notify(tx, || PipelineEvent::Normalized {
            spans: normalized.clone(),
        });

        // === Passo 5: Ajuste de bordas ===
        let snapper = BoundarySnapper::with_index(index);
        let entities: Vec<Span> = snapper
            .snap_all(&normalized)?
            .into_iter()
            .filter(|span| !span.is_empty())
            .collect();
        notify(tx, || PipelineEvent::Snapped {
            spans: entities.clone(),
            misaligned: snapper.misaligned(&entities),
        });

        debug!(
            input = input_count,
            output = entities.len(),
            "parágrafo preparado"
        );

        Ok(TrainingExample {
            text: text.to_string(),
            entities,
        })
    }
}

/// Envia o evento só quando há um receptor; sem canal, o payload nem é montado.
fn notify(tx: Option<&mpsc::Sender<PipelineEvent>>, event: impl FnOnce() -> PipelineEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event());
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(TrainsetConfig::default())
    }
}
