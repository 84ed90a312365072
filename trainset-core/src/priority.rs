//! # Prioridade de Tags
//!
//! Quando dois spans são fundidos, apenas uma tag sobrevive. Algumas tags são
//! **genéricas** (ex: `PARTIE_PP`, `PARTIE_PM`, "parte" pessoa física ou
//! jurídica) e nunca devem rebaixar uma tag específica já estabelecida.
//!
//! A regra é assimétrica: `resolve(nova, existente)`
//! - se a tag nova é genérica, mantém a existente;
//! - caso contrário, a tag nova vence.

use std::collections::HashSet;

use crate::config::DEFAULT_GENERIC_TAGS;

/// Resolve conflitos de tag entre um span que chega e o span acumulado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPriority {
    generic: HashSet<String>,
}

impl TagPriority {
    pub fn new<I, S>(generic_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            generic: generic_tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_generic(&self, tag: &str) -> bool {
        self.generic.contains(tag)
    }

    /// Escolhe a tag a manter. `incoming` é a tag do candidato, `existing` a do acumulador.
    pub fn resolve<'a>(&self, incoming: &'a str, existing: &'a str) -> &'a str {
        if self.is_generic(incoming) {
            existing
        } else {
            incoming
        }
    }
}

impl Default for TagPriority {
    fn default() -> Self {
        Self::new(DEFAULT_GENERIC_TAGS.iter().copied())
    }
}
