//! One-shot loaders for the detail view.
//!
//! The detail modal shows four independently fetched payloads for one
//! creature: the full record, its abilities, its evolution chain, and its
//! location encounters. Each is a keyed load: changing the subject resets the
//! loader and late responses for a previous subject are discarded, mirroring
//! the stale-response rule of the paged source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::{BaseStats, FetchError};

/// Full record for the detail view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    pub base_stats: BaseStats,
    pub height: u32,
    pub weight: u32,
    /// Type tags this creature takes super-effective damage from.
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub sprites: BTreeMap<String, Option<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub name: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionStage {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub min_level: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionChain {
    #[serde(default)]
    pub stages: Vec<EvolutionStage>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEncounter {
    pub location: String,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub method: Option<String>,
}

/// The four detail endpoints, addressed by creature name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailEndpoint {
    Detail,
    Abilities,
    Evolution,
    Encounters,
}

impl DetailEndpoint {
    /// Request path relative to the API root.
    pub fn path(self, name: &str) -> String {
        match self {
            DetailEndpoint::Detail => format!("/detail/{name}"),
            DetailEndpoint::Abilities => format!("/abilities/{name}"),
            DetailEndpoint::Evolution => format!("/evolution/{name}"),
            DetailEndpoint::Encounters => format!("/location/{name}"),
        }
    }
}

/// Descriptor for one detail fetch, tagged with its subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRequest {
    pub endpoint: DetailEndpoint,
    pub name: String,
}

impl DetailRequest {
    pub fn path(&self) -> String {
        self.endpoint.path(&self.name)
    }
}

/// Loader state for one endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DetailState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

/// A keyed one-shot loader for a single detail endpoint.
#[derive(Clone, Debug)]
pub struct DetailLoader<T> {
    endpoint: DetailEndpoint,
    subject: Option<String>,
    state: DetailState<T>,
}

impl<T> DetailLoader<T> {
    pub fn new(endpoint: DetailEndpoint) -> Self {
        Self {
            endpoint,
            subject: None,
            state: DetailState::Idle,
        }
    }

    pub fn endpoint(&self) -> DetailEndpoint {
        self.endpoint
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn state(&self) -> &DetailState<T> {
        &self.state
    }

    pub fn ready(&self) -> Option<&T> {
        match &self.state {
            DetailState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    /// Points the loader at a new subject; `None` disables it.
    ///
    /// Returns the request to perform, or `None` when the subject is unchanged
    /// (already loading or loaded) or the loader was disabled.
    pub fn set_subject(&mut self, name: Option<&str>) -> Option<DetailRequest> {
        match name {
            None => {
                self.subject = None;
                self.state = DetailState::Idle;
                None
            }
            Some(name) => {
                if self.subject.as_deref() == Some(name)
                    && !matches!(self.state, DetailState::Failed(_))
                {
                    return None;
                }
                self.subject = Some(name.to_owned());
                self.state = DetailState::Loading;
                Some(DetailRequest {
                    endpoint: self.endpoint,
                    name: name.to_owned(),
                })
            }
        }
    }

    /// Applies a completed fetch; responses for a superseded subject are
    /// discarded silently.
    pub fn complete(&mut self, request: &DetailRequest, result: Result<T, FetchError>) {
        if request.endpoint != self.endpoint || self.subject.as_deref() != Some(&request.name) {
            gdebug!(name = %request.name, "discarding stale detail response");
            return;
        }
        self.state = match result {
            Ok(value) => DetailState::Ready(value),
            Err(err) => DetailState::Failed(err),
        };
    }
}

impl<T: DeserializeOwned> DetailLoader<T> {
    /// Like [`DetailLoader::complete`], decoding a raw JSON payload first.
    pub fn complete_json(&mut self, request: &DetailRequest, result: Result<&str, FetchError>) {
        let decoded = result.and_then(|payload| {
            serde_json::from_str(payload).map_err(|e| FetchError::InvalidResponse(e.to_string()))
        });
        self.complete(request, decoded);
    }
}

/// The four loaders of one open detail view, driven together.
#[derive(Clone, Debug)]
pub struct DetailPanel {
    detail: DetailLoader<PokemonDetail>,
    abilities: DetailLoader<Vec<Ability>>,
    evolution: DetailLoader<EvolutionChain>,
    encounters: DetailLoader<Vec<LocationEncounter>>,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailPanel {
    pub fn new() -> Self {
        Self {
            detail: DetailLoader::new(DetailEndpoint::Detail),
            abilities: DetailLoader::new(DetailEndpoint::Abilities),
            evolution: DetailLoader::new(DetailEndpoint::Evolution),
            encounters: DetailLoader::new(DetailEndpoint::Encounters),
        }
    }

    /// Opens the panel for a creature, emitting the fetches to perform.
    pub fn open(&mut self, name: &str) -> Vec<DetailRequest> {
        let mut requests = Vec::with_capacity(4);
        requests.extend(self.detail.set_subject(Some(name)));
        requests.extend(self.abilities.set_subject(Some(name)));
        requests.extend(self.evolution.set_subject(Some(name)));
        requests.extend(self.encounters.set_subject(Some(name)));
        requests
    }

    pub fn close(&mut self) {
        self.detail.set_subject(None);
        self.abilities.set_subject(None);
        self.evolution.set_subject(None);
        self.encounters.set_subject(None);
    }

    pub fn subject(&self) -> Option<&str> {
        self.detail.subject()
    }

    /// Routes a raw JSON completion to the loader for its endpoint.
    pub fn complete_json(&mut self, request: &DetailRequest, result: Result<&str, FetchError>) {
        match request.endpoint {
            DetailEndpoint::Detail => self.detail.complete_json(request, result),
            DetailEndpoint::Abilities => self.abilities.complete_json(request, result),
            DetailEndpoint::Evolution => self.evolution.complete_json(request, result),
            DetailEndpoint::Encounters => self.encounters.complete_json(request, result),
        }
    }

    pub fn detail(&self) -> &DetailLoader<PokemonDetail> {
        &self.detail
    }

    pub fn abilities(&self) -> &DetailLoader<Vec<Ability>> {
        &self.abilities
    }

    pub fn evolution(&self) -> &DetailLoader<EvolutionChain> {
        &self.evolution
    }

    pub fn encounters(&self) -> &DetailLoader<Vec<LocationEncounter>> {
        &self.encounters
    }
}
