//! Text-driven object placement.
//!
//! A corpus is fetched once, normalised (periods stripped, lowercased) and
//! split into word tokens. Every occurrence of a configured term becomes a
//! small cluster of objects whose height encodes where in the text the term
//! occurred.

use std::path::PathBuf;

use cgmath::Vector3;
use rand::Rng;

use crate::data_structures::{
    material::MaterialId,
    scene_graph::{GeometryId, ObjectId, Scene, SceneObject},
};

/// Objects spawned for every single term occurrence.
pub const COPIES_PER_MATCH: usize = 5;

/// Source text used by the word scenes.
pub const DEFAULT_CORPUS_URL: &str = "https://raw.githubusercontent.com/amephraim/nlp/master/texts/J.%20K.%20Rowling%20-%20Harry%20Potter%201%20-%20Sorcerer's%20Stone.txt";

/// Strip periods and lowercase.
pub fn normalize(text: &str) -> String {
    text.replace('.', "").to_lowercase()
}

/// ASCII word characters plus the apostrophe.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\''
}

/// Split on runs of characters that are neither ASCII word characters nor
/// apostrophes. A separator run at the very start or end still yields an
/// empty token there, the same as a regex split on `[^\w']+`. Placement
/// heights are computed from this token count. Empty tokens never match a
/// term.
pub fn tokenize(text: &str) -> Vec<String> {
    let pieces: Vec<&str> = text.split(|c: char| !is_word_char(c)).collect();
    let last = pieces.len().saturating_sub(1);
    pieces
        .iter()
        .enumerate()
        .filter(|(i, piece)| !piece.is_empty() || *i == 0 || *i == last)
        .map(|(_, piece)| piece.to_string())
        .collect()
}

/// Token indices whose token equals `term`. The term is normalised the same
/// way as the text, so matching is case-insensitive.
pub fn occurrences(tokens: &[String], term: &str) -> Vec<usize> {
    let term = normalize(term.trim());
    if term.is_empty() {
        return Vec::new();
    }
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| **token == term)
        .map(|(i, _)| i)
        .collect()
}

/// Map a token index onto `[0, 20)`: `(100 / token_count) * index * 0.2`.
pub fn placement(index: usize, token_count: usize) -> f32 {
    if token_count == 0 {
        return 0.0;
    }
    (100.0 / token_count as f32) * index as f32 * 0.2
}

/// Where one spawned object goes and how it is tagged.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Index into the configured term list.
    pub term: usize,
    pub position: Vector3<f32>,
    /// Euler angles in radians.
    pub rotation: Vector3<f32>,
    /// Random value in `[0, 1)` used to desynchronise animations.
    pub phase: f32,
}

/// Compute [`COPIES_PER_MATCH`] placements for every occurrence of every term.
///
/// Heights come from [`placement`] shifted down by 10; `x` and `z` are uniform
/// in `[-5, 5)`, each rotation axis uniform in `[0, 2π)`.
pub fn plan<R: Rng + ?Sized>(tokens: &[String], terms: &[&str], rng: &mut R) -> Vec<Placement> {
    let mut placements = Vec::new();
    for (term_idx, term) in terms.iter().enumerate() {
        for index in occurrences(tokens, term) {
            let n = placement(index, tokens.len());
            for _ in 0..COPIES_PER_MATCH {
                placements.push(Placement {
                    term: term_idx,
                    position: Vector3::new(
                        (rng.random::<f32>() - 0.5) * 10.0,
                        n - 10.0,
                        (rng.random::<f32>() - 0.5) * 10.0,
                    ),
                    rotation: Vector3::new(
                        rng.random::<f32>() * std::f32::consts::TAU,
                        rng.random::<f32>() * std::f32::consts::TAU,
                        rng.random::<f32>() * std::f32::consts::TAU,
                    ),
                    phase: rng.random::<f32>(),
                });
            }
        }
    }
    placements
}

/// A spawned object together with its term and animation phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawned {
    pub object: ObjectId,
    pub term: usize,
    pub phase: f32,
}

/// Normalise and tokenise `text`, then add one object per placement to
/// `scene`. `materials[i]` is the material of `terms[i]`.
pub fn populate<R: Rng + ?Sized>(
    scene: &mut Scene,
    text: &str,
    terms: &[&str],
    geometry: GeometryId,
    materials: &[MaterialId],
    rng: &mut R,
) -> Vec<Spawned> {
    let tokens = tokenize(&normalize(text));
    let placements = plan(&tokens, terms, rng);
    log::info!(
        "{} tokens, spawning {} objects for {:?}",
        tokens.len(),
        placements.len(),
        terms
    );
    placements
        .into_iter()
        .filter_map(|p| {
            let Some(&material) = materials.get(p.term) else {
                log::warn!("no material configured for term {}", p.term);
                return None;
            };
            let mut object = SceneObject::new(geometry, material);
            object.position = p.position;
            object.rotation = p.rotation;
            Some(Spawned {
                object: scene.add(object),
                term: p.term,
                phase: p.phase,
            })
        })
        .collect()
}

/// Where the corpus comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorpusSource {
    Url(String),
    File(PathBuf),
}

impl CorpusSource {
    /// `http(s)://` strings are URLs, anything else is a path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Url(source.to_string())
        } else {
            Self::File(PathBuf::from(source))
        }
    }
}

impl Default for CorpusSource {
    fn default() -> Self {
        Self::Url(DEFAULT_CORPUS_URL.to_string())
    }
}

/// Fetch the corpus. One attempt, no retries, the body is read as UTF-8.
pub async fn load(source: &CorpusSource) -> anyhow::Result<String> {
    match source {
        CorpusSource::Url(url) => fetch(url).await,
        #[cfg(not(target_arch = "wasm32"))]
        CorpusSource::File(path) => Ok(std::fs::read_to_string(path)?),
        #[cfg(target_arch = "wasm32")]
        CorpusSource::File(path) => {
            let url = crate::resources::format_url(&path.to_string_lossy())?;
            fetch(url.as_str()).await
        }
    }
}

async fn fetch(url: &str) -> anyhow::Result<String> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.text().await?)
}
