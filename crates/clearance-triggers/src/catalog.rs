//! Static mapping from trigger-phrase variants to trigger kinds.
//!
//! Matching is exact substring containment over normalized text — no
//! fuzzy or edit-distance matching. "Shots Fired!" and "shots fired"
//! normalize identically; "gun drawn" and "weapon drawn" are distinct
//! variants of the same kind.

use crate::error::CatalogError;
use clearance_types::TriggerKind;

/// The built-in trigger-phrase table.
///
/// Variants are stored normalized; entry order fixes the order in which
/// kinds are reported by [`PhraseCatalog::lookup`].
const BUILTIN_PHRASES: &[(&str, TriggerKind)] = &[
    ("weapon drawn", TriggerKind::WeaponDrawn),
    ("weapon out", TriggerKind::WeaponDrawn),
    ("gun drawn", TriggerKind::WeaponDrawn),
    ("shots fired", TriggerKind::ShotsFired),
    ("man down", TriggerKind::ManDown),
    ("officer down", TriggerKind::OfficerDown),
    ("suspect down", TriggerKind::SuspectDown),
    ("camera blocked", TriggerKind::CameraBlocked),
    ("camera obscured", TriggerKind::CameraBlocked),
];

/// Normalizes text for catalog lookup: lowercase, punctuation stripped
/// (every non-alphanumeric character becomes a separator), whitespace
/// collapsed to single spaces.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// An immutable catalog of normalized phrase variants.
#[derive(Debug, Clone)]
pub struct PhraseCatalog {
    entries: Vec<(String, TriggerKind)>,
}

impl Default for PhraseCatalog {
    fn default() -> Self {
        // The built-in table satisfies the disjointness invariant (tested),
        // so validation cannot fail here.
        Self::from_entries(BUILTIN_PHRASES.iter().map(|&(phrase, kind)| (phrase, kind)))
            .expect("built-in phrase table is valid")
    }
}

impl PhraseCatalog {
    /// Builds a catalog from `(phrase, kind)` pairs, normalizing each
    /// phrase and enforcing the disjointness invariant: no duplicate
    /// variants and no cross-kind substring containment between variants.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, TriggerKind)>,
    ) -> Result<Self, CatalogError> {
        let mut normalized = Vec::new();
        for (phrase, kind) in entries {
            let variant = normalize(phrase);
            if variant.is_empty() {
                return Err(CatalogError::EmptyVariant { kind });
            }
            normalized.push((variant, kind));
        }

        for (i, (variant, kind)) in normalized.iter().enumerate() {
            for (other_variant, other_kind) in normalized.iter().skip(i + 1) {
                if variant == other_variant {
                    return Err(CatalogError::DuplicateVariant {
                        variant: variant.clone(),
                        first: *kind,
                        second: *other_kind,
                    });
                }
                if kind != other_kind {
                    let (outer, inner) = if variant.contains(other_variant.as_str()) {
                        ((variant, kind), (other_variant, other_kind))
                    } else if other_variant.contains(variant.as_str()) {
                        ((other_variant, other_kind), (variant, kind))
                    } else {
                        continue;
                    };
                    return Err(CatalogError::AmbiguousVariant {
                        outer: outer.0.clone(),
                        outer_kind: *outer.1,
                        inner: inner.0.clone(),
                        inner_kind: *inner.1,
                    });
                }
            }
        }

        Ok(Self {
            entries: normalized,
        })
    }

    /// Returns every trigger kind whose phrase variant occurs as a
    /// substring of `normalized_text` (which must already be normalized).
    ///
    /// Kinds are deduplicated and returned in catalog order, so a text
    /// matching variants of several kinds reports all of them
    /// deterministically.
    pub fn lookup(&self, normalized_text: &str) -> Vec<TriggerKind> {
        let mut kinds = Vec::new();
        for (variant, kind) in &self.entries {
            if normalized_text.contains(variant.as_str()) && !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        kinds
    }

    /// Number of registered phrase variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
