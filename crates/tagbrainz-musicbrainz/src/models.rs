// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed projections of the MusicBrainz JSON schema.
//!
//! Every field is optional on the wire: absent or `null` keys decode to the
//! field's zero value.

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

use crate::de::{one_or_many, text_or_entity};

/// Artist information from MusicBrainz.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Artist {
    /// MusicBrainz artist ID (MBID).
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(rename = "sort-name", deserialize_with = "deserialize_default_from_null")]
    pub sort_name: String,
    /// Artist type (e.g., "Person", "Group").
    #[serde(rename = "type", deserialize_with = "deserialize_default_from_null")]
    pub artist_type: String,
    /// Country code (ISO 3166-1 alpha-2).
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub country: String,
    /// Area name; the service may send the full area object.
    #[serde(deserialize_with = "text_or_entity")]
    pub area: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub begin_date: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub end_date: String,
    /// Disambiguation comment (e.g., "US hip hop artist").
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub disambiguation: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub aliases: Vec<Alias>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub relations: Vec<Relation>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Alias {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "deserialize_default_from_null")]
    pub alias_type: String,
}

/// Relationship record shared by artists, releases and recordings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Relation {
    #[serde(rename = "type", deserialize_with = "deserialize_default_from_null")]
    pub relation_type: String,
    /// Target URL; the service may send the full url object.
    #[serde(deserialize_with = "text_or_entity")]
    pub url: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub artist: Artist,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tag {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
}

/// Release information from MusicBrainz.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Release {
    /// MusicBrainz release ID (MBID).
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub title: String,
    /// Release status (e.g., "Official", "Bootleg").
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub status: String,
    #[serde(rename = "text-representation", deserialize_with = "deserialize_default_from_null")]
    pub text_representation: TextRepresentation,
    #[serde(rename = "artist-credit", deserialize_with = "deserialize_default_from_null")]
    pub artist_credit: Vec<ArtistCredit>,
    #[serde(rename = "release-group", deserialize_with = "deserialize_default_from_null")]
    pub release_group: ReleaseGroup,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub relations: Vec<Relation>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub tags: Vec<Tag>,
    /// Cover Art Archive summary; a single object on lookups.
    #[serde(rename = "cover-art-archive", deserialize_with = "one_or_many")]
    pub cover_art: Vec<CoverArtUrl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoverArtUrl {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub artwork: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub front: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub back: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub count: u32,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub images: Vec<GbImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GbImage {
    #[serde(rename = "image", deserialize_with = "deserialize_default_from_null")]
    pub image_url: String,
    /// Image types in service order (e.g., ["Front", "Booklet"]).
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextRepresentation {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub language: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub script: String,
}

/// Artist credit as it appears on a release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtistCredit {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
}

/// Artist credit as it appears on a recording.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArtistName {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReleaseGroup {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "deserialize_default_from_null")]
    pub group_type: String,
}

/// Recording (track) information from MusicBrainz.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Recording {
    /// MusicBrainz recording ID (MBID).
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub title: String,
    /// Length in milliseconds.
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub length: u64,
    /// First release date (YYYY, YYYY-MM, or YYYY-MM-DD).
    #[serde(rename = "first-release-date", deserialize_with = "deserialize_default_from_null")]
    pub first_release_date: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub relations: Vec<Relation>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub tags: Vec<Tag>,
    #[serde(rename = "artist-credit", deserialize_with = "deserialize_default_from_null")]
    pub artist_credit: Vec<ArtistName>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub releases: Vec<Release>,
}

/// Search query parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Search query string.
    pub query: String,
    /// Maximum number of results (service default 25, max 100).
    pub limit: Option<u32>,
    /// Offset into the result set (default 0).
    pub offset: Option<u32>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            offset: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Lucene-style `field:value` query, terms joined by single spaces.
///
/// Values are passed through verbatim; only URL encoding is applied later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredQuery {
    terms: Vec<(String, String)>,
}

impl StructuredQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    pub fn recording(self, title: impl Into<String>) -> Self {
        self.term("recording", title)
    }

    pub fn artist(self, name: impl Into<String>) -> Self {
        self.term("artist", name)
    }

    pub fn release(self, title: impl Into<String>) -> Self {
        self.term("release", title)
    }

    pub fn build(&self) -> String {
        self.terms
            .iter()
            .map(|(field, value)| format!("{}:{}", field, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Search envelope for `artist/` queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistSearchResult {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub artists: Vec<Artist>,
}

/// Search envelope for `release/` queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseSearchResult {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub releases: Vec<Release>,
}

/// Search envelope for `recording/` queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingSearchResult {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub recordings: Vec<Recording>,
}
