// SPDX-License-Identifier: GPL-3.0-or-later

//! MusicBrainz web service client for artist, release and recording metadata.
//!
//! Each operation issues one GET against `https://musicbrainz.org/ws/2/`
//! (or an injected base URL) and decodes the JSON body into typed records.
//! Lookups by title, artist and album back the tagging workflow.

pub mod client;
mod de;
pub mod error;
pub mod models;
pub mod rate_limiter;

pub use client::{MusicBrainzClient, MusicBrainzClientBuilder};
pub use error::{MusicBrainzError, Result};
pub use models::{
    Alias, Artist, ArtistCredit, ArtistName, ArtistSearchResult, CoverArtUrl, GbImage, Recording,
    RecordingSearchResult, Relation, Release, ReleaseGroup, ReleaseSearchResult, SearchQuery,
    StructuredQuery, Tag, TextRepresentation,
};
