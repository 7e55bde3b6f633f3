use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(OptionId);
id_newtype!(MovieId);

/// The filterable attributes of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetName {
    Genre,
    Country,
    Year,
    Actor,
    Director,
}

impl FacetName {
    pub const ALL: [FacetName; 5] = [
        FacetName::Genre,
        FacetName::Country,
        FacetName::Year,
        FacetName::Actor,
        FacetName::Director,
    ];

    pub fn filter_key(self) -> FilterKey {
        match self {
            FacetName::Genre => FilterKey::Genres,
            FacetName::Country => FilterKey::Countries,
            FacetName::Year => FilterKey::ReleaseYear,
            FacetName::Actor => FilterKey::Cast,
            FacetName::Director => FilterKey::Directors,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FacetName::Genre => "genre",
            FacetName::Country => "country",
            FacetName::Year => "year",
            FacetName::Actor => "actor",
            FacetName::Director => "director",
        }
    }
}

impl fmt::Display for FacetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query-string keys accepted by the movie listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    Search,
    Genres,
    Countries,
    ReleaseYear,
    Cast,
    Directors,
}

impl FilterKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Search => "search",
            FilterKey::Genres => "genres",
            FilterKey::Countries => "countries",
            FilterKey::ReleaseYear => "release_year",
            FilterKey::Cast => "cast",
            FilterKey::Directors => "directors",
        }
    }
}
