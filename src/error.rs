//! Error types for the fallible load paths: the phonetic lexicon and GTAB
//! tables. Everything past the load boundary is infallible by construction
//! (malformed input is rejected up front, never panics mid-lookup).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("could not open phonetic lexicon at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("phonetic lexicon at {path} is truncated or malformed")]
    Malformed { path: PathBuf },
    #[error("no phonetic lexicon found in any candidate data directory")]
    NotFound,
}

#[derive(Error, Debug)]
pub enum GtabError {
    #[error("could not open GTAB table at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("GTAB table at {path} is truncated or malformed")]
    Malformed { path: PathBuf },
    #[error("GTAB table at {path} has an unrecognized header")]
    UnknownFormat { path: PathBuf },
    #[error("no GTAB table registered with id {0}")]
    UnknownId(u32),
    #[error("no GTAB table registered with filename {0}")]
    UnknownFilename(String),
}
