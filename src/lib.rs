//! Movie lookalike search: find a movie by title in the merged TMDB credits and
//! movies datasets and rank the rest of the catalogue by shared genres and
//! director, with poster URLs resolved through TMDB.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
