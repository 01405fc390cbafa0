//! Place search over OpenStreetMap data.
//!
//! A free-text query ("cafeterías", "parks") plus a position or a location
//! name goes through [`search::PlaceSearch`]: the query is classified into
//! place categories, turned into an Overpass filter, run around the center,
//! and the returned elements are normalized and ranked by distance. The
//! pipeline is exposed as JSON-RPC tools (`search_places`,
//! `reverse_geocode`) over http or stdio, plus a few plain http routes.

pub mod classify;
pub mod clients;
pub mod config;
pub mod distance;
pub mod error;
pub mod filter;
pub mod geocode;
pub mod net;
pub mod nominatim;
pub mod normalize;
pub mod overpass;
pub mod rate_limit;
pub mod search;
pub mod summary;
pub mod tools;
pub mod types;
