#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

pub mod browser;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod groups;
pub mod page;
pub mod playlist;
pub mod scrape;
