//! Common test infrastructure for circleci-update tests
//!
//! # Modules
//!
//! - `constants`: Version strings, slugs and targets
//! - `fakes`: In-memory `ReleaseSource` implementations
//! - `fixtures`: JSON fixture loading helpers
//! - `scripts`: Fake package manager executables
//! - `mock_server`: Wiremock setup helpers for the releases API

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod constants;
pub mod fakes;
pub mod fixtures;
pub mod mock_server;
pub mod scripts;

pub use constants::*;
pub use fakes::*;
pub use fixtures::*;
pub use mock_server::*;
pub use scripts::*;
