//! Decision engine for the two-player row-column number picking game. The
//! rules and the engine commands are described in `README.md`.
//!
//! The crate is organized bottom-up:
//!
//! - [`game`]: board, moves, scores, legal move generation and the state
//!   transition.
//! - [`strategy`]: the [`strategy::Strategy`] trait, the one-ply strategies
//!   (random, greedy, safe choice) and name-based construction.
//! - [`search`]: Monte Carlo Tree Search and alpha-beta minimax.
//! - [`evaluation`]: static evaluation used by alpha-beta.
//! - [`simulation`]: self-play of complete games.
//! - [`Engine`]: text protocol around all of the above.

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
// Searches run thousands of simulated games per move.
#![deny(clippy::perf)]

pub mod error;
pub mod evaluation;
pub mod game;
pub mod search;
pub mod simulation;
pub mod strategy;

mod engine;
pub use engine::Engine;
pub use error::Error;
use shadow_rs::shadow;

shadow!(build);

/// Build type and target. Produced by `build.rs`.
const FEATURES: &str = include_str!(concat!(env!("OUT_DIR"), "/features"));

/// Returns the full engine version that can be used to identify how it was
/// built in the first place.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the engine version on startup. Goes to stderr,
/// stdout is reserved for the protocol.
pub fn print_engine_info() {
    eprintln!("Row-column game engine {}", engine_version());
}

/// Prints the build type, target and whether the build is clean on startup.
pub fn print_binary_info() {
    eprintln!("Release build: {}", !shadow_rs::is_debug());
    eprintln!("Build: {FEATURES}");
    if !shadow_rs::git_clean() {
        eprintln!("Warning: built with uncommitted changes");
    }
}
