//! # catalog-cli
//!
//! The `catalog` binary: a terminal chat over the product catalog.
//!
//! ```text
//! catalog                    # interactive chat
//! catalog ask "a quiet desk lamp under 50 dollars"
//! catalog index --rebuild    # re-embed the whole catalog
//! ```
//!
//! Settings come from flags, environment variables and a `.env` file.
//! `GROQ_API_KEY` is required for `chat` and `ask`.

pub mod cli;
pub mod console;
pub mod launcher;

pub use cli::{Cli, Command};
pub use launcher::run;
