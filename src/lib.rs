// Library root
// -----------
// Imports local `YYYYMMDD.md` daily note files into Reflect daily notes.
// The binary (`main.rs`) parses arguments and hands a `RunConfig` to
// `app::run`.
//
// Module responsibilities:
// - `discover`: maps file names to ISO dates and builds the ordered
//   date -> file mapping for a directory.
// - `range`: the offset/limit window applied to that mapping.
// - `api`: HTTP calls to the Reflect API behind the `ReflectApi` trait.
// - `ui`: operator prompts (confirmation, graph choice).
// - `import`: sends one append request per in-range file.
// - `app`: wires the steps together for one run.
pub mod api;
pub mod app;
pub mod discover;
pub mod error;
pub mod import;
pub mod range;
pub mod ui;

pub use error::{ImportError, Result};
