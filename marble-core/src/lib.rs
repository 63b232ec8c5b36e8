//! marble-core: compiles marble notation into static SVG marble diagrams
//!
//! Each lane is a string of marble notation: lowercase letters are messages,
//! `-` is one frame of delay, `|` completes the stream, `R`/`C`/`L` mark
//! rebalance, compaction and lag events and `X` marks an error. Anything else
//! is ignored.
//!
//! # Example
//!
//! ```
//! use marble_core::{render, DiagramSpec};
//!
//! let spec = DiagramSpec::new("single-partition", 800.0, 300.0)
//!     .with_title("Single Partition Processing")
//!     .lane("producer", "a---b---c---d---|")
//!     .lane("partition", "a---b---c---d---|")
//!     .lane("consumer", "--a---b---c---d-|");
//!
//! let svg = render(&spec);
//! assert!(svg.contains("offset: 3"));
//! ```
//!
//! # Inline format
//!
//! ```
//! use marble_core::{parse, render_with_config, Config, Theme};
//!
//! let spec = parse("title Rebalance\npartition0: a---b---|\nrebalance: ---R---|").unwrap();
//! let config = Config::default().with_theme(Theme::high_contrast());
//! let svg = render_with_config(&spec, &config);
//! ```

pub mod ast;
pub mod config;
pub mod layout;
pub mod legend;
pub mod marble;
pub mod parser;
pub mod renderer;
pub mod theme;
pub mod token;

pub use ast::*;
pub use config::{default_diagrams, from_yaml_str, load_or_default, ConfigError};
pub use parser::{parse, parse_notation, ParseError};
pub use renderer::{render, render_with_config, Config};
pub use theme::Theme;
pub use token::{classify, MarbleColor, SpecialEvent, Token};
