//! `tsplib` decodes TSPLIB95 instances into a node/link network model.
//!
//! The core is the `EDGE_WEIGHT_SECTION` decoder for `EDGE_WEIGHT_TYPE:
//! EXPLICIT` instances, covering the full matrix and the eight triangular
//! layouts. Around it the crate provides:
//! - typed TSPLIB95 keywords and header values,
//! - a permissive instance reader with header lookup by keyword,
//! - `NODE_COORD_SECTION` decoding for `EUC_2D` instances,
//! - the `Network` container with depot/client node classification.
//!
//! # Quickstart
//!
//! ```
//! use tsplib::decoder::{DecodeContext, decode_section};
//!
//! fn main() -> tsplib::TsplibResult<()> {
//!     let ctx = DecodeContext::new(3)
//!         .with_edge_weight_format("UPPER_ROW")
//!         .with_depots([1]);
//!     let decoded = decode_section("10 20\n30\n", &ctx)?;
//!     assert_eq!(decoded.links.len(), 3);
//!     assert!(decoded.symmetric);
//!     Ok(())
//! }
//! ```

pub mod coords;
pub mod decoder;
pub mod instance;
pub mod keyword;
pub mod layout;
pub mod network;
pub mod values;

mod error;

pub use decoder::{DecodeContext, DecodeWarning, DecodedMatrix, decode, decode_section};
pub use error::{TsplibError, TsplibResult};
pub use instance::{DecodedNetwork, TsplibHeader, TsplibInstance};
pub use keyword::{EdgeWeightFormat, EdgeWeightType, Keyword, ProblemType};
pub use layout::{Cell, MatrixLayout};
pub use network::{Link, Links, Network, Node, NodeKind};
