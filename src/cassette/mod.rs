//! Record/replay support for port interactions.
//!
//! A cassette is a YAML file holding the ordered interactions one command
//! run had with its ports (in practice: the HTTP transport). Recording a
//! live run produces a cassette; replaying one serves the same responses
//! back without any network, which is how the gateway is tested
//! end-to-end.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Interaction};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
