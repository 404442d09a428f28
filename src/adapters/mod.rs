//! Adapter implementations for the port traits: live (real network and
//! stdio), recording (wrap-and-capture), and replaying (cassette-served).

pub mod live;
pub mod recording;
pub mod replaying;
