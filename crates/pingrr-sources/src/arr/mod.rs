pub mod client;
pub mod payload;

pub use client::ArrClient;
pub use payload::{AddOptions, AddRequest, AddResponse, CommandRequest, MoviePayload, SeriesPayload};
