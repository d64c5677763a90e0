pub mod domain;
pub mod ports;
pub mod sentiment;

pub use domain::{Emotion, Interaction, TIMESTAMP_FORMAT};
pub use ports::{InteractionJournal, InteractionStore, PortError, PortResult, ReplyService};
