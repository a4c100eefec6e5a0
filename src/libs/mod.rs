pub mod config;
pub mod error;
pub mod extend;
pub mod extract;
pub mod hsp;
pub mod io;
pub mod kmer;
pub mod pam;
pub mod prediction;
pub mod process;
pub mod protein;
pub mod score;
pub mod seed;
pub mod shard;
pub mod similar;

pub use config::Thresholds;
pub use error::{Result, SprintError};
pub use hsp::{Hsp, HspRecord, HspSet, Location};
pub use prediction::{PredictionMatrix, ScoreFormat};
pub use protein::{Protein, ProteinSet};
pub use shard::Shard;
