pub mod artifact_store;
pub mod display_loop;
pub mod pipeline;
pub mod transport;

pub use artifact_store::{ArtifactStore, StoredArtifact};
pub use display_loop::{
    run_cycle, run_display_loop, Backoff, CycleOutcome, LoopOptions, LoopSummary,
};
pub use pipeline::{write_artifact, PreparePipeline, PreparedFrame};
pub use transport::{
    BufferedChunks, ChunkSource, HttpTransport, LocalTransport, Transport, DEFAULT_CHUNK_SIZE,
};
