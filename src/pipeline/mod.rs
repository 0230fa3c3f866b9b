//! Processing pipeline components.

mod coordinator;
mod masters;
mod processor;

pub use coordinator::{
    ProcessCheck, SyncPlan, SyncSummary, collect_audio_files, is_audio_file, output_path_for,
    should_process, sync_directories,
};
pub use masters::{load_master, load_masters};
pub use processor::{ProcessOptions, process_clip};
