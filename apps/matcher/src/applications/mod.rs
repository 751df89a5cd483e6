pub mod recorder;
pub mod tracker;

pub use recorder::ScoreRecorder;
pub use tracker::{Application, ApplicationStatus, ApplicationTracker, StatusChange};
