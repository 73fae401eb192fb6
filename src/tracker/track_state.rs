/// Tracker state for the on-screen label lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// No local detection and nothing displayed
    #[default]
    Empty,
    /// A qualifying detection was seen this frame
    Tracking,
    /// Detection lost, label held at its last smoothed position
    Holding,
}
