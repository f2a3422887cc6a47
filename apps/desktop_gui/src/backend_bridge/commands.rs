//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    /// Fetch the full breed list; used for the startup seed and for reloads.
    FetchBreeds { reason: FetchReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    Startup,
    Reload,
}

impl FetchReason {
    pub fn label(self) -> &'static str {
        match self {
            FetchReason::Startup => "startup",
            FetchReason::Reload => "reload",
        }
    }
}
