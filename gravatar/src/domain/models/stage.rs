use strum::Display;

/// Where a single upload is in its lifecycle.
///
/// `Idle → Started → (ReadPending → Received)? → Requesting →
/// {Succeeded | Failed} → Done`. A failed read jumps straight from
/// `ReadPending` to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum UploadStage {
    Idle,
    Started,
    ReadPending,
    Received,
    Requesting,
    Succeeded,
    Failed,
    Done,
}

impl UploadStage {
    pub fn can_transition_to(self, next: UploadStage) -> bool {
        use UploadStage::*;

        matches!(
            (self, next),
            (Idle, Started)
                | (Started, ReadPending)
                | (Started, Requesting)
                | (ReadPending, Received)
                | (ReadPending, Failed)
                | (Received, Requesting)
                | (Requesting, Succeeded)
                | (Requesting, Failed)
                | (Succeeded, Done)
                | (Failed, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStage::Succeeded | UploadStage::Failed)
    }
}
