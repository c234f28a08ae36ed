/// Phase of the currently running transaction.
///
/// One request is fully processed before the next is accepted, so the state
/// only ever moves forward through a single save:
/// `Idle → Validating → Assembling → Persisting → Notifying → Idle`, with a
/// direct drop back to `Idle` when validation rejects the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Validating,
    Assembling,
    Persisting,
    Notifying,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Validating => "validating",
            PipelineState::Assembling => "assembling",
            PipelineState::Persisting => "persisting",
            PipelineState::Notifying => "notifying",
        }
    }
}
