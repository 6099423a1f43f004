use omnistock_core::OrgCode;

use crate::result::{AiError, AiResult};

/// A tenant-scoped AI inference unit.
///
/// Jobs carry snapshots provided by callers; this crate stays storage-agnostic.
pub trait AiJob: Send + Sync + 'static {
    /// The organization this job runs for.
    fn org_code(&self) -> &OrgCode;

    /// Execute inference and return the generated text.
    ///
    /// Must not mutate domain state.
    fn run(&self) -> Result<AiResult, AiError>;
}
