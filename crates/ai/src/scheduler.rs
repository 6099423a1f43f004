use omnistock_core::OrgCode;

use crate::job::AiJob;
use crate::result::{AiError, AiResult};

/// Runs AI jobs for one organization, refusing everyone else's.
pub trait AiScheduler: Send + Sync + 'static {
    fn org_code(&self) -> &OrgCode;

    fn run<J: AiJob>(&self, job: J) -> Result<AiResult, AiError> {
        if job.org_code() != self.org_code() {
            return Err(AiError::InvalidInput(format!(
                "job for {} outside scheduler scope",
                job.org_code()
            )));
        }
        job.run()
    }
}

/// Runs each job on the calling thread.
#[derive(Debug, Clone)]
pub struct LocalAiScheduler {
    org_code: OrgCode,
}

impl LocalAiScheduler {
    pub fn for_tenant(org_code: OrgCode) -> Self {
        Self { org_code }
    }
}

impl AiScheduler for LocalAiScheduler {
    fn org_code(&self) -> &OrgCode {
        &self.org_code
    }
}
