use anyhow::Result;
use async_trait::async_trait;
use shared::protocol::SubmissionPayload;

pub mod controller;
pub mod error;
pub mod form;
pub mod meals;
pub mod notices;
pub mod site;
pub mod transport;
pub mod validation;
pub mod view;

pub use controller::{FormEvent, PendingSubmission, RsvpController, SubmissionPhase};
pub use error::SubmitError;
pub use transport::HttpIntakePort;

/// Delivers a payload to the form-intake endpoint.
///
/// `Ok(())` means "the request went out"; it says nothing about whether the
/// endpoint accepted the data. Implementations that can observe the response
/// may return an error for rejections, the controller treats both alike.
#[async_trait]
pub trait SubmissionPort: Send + Sync {
    async fn submit(&self, endpoint: &str, payload: &SubmissionPayload) -> Result<()>;
}
