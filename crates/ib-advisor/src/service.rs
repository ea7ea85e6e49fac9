use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::notification::{
    render_recommendation_email, DispatchError, DispatchReceipt, EmailAddress, EmailDispatcher,
    EmailMessage, InvalidEmailAddress,
};
use crate::recommendation::{AnswerSet, RecommendationEngine, RecommendationResult, ScoreTally};

/// Body of a "send my results" request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendResultsRequest {
    #[serde(default)]
    pub email: Option<String>,
    /// Precomputed recommendation; preferred over `answers` when both are given.
    #[serde(default)]
    pub results: Option<RecommendationResult>,
    #[serde(default)]
    pub answers: Option<AnswerSet>,
}

/// Service composing the recommendation engine with an email dispatcher.
pub struct AdvisorService<D> {
    engine: Arc<RecommendationEngine>,
    dispatcher: Arc<D>,
}

impl<D> AdvisorService<D>
where
    D: EmailDispatcher + 'static,
{
    pub fn new(engine: RecommendationEngine, dispatcher: Arc<D>) -> Self {
        Self {
            engine: Arc::new(engine),
            dispatcher,
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Recommendation together with the axis totals it was decided from.
    pub fn recommend(&self, answers: &AnswerSet) -> (RecommendationResult, ScoreTally) {
        self.engine.recommend_with_tally(answers)
    }

    /// Validate the request, render the result email and hand it to the dispatcher.
    pub async fn email_results(
        &self,
        request: SendResultsRequest,
    ) -> Result<DispatchReceipt, AdvisorServiceError> {
        let raw_email = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(AdvisorServiceError::MissingInput)?;

        let result = match (request.results, request.answers) {
            (Some(results), _) => results,
            (None, Some(answers)) => self.engine.recommend(&answers),
            (None, None) => return Err(AdvisorServiceError::MissingInput),
        };

        let recipient = EmailAddress::parse(raw_email)?;
        let message = EmailMessage::new(recipient, render_recommendation_email(&result));

        match self.dispatcher.dispatch(message).await {
            Ok(receipt) => {
                info!(
                    course = result.course.code(),
                    level = result.level.code(),
                    "results email dispatched"
                );
                Ok(receipt)
            }
            Err(error) => {
                warn!(%error, "results email failed");
                Err(error.into())
            }
        }
    }
}

/// Error raised by the advisor service.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorServiceError {
    #[error("an email address and results (or answers) are required")]
    MissingInput,
    #[error(transparent)]
    InvalidAddress(#[from] InvalidEmailAddress),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
