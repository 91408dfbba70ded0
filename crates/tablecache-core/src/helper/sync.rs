use std::slice;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::api::RemoteSource;
use crate::cache::Collection;
use crate::models::{Review, ReviewDraft};

use super::{DataHelper, HelperError};

/// What happened to each pending review during a sync pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Accepted by the server and removed from the stash.
    pub delivered: Vec<u64>,
    /// Answered with an error status and removed from the stash anyway.
    pub discarded: Vec<u64>,
    /// Never reached the server; still in the stash.
    pub retained: Vec<u64>,
}

impl SyncReport {
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.discarded.len() + self.retained.len()
    }

    pub fn is_clean(&self) -> bool {
        self.discarded.is_empty() && self.retained.is_empty()
    }
}

impl<R: RemoteSource> DataHelper<R> {
    /// Reviews waiting to be delivered.
    pub fn pending_reviews(&self) -> Result<Vec<Review>, HelperError> {
        self.store
            .get_all(Collection::ReviewsStash)
            .map_err(HelperError::Store)
    }

    fn next_review_id(&self) -> u64 {
        let highest = |collection: Collection| match self.store.get_all::<Review>(collection) {
            Ok(reviews) => reviews.iter().map(|r| r.id).max().unwrap_or(0),
            Err(e) => {
                warn!(collection = %collection, error = %e, "Failed to read reviews for id allocation");
                0
            }
        };
        highest(Collection::Reviews).max(highest(Collection::ReviewsStash)) + 1
    }

    /// Record a new review locally and queue it for delivery.
    ///
    /// The review lands in `reviews` so it shows up immediately, and in the
    /// stash until [`sync`](Self::sync) delivers it. Without a local store
    /// there is nowhere to queue it, so it is posted right away.
    ///
    /// The reviews collection is read through first: a staged review must not
    /// be the first record in an empty collection, or it would hide the
    /// server's reviews and take an id the server already uses.
    pub async fn stage_review(&self, draft: ReviewDraft) -> Result<Review, HelperError> {
        draft.validate().map_err(HelperError::InvalidReview)?;

        if !self.store.is_available() {
            let review = draft.into_review(self.next_review_id(), Utc::now());
            debug!(review_id = review.id, "No local store, posting review directly");
            self.remote.post_review(&review).await?;
            return Ok(review);
        }

        if let Err(e) = self.fetch_reviews().await {
            warn!(error = %e, "Could not load reviews before staging, ids may collide");
        }
        let review = draft.into_review(self.next_review_id(), Utc::now());

        self.store
            .put_many(Collection::Reviews, slice::from_ref(&review))
            .map_err(HelperError::Store)?;
        self.store
            .put_many(Collection::ReviewsStash, slice::from_ref(&review))
            .map_err(HelperError::Store)?;

        info!(review_id = review.id, restaurant_id = review.restaurant_id, "Review staged");
        Ok(review)
    }

    /// Post every pending review and drop the ones that got an answer.
    ///
    /// All posts run concurrently and are awaited before the stash is
    /// touched. Any response, including an error status, settles the entry;
    /// only requests that never got a response stay queued.
    pub async fn sync(&self) -> Result<SyncReport, HelperError> {
        let pending = match self.pending_reviews() {
            Ok(pending) => pending,
            Err(e) => {
                warn!(error = %e, "Failed to read pending reviews");
                return Ok(SyncReport::default());
            }
        };
        if pending.is_empty() {
            debug!("No pending reviews to sync");
            return Ok(SyncReport::default());
        }

        let attempts = pending.iter().map(|review| async move {
            (review.id, self.remote.post_review(review).await)
        });

        let mut report = SyncReport::default();
        for (id, outcome) in join_all(attempts).await {
            match outcome {
                Ok(()) => report.delivered.push(id),
                Err(e) if e.is_transport() => {
                    warn!(review_id = id, error = %e, "Review not delivered, keeping it queued");
                    report.retained.push(id);
                }
                Err(e) => {
                    warn!(review_id = id, error = %e, "Server rejected review, dropping it from the queue");
                    report.discarded.push(id);
                }
            }
        }

        let settled: Vec<u64> = report
            .delivered
            .iter()
            .chain(&report.discarded)
            .copied()
            .collect();
        self.store
            .delete_many(Collection::ReviewsStash, &settled)
            .map_err(HelperError::Store)?;

        info!(
            delivered = report.delivered.len(),
            discarded = report.discarded.len(),
            retained = report.retained.len(),
            "Sync finished"
        );
        Ok(report)
    }
}
