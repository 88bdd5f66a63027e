//! Per-session overlay state.
//!
//! Holds what the map currently renders. Input validation happens here,
//! before any query is issued: an incomplete box or an empty keyword is
//! ignored without touching the source or the overlays. A failed query
//! leaves the previous overlay in place.

use std::sync::Arc;

use geojson::FeatureCollection;
use redline_map_overlay_models::{BoundingBox, empty_feature_collection};

use crate::{OverlayError, OverlaySource};

/// The bound and search overlays of one map session.
pub struct OverlaySession {
    source: Arc<dyn OverlaySource>,
    dataset: Arc<FeatureCollection>,
    bound_overlay: FeatureCollection,
    search_overlay: FeatureCollection,
}

impl OverlaySession {
    /// Starts a session showing the full dataset and no search highlights.
    #[must_use]
    pub fn new(source: Arc<dyn OverlaySource>, dataset: Arc<FeatureCollection>) -> Self {
        let bound_overlay = dataset.as_ref().clone();
        Self {
            source,
            dataset,
            bound_overlay,
            search_overlay: empty_feature_collection(),
        }
    }

    /// The collection rendered as the graded fill layer.
    #[must_use]
    pub const fn bound_overlay(&self) -> &FeatureCollection {
        &self.bound_overlay
    }

    /// The collection rendered as the highlight outline layer.
    #[must_use]
    pub const fn search_overlay(&self) -> &FeatureCollection {
        &self.search_overlay
    }

    /// Number of features in the bound overlay.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.bound_overlay.features.len()
    }

    /// Number of features in the search overlay.
    #[must_use]
    pub fn search_count(&self) -> usize {
        self.search_overlay.features.len()
    }

    /// The source answering this session's queries.
    #[must_use]
    pub fn source(&self) -> &dyn OverlaySource {
        self.source.as_ref()
    }

    /// Replaces the bound overlay with the features matching `bbox`.
    ///
    /// Returns `Ok(None)` without querying if any box field is blank,
    /// otherwise the new bound overlay's feature count.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError`] if the query fails; the bound overlay is
    /// left unchanged.
    pub async fn submit_box(&mut self, bbox: &BoundingBox) -> Result<Option<usize>, OverlayError> {
        if !bbox.is_complete() {
            log::debug!("Ignoring incomplete bounding box {bbox:?}");
            return Ok(None);
        }

        log::debug!("Querying {} source by box {bbox:?}", self.source.id());
        self.bound_overlay = self.source.by_box(bbox).await?;
        Ok(Some(self.bound_count()))
    }

    /// Replaces the search overlay with the features matching `keyword`.
    ///
    /// Returns `Ok(None)` without querying if `keyword` is empty, otherwise
    /// the new search overlay's feature count.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError`] if the query fails; the search overlay is
    /// left unchanged.
    pub async fn submit_keyword(&mut self, keyword: &str) -> Result<Option<usize>, OverlayError> {
        if keyword.is_empty() {
            log::debug!("Ignoring empty keyword");
            return Ok(None);
        }

        log::debug!("Querying {} source by keyword {keyword:?}", self.source.id());
        self.search_overlay = self.source.by_keyword(keyword).await?;
        Ok(Some(self.search_count()))
    }

    /// Restores the full dataset as the bound overlay and returns its count.
    pub fn reset_box(&mut self) -> usize {
        self.bound_overlay = self.dataset.as_ref().clone();
        self.bound_count()
    }

    /// Clears the search overlay. Always returns 0.
    pub fn reset_keyword(&mut self) -> usize {
        self.search_overlay = empty_feature_collection();
        self.search_count()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::LocalOverlaySource;
    use async_trait::async_trait;
    use redline_map_filter::{SAMPLE_DATASET, dataset::parse_dataset};

    fn sample() -> Arc<FeatureCollection> {
        Arc::new(parse_dataset(SAMPLE_DATASET).unwrap())
    }

    fn local_session() -> OverlaySession {
        let dataset = sample();
        OverlaySession::new(Arc::new(LocalOverlaySource::new(dataset.clone())), dataset)
    }

    /// Records calls and fails every query.
    #[derive(Default)]
    struct FailingSource {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl OverlaySource for FailingSource {
        fn id(&self) -> &str {
            "failing"
        }

        async fn by_box(&self, bbox: &BoundingBox) -> Result<FeatureCollection, OverlayError> {
            self.calls.lock().unwrap().push(format!("box {bbox:?}"));
            Err(std::io::Error::other("connection refused").into())
        }

        async fn by_keyword(&self, keyword: &str) -> Result<FeatureCollection, OverlayError> {
            self.calls.lock().unwrap().push(format!("keyword {keyword}"));
            Err(std::io::Error::other("connection refused").into())
        }
    }

    #[test]
    fn starts_with_full_dataset_and_no_highlights() {
        let session = local_session();
        assert_eq!(session.bound_count(), 10);
        assert_eq!(session.search_count(), 0);
    }

    #[tokio::test]
    async fn keyword_submit_sets_search_overlay() {
        let mut session = local_session();
        assert_eq!(session.submit_keyword("red mountain").await.unwrap(), Some(5));
        assert_eq!(session.search_overlay().features.len(), 5);
        assert_eq!(
            session
                .submit_keyword("lana del rey please marry me")
                .await
                .unwrap(),
            Some(0)
        );
        assert_eq!(session.search_count(), 0);
    }

    #[tokio::test]
    async fn box_submit_sets_bound_overlay() {
        let mut session = local_session();
        let bbox = BoundingBox::new("40.0", "40.0", "-105.0", "-105.0");
        assert_eq!(session.submit_box(&bbox).await.unwrap(), Some(0));
        assert_eq!(session.bound_count(), 0);
    }

    #[tokio::test]
    async fn resets_restore_each_overlay_default() {
        let mut session = local_session();
        session
            .submit_box(&BoundingBox::new("39", "40", "-105.5", "-104.5"))
            .await
            .unwrap();
        session.submit_keyword("red").await.unwrap();
        assert_eq!(session.bound_count(), 2);
        assert!(session.search_count() > 0);

        assert_eq!(session.reset_box(), 10);
        assert_eq!(session.bound_overlay(), sample().as_ref());
        assert_eq!(session.reset_keyword(), 0);
        assert_eq!(session.search_overlay(), &empty_feature_collection());
    }

    #[tokio::test]
    async fn blank_input_issues_no_query() {
        let source = Arc::new(FailingSource::default());
        let mut session = OverlaySession::new(source.clone(), sample());

        let partial = BoundingBox::new("33", "", "-87", "-86");
        assert_eq!(session.submit_box(&partial).await.unwrap(), None);
        assert_eq!(session.submit_keyword("").await.unwrap(), None);
        assert!(source.calls.lock().unwrap().is_empty());
        assert_eq!(session.bound_count(), 10);
    }

    #[tokio::test]
    async fn whitespace_box_field_is_queried() {
        let source = Arc::new(FailingSource::default());
        let mut session = OverlaySession::new(source.clone(), sample());
        let bbox = BoundingBox::new("33", " ", "-87", "-86");
        assert!(session.submit_box(&bbox).await.is_err());
        assert_eq!(source.calls.lock().unwrap().len(), 1);

        let mut local = local_session();
        assert_eq!(local.submit_box(&bbox).await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn failed_query_keeps_previous_overlay() {
        let source = Arc::new(FailingSource::default());
        let mut session = OverlaySession::new(source.clone(), sample());

        let bbox = BoundingBox::new("33", "34", "-87", "-86");
        assert!(session.submit_box(&bbox).await.is_err());
        assert!(session.submit_keyword("red").await.is_err());
        assert_eq!(session.bound_count(), 10);
        assert_eq!(session.search_count(), 0);
        assert_eq!(source.calls.lock().unwrap().len(), 2);
    }
}
