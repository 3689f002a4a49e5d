//! Recommendation Service - resolves an uploaded photo into a recommendation

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use observability::RecommendationMetrics;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::classifier::classify;
use crate::config::{OutfitConfig, VectorSearchConfig};
use crate::error::{OutfitError, OutfitResult};
use crate::labels::LabelDetector;
use crate::models::{
    CategoryQuery, ClothingItem, Label, Neighbor, Recommendation, RecommendOutfitRequest,
    RecommendationQuery, SimilarityQuery,
};
use crate::repository::ItemRepository;
use crate::similarity::{QueryEmbedder, SimilarityIndex};
use crate::strategy::LookupStrategy;

/// Per-process settings the resolver reads on every request
#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    pub storage_bucket: String,
    pub strategy: LookupStrategy,
    pub neighbor_count: u32,
    pub dimensions: usize,
    pub restrict_namespace: String,
}

impl RecommendationSettings {
    pub fn new(storage_bucket: impl Into<String>, strategy: LookupStrategy) -> Self {
        Self {
            storage_bucket: storage_bucket.into(),
            strategy,
            neighbor_count: VectorSearchConfig::DEFAULT_NEIGHBOR_COUNT,
            dimensions: VectorSearchConfig::DEFAULT_DIMENSIONS,
            restrict_namespace: VectorSearchConfig::DEFAULT_RESTRICT_NAMESPACE.to_string(),
        }
    }
}

impl From<&OutfitConfig> for RecommendationSettings {
    fn from(config: &OutfitConfig) -> Self {
        let mut settings = Self::new(config.storage_bucket.clone(), config.strategy);
        if let Some(ref vector) = config.vector {
            settings.neighbor_count = vector.neighbor_count;
            settings.dimensions = vector.dimensions;
            settings.restrict_namespace = vector.restrict_namespace.clone();
        }
        settings
    }
}

/// Recommendation service
///
/// Holds the injected collaborators and dispatches each request on the
/// configured [`LookupStrategy`]. Stateless between requests.
pub struct RecommendationService<R: ItemRepository> {
    repository: Arc<R>,
    detector: Arc<dyn LabelDetector>,
    index: Option<Arc<dyn SimilarityIndex>>,
    embedder: Option<Arc<dyn QueryEmbedder>>,
    settings: RecommendationSettings,
}

impl<R: ItemRepository> RecommendationService<R> {
    pub fn new(
        repository: R,
        detector: Arc<dyn LabelDetector>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            detector,
            index: None,
            embedder: None,
            settings,
        }
    }

    pub fn with_similarity(
        mut self,
        index: Arc<dyn SimilarityIndex>,
        embedder: Arc<dyn QueryEmbedder>,
    ) -> Self {
        self.index = Some(index);
        self.embedder = Some(embedder);
        self
    }

    pub fn strategy(&self) -> LookupStrategy {
        self.settings.strategy
    }

    /// Fail fast when the configured strategy lacks its collaborators.
    pub fn check_collaborators(&self) -> OutfitResult<()> {
        if self.settings.strategy.needs_similarity()
            && (self.index.is_none() || self.embedder.is_none())
        {
            return Err(OutfitError::Config(format!(
                "strategy {} needs a similarity index and a query embedder",
                self.settings.strategy
            )));
        }
        Ok(())
    }

    /// Build the `gs://` URI for an object path in the configured bucket
    pub fn image_uri(&self, file_path: &str) -> String {
        format!(
            "gs://{}/{}",
            self.settings.storage_bucket,
            file_path.trim_start_matches('/')
        )
    }

    /// Resolve an uploaded photo into a recommendation
    #[instrument(skip(self, input), fields(strategy = %self.settings.strategy, file_path = ?input.file_path))]
    pub async fn recommend(&self, input: RecommendOutfitRequest) -> OutfitResult<Recommendation> {
        let result = self.resolve(input).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind().as_str(),
        };
        RecommendationMetrics::record_outcome(&self.settings.strategy.to_string(), outcome);
        result
    }

    async fn resolve(&self, input: RecommendOutfitRequest) -> OutfitResult<Recommendation> {
        input
            .validate()
            .map_err(|e| OutfitError::InvalidArgument(e.to_string()))?;

        let file_path = input
            .file_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| OutfitError::InvalidArgument("filePath is required".to_string()))?;

        let image_uri = self.image_uri(file_path);
        let labels = self.detect_labels(&image_uri).await?;

        match self.settings.strategy {
            LookupStrategy::CategoryRule => {
                let query = self.build_category_query(&labels);
                self.lookup_by_category(query)
                    .await
                    .map(Recommendation::Item)
            }
            LookupStrategy::SimilaritySearch => self
                .lookup_by_similarity(&labels)
                .await
                .map(Recommendation::Candidates),
            LookupStrategy::RawLabelPassthrough => {
                self.passthrough(labels).map(Recommendation::Labels)
            }
        }
    }

    /// Ask the label detector what the image shows
    #[instrument(skip(self))]
    pub async fn detect_labels(&self, image_uri: &str) -> OutfitResult<Vec<Label>> {
        let labels = timed("vision", self.detector.detect_labels(image_uri)).await?;

        RecommendationMetrics::record_labels_detected(labels.len());
        info!(
            labels = ?labels.iter().map(|l| l.description.as_str()).collect::<Vec<_>>(),
            "Labels detected"
        );
        Ok(labels)
    }

    /// Classify the labels into the category to look up
    pub fn build_category_query(&self, labels: &[Label]) -> CategoryQuery {
        let descriptions: Vec<&str> = labels.iter().map(|l| l.description.as_str()).collect();
        let query = CategoryQuery {
            wanted_type: classify(&descriptions),
        };
        debug!(query = ?RecommendationQuery::Category(query), "Derived query");
        query
    }

    /// Fetch one item of the wanted category
    #[instrument(skip(self), fields(wanted_type = %query.wanted_type))]
    pub async fn lookup_by_category(&self, query: CategoryQuery) -> OutfitResult<ClothingItem> {
        let item = timed(
            "firestore",
            self.repository.find_one_by_type(query.wanted_type),
        )
        .await?
        .ok_or_else(|| {
            OutfitError::NotFound(format!("No {} items available", query.wanted_type))
        })?;

        info!(item_id = %item.id, "Recommendation found");
        Ok(item)
    }

    /// Fetch the items nearest to an embedding of the labels
    #[instrument(skip(self, labels), fields(label_count = labels.len()))]
    pub async fn lookup_by_similarity(&self, labels: &[Label]) -> OutfitResult<Vec<ClothingItem>> {
        if labels.is_empty() {
            return Err(OutfitError::NotFound(
                "No labels detected to search with".to_string(),
            ));
        }

        let (Some(index), Some(embedder)) = (&self.index, &self.embedder) else {
            return Err(OutfitError::Config(
                "similarity search is not configured".to_string(),
            ));
        };

        let descriptions: Vec<String> = labels.iter().map(|l| l.description.clone()).collect();
        let embedding = timed("embedder", embedder.embed(&descriptions)).await?;

        if embedding.len() != self.settings.dimensions {
            return Err(OutfitError::DimensionMismatch {
                expected: self.settings.dimensions,
                actual: embedding.len(),
            });
        }

        let query = SimilarityQuery {
            embedding,
            neighbor_count: self.settings.neighbor_count,
            namespace: self.settings.restrict_namespace.clone(),
            allowed_labels: descriptions,
        };
        debug!(
            neighbor_count = query.neighbor_count,
            namespace = %query.namespace,
            allowed_labels = ?query.allowed_labels,
            "Derived similarity query"
        );

        let mut neighbors = timed("vector_index", index.find_neighbors(&query)).await?;
        neighbors.truncate(self.settings.neighbor_count as usize);
        if neighbors.is_empty() {
            return Err(OutfitError::NotFound("No similar items found".to_string()));
        }

        self.fetch_neighbors(&neighbors).await
    }

    /// Resolve neighbor ids concurrently, keeping neighbor order and dropping missing ids
    async fn fetch_neighbors(&self, neighbors: &[Neighbor]) -> OutfitResult<Vec<ClothingItem>> {
        let lookups = neighbors
            .iter()
            .map(|n| timed("firestore", self.repository.get_by_id(&n.id)));
        let found = try_join_all(lookups).await?;

        let items: Vec<ClothingItem> = found.into_iter().flatten().collect();
        let missing = neighbors.len() - items.len();
        RecommendationMetrics::record_missing_neighbors(missing);

        info!(
            neighbors = neighbors.len(),
            items = items.len(),
            missing,
            "Similarity candidates resolved"
        );
        Ok(items)
    }

    /// Return the detected labels unchanged
    pub fn passthrough(&self, labels: Vec<Label>) -> OutfitResult<Vec<Label>> {
        if labels.is_empty() {
            return Err(OutfitError::NotFound("No usable labels detected".to_string()));
        }
        Ok(labels)
    }
}

/// Await a collaborator call and record its latency and outcome.
async fn timed<T, F>(collaborator: &'static str, call: F) -> OutfitResult<T>
where
    F: Future<Output = OutfitResult<T>>,
{
    let started = Instant::now();
    let result = call.await;
    RecommendationMetrics::record_collaborator_call(collaborator, started.elapsed(), result.is_ok());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::MockLabelDetector;
    use crate::models::ClothingType;
    use crate::repository::MockItemRepository;
    use crate::similarity::{MockQueryEmbedder, MockSimilarityIndex};
    use mockall::predicate::eq;

    fn labels(names: &[&str]) -> Vec<Label> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Label::new(*n, 0.9 - i as f32 * 0.1))
            .collect()
    }

    fn item(id: &str, item_type: ClothingType) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            item_type,
            name: format!("Item {}", id),
            image_url: format!("https://cdn.example.com/{}.jpg", id),
        }
    }

    fn detector_returning(names: &'static [&'static str]) -> Arc<MockLabelDetector> {
        let mut detector = MockLabelDetector::new();
        detector
            .expect_detect_labels()
            .times(1)
            .returning(move |_| Ok(labels(names)));
        Arc::new(detector)
    }

    fn service(
        repository: MockItemRepository,
        detector: Arc<MockLabelDetector>,
        strategy: LookupStrategy,
    ) -> RecommendationService<MockItemRepository> {
        RecommendationService::new(
            repository,
            detector,
            RecommendationSettings::new("closet-uploads", strategy),
        )
    }

    fn similarity_service(
        repository: MockItemRepository,
        detector: Arc<MockLabelDetector>,
        index: MockSimilarityIndex,
        embedder: MockQueryEmbedder,
    ) -> RecommendationService<MockItemRepository> {
        service(repository, detector, LookupStrategy::SimilaritySearch)
            .with_similarity(Arc::new(index), Arc::new(embedder))
    }

    fn embedder_returning(len: usize) -> MockQueryEmbedder {
        let mut embedder = MockQueryEmbedder::new();
        embedder
            .expect_embed()
            .times(1)
            .returning(move |_| Ok(vec![0.1; len]));
        embedder
    }

    fn neighbors(ids: &[&str]) -> Vec<Neighbor> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Neighbor {
                id: id.to_string(),
                distance: i as f64 * 0.1,
            })
            .collect()
    }

    #[test]
    fn test_settings_default_to_vector_search_defaults() {
        let settings = RecommendationSettings::new("closet-uploads", LookupStrategy::CategoryRule);
        assert_eq!(
            settings.neighbor_count,
            VectorSearchConfig::DEFAULT_NEIGHBOR_COUNT
        );
        assert_eq!(settings.dimensions, VectorSearchConfig::DEFAULT_DIMENSIONS);
        assert_eq!(
            settings.restrict_namespace,
            VectorSearchConfig::DEFAULT_RESTRICT_NAMESPACE
        );
    }

    #[test]
    fn test_image_uri_strips_leading_slash() {
        let service = service(
            MockItemRepository::new(),
            Arc::new(MockLabelDetector::new()),
            LookupStrategy::CategoryRule,
        );
        assert_eq!(
            service.image_uri("/uploads/u1/jeans.jpg"),
            "gs://closet-uploads/uploads/u1/jeans.jpg"
        );
        assert_eq!(
            service.image_uri("uploads/u1/jeans.jpg"),
            "gs://closet-uploads/uploads/u1/jeans.jpg"
        );
    }

    #[tokio::test]
    async fn test_missing_file_path_makes_no_calls() {
        let mut detector = MockLabelDetector::new();
        detector.expect_detect_labels().never();
        let mut repository = MockItemRepository::new();
        repository.expect_find_one_by_type().never();

        let service = service(repository, Arc::new(detector), LookupStrategy::CategoryRule);

        let err = service
            .recommend(RecommendOutfitRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::InvalidArgument(_)));

        let err = service
            .recommend(RecommendOutfitRequest::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::InvalidArgument(_)));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_failures_are_left_to_the_http_layer_to_log() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut detector = MockLabelDetector::new();
        detector.expect_detect_labels().never();
        let service = service(
            MockItemRepository::new(),
            Arc::new(detector),
            LookupStrategy::CategoryRule,
        );

        let err = service
            .recommend(RecommendOutfitRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::InvalidArgument(_)));

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.is_empty(), "unexpected service log: {output}");
    }

    #[tokio::test]
    async fn test_detector_receives_gs_uri() {
        let mut detector = MockLabelDetector::new();
        detector
            .expect_detect_labels()
            .withf(|uri| uri == "gs://closet-uploads/uploads/u1/jeans.jpg")
            .times(1)
            .returning(|_| Ok(labels(&["Jeans"])));
        let mut repository = MockItemRepository::new();
        repository
            .expect_find_one_by_type()
            .returning(|_| Ok(Some(item("shirt1", ClothingType::Top))));

        let service = service(repository, Arc::new(detector), LookupStrategy::CategoryRule);
        service
            .recommend(RecommendOutfitRequest::new("/uploads/u1/jeans.jpg"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_jeans_photo_recommends_a_top() {
        let mut repository = MockItemRepository::new();
        repository
            .expect_find_one_by_type()
            .with(eq(ClothingType::Top))
            .times(1)
            .returning(|_| Ok(Some(item("shirt1", ClothingType::Top))));

        let service = service(
            repository,
            detector_returning(&["Jeans", "Denim"]),
            LookupStrategy::CategoryRule,
        );

        let result = service
            .recommend(RecommendOutfitRequest::new("uploads/jeans.jpg"))
            .await
            .unwrap();
        assert_eq!(result, Recommendation::Item(item("shirt1", ClothingType::Top)));
    }

    #[tokio::test]
    async fn test_blouse_without_bottoms_is_not_found() {
        let mut repository = MockItemRepository::new();
        repository
            .expect_find_one_by_type()
            .with(eq(ClothingType::Bottom))
            .times(1)
            .returning(|_| Ok(None));

        let service = service(
            repository,
            detector_returning(&["Blouse"]),
            LookupStrategy::CategoryRule,
        );

        let err = service
            .recommend(RecommendOutfitRequest::new("uploads/blouse.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_no_labels_falls_back_to_outerwear() {
        let mut repository = MockItemRepository::new();
        repository
            .expect_find_one_by_type()
            .with(eq(ClothingType::Outer))
            .times(1)
            .returning(|_| Ok(Some(item("coat2", ClothingType::Outer))));

        let service = service(repository, detector_returning(&[]), LookupStrategy::CategoryRule);

        let result = service
            .recommend(RecommendOutfitRequest::new("uploads/blank.jpg"))
            .await
            .unwrap();
        assert!(matches!(result, Recommendation::Item(ref i) if i.id == "coat2"));
    }

    #[tokio::test]
    async fn test_detector_failure_is_internal() {
        let mut detector = MockLabelDetector::new();
        detector
            .expect_detect_labels()
            .returning(|_| Err(OutfitError::LabelDetection("PERMISSION_DENIED".to_string())));
        let mut repository = MockItemRepository::new();
        repository.expect_find_one_by_type().never();

        let service = service(repository, Arc::new(detector), LookupStrategy::CategoryRule);

        let err = service
            .recommend(RecommendOutfitRequest::new("uploads/a.jpg"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_similarity_with_no_labels_is_not_found() {
        let mut embedder = MockQueryEmbedder::new();
        embedder.expect_embed().never();
        let mut index = MockSimilarityIndex::new();
        index.expect_find_neighbors().never();

        let service = similarity_service(
            MockItemRepository::new(),
            detector_returning(&[]),
            index,
            embedder,
        );

        let err = service
            .recommend(RecommendOutfitRequest::new("uploads/blank.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_similarity_query_uses_labels_as_allow_list() {
        let mut index = MockSimilarityIndex::new();
        index
            .expect_find_neighbors()
            .withf(|q| {
                q.neighbor_count == 3
                    && q.namespace == "label"
                    && q.embedding.len() == 768
                    && q.allowed_labels == vec!["Jeans".to_string(), "Denim".to_string()]
            })
            .times(1)
            .returning(|_| Ok(neighbors(&["shirt1"])));
        let mut repository = MockItemRepository::new();
        repository
            .expect_get_by_id()
            .times(1)
            .returning(|id| Ok(Some(item(id, ClothingType::Top))));

        let service = similarity_service(
            repository,
            detector_returning(&["Jeans", "Denim"]),
            index,
            embedder_returning(768),
        );

        let result = service
            .recommend(RecommendOutfitRequest::new("uploads/jeans.jpg"))
            .await
            .unwrap();
        assert_eq!(
            result,
            Recommendation::Candidates(vec![item("shirt1", ClothingType::Top)])
        );
    }

    #[tokio::test]
    async fn test_missing_neighbors_are_dropped_in_order() {
        let mut index = MockSimilarityIndex::new();
        index
            .expect_find_neighbors()
            .times(1)
            .returning(|_| Ok(neighbors(&["pants3", "gone9", "shirt1"])));
        let mut repository = MockItemRepository::new();
        repository
            .expect_get_by_id()
            .times(3)
            .returning(|id| match id {
                "gone9" => Ok(None),
                other => Ok(Some(item(other, ClothingType::Other))),
            });

        let service = similarity_service(
            repository,
            detector_returning(&["Shirt"]),
            index,
            embedder_returning(768),
        );

        let items = service
            .lookup_by_similarity(&labels(&["Shirt"]))
            .await
            .unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["pants3", "shirt1"]);
    }

    #[tokio::test]
    async fn test_extra_neighbors_beyond_count_are_ignored() {
        let mut index = MockSimilarityIndex::new();
        index
            .expect_find_neighbors()
            .times(1)
            .returning(|_| Ok(neighbors(&["shirt1", "pants3", "coat2", "hat4", "belt5"])));
        let mut repository = MockItemRepository::new();
        repository
            .expect_get_by_id()
            .withf(|id| ["shirt1", "pants3", "coat2"].iter().any(|kept| id == *kept))
            .times(3)
            .returning(|id| Ok(Some(item(id, ClothingType::Other))));

        let service = similarity_service(
            repository,
            Arc::new(MockLabelDetector::new()),
            index,
            embedder_returning(768),
        );

        let items = service
            .lookup_by_similarity(&labels(&["Shirt"]))
            .await
            .unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["shirt1", "pants3", "coat2"]);
    }

    #[tokio::test]
    async fn test_all_neighbors_missing_is_empty_success() {
        let mut index = MockSimilarityIndex::new();
        index
            .expect_find_neighbors()
            .returning(|_| Ok(neighbors(&["a", "b"])));
        let mut repository = MockItemRepository::new();
        repository.expect_get_by_id().times(2).returning(|_| Ok(None));

        let service = similarity_service(
            repository,
            Arc::new(MockLabelDetector::new()),
            index,
            embedder_returning(768),
        );

        let items = service
            .lookup_by_similarity(&labels(&["Shirt"]))
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_zero_neighbors_is_not_found() {
        let mut index = MockSimilarityIndex::new();
        index.expect_find_neighbors().returning(|_| Ok(Vec::new()));
        let mut repository = MockItemRepository::new();
        repository.expect_get_by_id().never();

        let service = similarity_service(
            repository,
            Arc::new(MockLabelDetector::new()),
            index,
            embedder_returning(768),
        );

        let err = service
            .lookup_by_similarity(&labels(&["Shirt"]))
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_skips_index() {
        let mut index = MockSimilarityIndex::new();
        index.expect_find_neighbors().never();

        let service = similarity_service(
            MockItemRepository::new(),
            Arc::new(MockLabelDetector::new()),
            index,
            embedder_returning(700),
        );

        let err = service
            .lookup_by_similarity(&labels(&["Shirt"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OutfitError::DimensionMismatch {
                expected: 768,
                actual: 700
            }
        ));
        assert_eq!(err.kind(), crate::error::ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_store_failure_during_neighbor_lookup_propagates() {
        let mut index = MockSimilarityIndex::new();
        index
            .expect_find_neighbors()
            .returning(|_| Ok(neighbors(&["a"])));
        let mut repository = MockItemRepository::new();
        repository
            .expect_get_by_id()
            .returning(|_| Err(OutfitError::Store("UNAVAILABLE".to_string())));

        let service = similarity_service(
            repository,
            Arc::new(MockLabelDetector::new()),
            index,
            embedder_returning(768),
        );

        let err = service
            .lookup_by_similarity(&labels(&["Shirt"]))
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::Store(_)));
    }

    #[tokio::test]
    async fn test_similarity_without_collaborators() {
        let service = service(
            MockItemRepository::new(),
            Arc::new(MockLabelDetector::new()),
            LookupStrategy::SimilaritySearch,
        );

        assert!(matches!(
            service.check_collaborators(),
            Err(OutfitError::Config(_))
        ));

        let err = service
            .lookup_by_similarity(&labels(&["Shirt"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_passthrough_returns_labels_unchanged() {
        let service = service(
            MockItemRepository::new(),
            detector_returning(&["Jeans", "Denim", "Pocket"]),
            LookupStrategy::RawLabelPassthrough,
        );

        let result = service
            .recommend(RecommendOutfitRequest::new("uploads/jeans.jpg"))
            .await
            .unwrap();
        assert_eq!(
            result,
            Recommendation::Labels(labels(&["Jeans", "Denim", "Pocket"]))
        );
    }

    #[tokio::test]
    async fn test_passthrough_with_no_labels_is_not_found() {
        let service = service(
            MockItemRepository::new(),
            detector_returning(&[]),
            LookupStrategy::RawLabelPassthrough,
        );

        let err = service
            .recommend(RecommendOutfitRequest::new("uploads/blank.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, OutfitError::NotFound(_)));
    }
}
