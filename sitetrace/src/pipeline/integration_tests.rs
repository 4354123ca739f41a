//! End-to-end tests for batch resolution.

#[cfg(test)]
mod tests {
    use crate::config::ResolverConfig;
    use crate::core::{InputRecord, RawInputRecord, SourceType};
    use crate::errors::TransportError;
    use crate::pipeline::{RecordStatus, Resolver};
    use crate::sinks::{CollectingOutputSink, FileOutputSink, OutputSink};
    use crate::testing::{
        app_store_ios_page, investment_db_page, professional_network_page, review_site_page,
        search_results_page, ScriptedFetcher,
    };
    use crate::transport::Fetcher;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const ACME_SERP: &str = "https://www.google.com/search?q=acme+linkedin";
    const ACME_FIRST: &str = "https://www.linkedin.com/company/acme-corp/";
    const ACME_SECOND: &str = "https://www.linkedin.com/company/acme";

    fn resolver_with(fetcher: Arc<dyn Fetcher>, sink: Arc<dyn OutputSink>) -> Resolver {
        Resolver::new(ResolverConfig::default(), fetcher, sink).unwrap()
    }

    #[tokio::test]
    async fn test_first_result_times_out_second_matches() {
        let fetcher = ScriptedFetcher::new()
            .with_page(ACME_SERP, search_results_page(&[ACME_FIRST, ACME_SECOND]))
            .with_error(ACME_FIRST, TransportError::Timeout { timeout_seconds: 15.0 })
            .with_page(ACME_SECOND, professional_network_page("https://example.com"));
        let sink = Arc::new(CollectingOutputSink::new());
        let resolver = resolver_with(Arc::new(fetcher), sink.clone());

        let record = InputRecord::new("100", "example.com", SourceType::ProfessionalNetwork, "acme linkedin");
        let outcome = resolver.resolve_record(&record).await;

        assert_eq!(outcome.status, RecordStatus::Completed);
        assert_eq!(outcome.results_seen, 2);

        let rows = sink.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].domain_match);
        assert_eq!(rows[0].result_url, ACME_SECOND);
        assert_eq!(rows[0].stable_identifier, "acme");

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_kind, "FetchFailed");
        assert_eq!(errors[0].result_url.as_deref(), Some(ACME_FIRST));
        assert!(errors[0]
            .to_line()
            .starts_with("100, example.com, linkedin, acme linkedin, https://www.linkedin.com/company/acme-corp/: "));
    }

    #[tokio::test]
    async fn test_search_failure_isolated_from_siblings() {
        let pitchbook_serp = "https://www.google.com/search?q=globex+pitchbook";
        let profile = "https://pitchbook.com/profiles/company/51234-56";
        let fetcher = ScriptedFetcher::new()
            .with_error(
                "https://www.google.com/search?q=initech+glassdoor",
                TransportError::Request("connection reset".to_string()),
            )
            .with_page(pitchbook_serp, search_results_page(&[profile]))
            .with_page(profile, investment_db_page("http://www.globex.com"));
        let sink = Arc::new(CollectingOutputSink::new());
        let resolver = resolver_with(Arc::new(fetcher), sink.clone());

        let summary = resolver
            .run_batch(vec![
                RawInputRecord::new("1", "initech.com", "glassdoor", "initech glassdoor"),
                RawInputRecord::new("2", "globex.com", "pitchbook", "globex pitchbook"),
            ])
            .await;

        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.completed_records, 1);
        assert_eq!(summary.rows_emitted, 1);
        assert_eq!(summary.matches, 1);

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].company_id, "1");
        assert_eq!(errors[0].error_kind, "SearchFetchFailed");

        let rows = sink.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company_id, "2");
        assert_eq!(rows[0].stable_identifier, "51234-56");

        let failed = summary.outcomes.iter().find(|o| o.company_id == "1").unwrap();
        assert_eq!(failed.status, RecordStatus::SearchFailed);
        assert_eq!(failed.rows_emitted, 0);
    }

    #[tokio::test]
    async fn test_unknown_source_type_is_reported() {
        let fetcher = Arc::new(ScriptedFetcher::new());
        let sink = Arc::new(CollectingOutputSink::new());
        let resolver = resolver_with(fetcher.clone(), sink.clone());

        let summary = resolver
            .run_batch(vec![RawInputRecord::new("5", "hooli.com", "crunchbase", "hooli crunchbase")])
            .await;

        assert_eq!(summary.failed_records, 1);
        assert_eq!(summary.outcomes[0].status, RecordStatus::Rejected);
        assert_eq!(fetcher.call_count(), 0);

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_kind, "UnknownSourceType");
        assert_eq!(errors[0].source, "crunchbase");
    }

    #[tokio::test]
    async fn test_empty_search_results_complete_without_rows() {
        let fetcher = ScriptedFetcher::new().with_page(
            "https://www.google.com/search?q=nobody+appstore",
            "<html><body><p>Your search did not match any documents.</p></body></html>",
        );
        let sink = Arc::new(CollectingOutputSink::new());
        let resolver = resolver_with(Arc::new(fetcher), sink.clone());

        let record = InputRecord::new("8", "nobody.io", SourceType::AppStoreIos, "nobody appstore");
        let outcome = resolver.resolve_record(&record).await;

        assert_eq!(outcome.status, RecordStatus::Completed);
        assert_eq!(outcome.results_seen, 0);
        assert!(sink.rows().is_empty());
        assert!(sink.errors().is_empty());
        assert_eq!(sink.progress().len(), 2);
    }

    #[tokio::test]
    async fn test_per_result_failures_do_not_stop_siblings() {
        let serp = "https://www.google.com/search?q=umbrella+glassdoor";
        let no_id = "https://www.glassdoor.com/Reviews/index.htm";
        let gated = "https://www.glassdoor.com/Overview/Working-at-Umbrella-EI_IE111.11,19.htm";
        let good = "https://www.glassdoor.com/Overview/Working-at-Umbrella-EI_IE222.11,19.htm";
        let fetcher = ScriptedFetcher::new()
            .with_page(serp, search_results_page(&[no_id, gated, good]))
            .with_page(no_id, review_site_page("https://umbrella.com"))
            .with_page(gated, "<html><body>Please verify you are human</body></html>")
            .with_page(good, review_site_page("https://www.umbrella.co.uk"));
        let sink = Arc::new(CollectingOutputSink::new());
        let resolver = resolver_with(Arc::new(fetcher), sink.clone());

        let record = InputRecord::new("3", "umbrella.co.uk", SourceType::ReviewSite, "umbrella glassdoor");
        let outcome = resolver.resolve_record(&record).await;

        let kinds: Vec<String> = sink.errors().into_iter().map(|e| e.error_kind).collect();
        assert_eq!(kinds, vec!["IdentifierExtractionFailed", "ContentExtractionFailed"]);

        let rows = sink.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stable_identifier, "222");
        assert_eq!(rows[0].candidate_domain, "umbrella.co.uk");
        assert!(rows[0].domain_match);
        assert_eq!(outcome.failures.len(), 2);
    }

    #[derive(Debug, Default)]
    struct PanickingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Fetcher for PanickingFetcher {
        async fn fetch(
            &self,
            url: &str,
            _profile: crate::transport::ProxyProfile,
            _timeout: Option<f64>,
        ) -> Result<crate::transport::FetchResult, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if url.contains("boom") {
                panic!("fetcher exploded");
            }
            Ok(crate::transport::FetchResult::ok(url, "<html></html>"))
        }
    }

    #[tokio::test]
    async fn test_panicking_record_is_contained() {
        let fetcher = Arc::new(PanickingFetcher::default());
        let sink = Arc::new(CollectingOutputSink::new());
        let resolver = resolver_with(fetcher.clone(), sink.clone());

        let summary = resolver
            .run_batch(vec![
                RawInputRecord::new("1", "boom.com", "linkedin", "boom linkedin"),
                RawInputRecord::new("2", "calm.com", "linkedin", "calm linkedin"),
            ])
            .await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
        assert_eq!(summary.completed_records, 1);

        let crashed = summary.outcomes.iter().find(|o| o.company_id == "1").unwrap();
        assert_eq!(crashed.status, RecordStatus::TaskFailed);

        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_kind, "TaskFailed");
        assert_eq!(errors[0].company_id, "1");
    }

    #[tokio::test]
    async fn test_batch_writes_output_files() {
        let serp = "https://www.google.com/search?q=example+appstore";
        let listing = "https://apps.apple.com/us/app/example/id123456789";
        let fetcher = ScriptedFetcher::new()
            .with_page(serp, search_results_page(&[listing]))
            .with_page(
                listing,
                app_store_ios_page(&[
                    ("Developer Website", "https://example.com/"),
                    ("App Support", "https://help.example.com/"),
                    ("Privacy Policy", "https://legal.vendor.net/privacy"),
                ]),
            );
        let dir = tempfile::tempdir().unwrap();
        let sink = Arc::new(FileOutputSink::create(dir.path(), "7").unwrap());
        let resolver = resolver_with(Arc::new(fetcher), sink.clone());

        let summary = resolver
            .run_batch(vec![RawInputRecord::new("9", "example.com", "appstore", "example appstore")])
            .await;
        assert_eq!(summary.rows_emitted, 3);
        assert_eq!(summary.matches, 2);

        let result = std::fs::read_to_string(sink.result_path(SourceType::AppStoreIos)).unwrap();
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(
            lines[0],
            "9, appstore, example.com, \"https://apps.apple.com/us/app/example/id123456789\", 123456789, https://example.com/, example.com, True"
        );
        assert!(lines[2].ends_with("vendor.net, False"));

        let progress = std::fs::read_to_string(sink.progress_path()).unwrap();
        assert!(progress.lines().last().unwrap().starts_with("Total time taken: "));
        assert_eq!(std::fs::read_to_string(sink.error_path()).unwrap(), "");
    }

    /// Serves every search page with four listings and tracks fetches in flight.
    ///
    /// Listing `cN` answers after `(4 - N) * 10ms`, so later results finish first.
    #[derive(Debug, Default)]
    struct CountingFetcher {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl CountingFetcher {
        fn listing(company: &str, n: usize) -> String {
            format!("https://www.linkedin.com/company/{company}-c{n}")
        }
    }

    #[async_trait]
    impl Fetcher for CountingFetcher {
        async fn fetch(
            &self,
            url: &str,
            _profile: crate::transport::ProxyProfile,
            _timeout: Option<f64>,
        ) -> Result<crate::transport::FetchResult, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let (delay, body) = if let Some(query) = url.strip_prefix("https://www.google.com/search?q=") {
                let company = query.trim_end_matches("+linkedin");
                let listings: Vec<String> = (0..4).map(|n| Self::listing(company, n)).collect();
                let refs: Vec<&str> = listings.iter().map(String::as_str).collect();
                (20, search_results_page(&refs))
            } else {
                let n: u64 = url
                    .rsplit("-c")
                    .next()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(0);
                ((4 - n) * 10, professional_network_page("https://example.com"))
            };
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(crate::transport::FetchResult::ok(url, body))
        }
    }

    fn counting_batch(records: usize) -> Vec<RawInputRecord> {
        (0..records)
            .map(|i| {
                RawInputRecord::new(
                    i.to_string(),
                    "example.com",
                    "linkedin",
                    format!("company{i} linkedin"),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_concurrent_records_share_fetch_limit() {
        let fetcher = Arc::new(CountingFetcher::default());
        let sink = Arc::new(CollectingOutputSink::new());
        let config = ResolverConfig::default()
            .with_max_concurrent_records(8)
            .with_max_concurrent_results(4)
            .with_max_concurrent_fetches(3);
        let resolver = Resolver::new(config, fetcher.clone(), sink.clone()).unwrap();

        let summary = resolver.run_batch(counting_batch(8)).await;

        assert_eq!(summary.completed_records, 8);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 8 * 5);
        assert_eq!(fetcher.peak.load(Ordering::SeqCst), 3);
        assert_eq!(fetcher.in_flight.load(Ordering::SeqCst), 0);
        assert_eq!(summary.rows_emitted, 32);
        assert!((summary.success_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_single_fetch_permit_serializes_fetches() {
        let fetcher = Arc::new(CountingFetcher::default());
        let sink = Arc::new(CollectingOutputSink::new());
        let config = ResolverConfig::default()
            .with_max_concurrent_records(4)
            .with_max_concurrent_results(4)
            .with_max_concurrent_fetches(1);
        let resolver = Resolver::new(config, fetcher.clone(), sink.clone()).unwrap();

        let summary = resolver.run_batch(counting_batch(2)).await;

        assert_eq!(summary.completed_records, 2);
        assert_eq!(fetcher.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_results_keep_search_order() {
        let fetcher = Arc::new(CountingFetcher::default());
        let sink = Arc::new(CollectingOutputSink::new());
        let config = ResolverConfig::default()
            .with_max_concurrent_records(8)
            .with_max_concurrent_results(4)
            .with_max_concurrent_fetches(8);
        let resolver = Resolver::new(config, fetcher.clone(), sink.clone()).unwrap();

        resolver.run_batch(counting_batch(3)).await;

        assert!(fetcher.peak.load(Ordering::SeqCst) > 1);
        for company_id in ["0", "1", "2"] {
            let order: Vec<String> = sink
                .rows()
                .into_iter()
                .filter(|row| row.company_id == company_id)
                .map(|row| row.stable_identifier)
                .collect();
            let expected: Vec<String> = (0..4)
                .map(|n| format!("company{company_id}-c{n}"))
                .collect();
            assert_eq!(order, expected);
        }
    }
}
