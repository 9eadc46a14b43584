// End-to-end tests for the project feed pipeline

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use folio::config::ProfileConfig;
    use folio::engine::contributions::ContributionGraph;
    use folio::engine::selector::{fallback_projects, ProjectSource};
    use folio::engine::theme::Theme;
    use folio::feed::types::GithubRepo;
    use folio::feed::{FetchError, RepoFeed};
    use folio::pipeline;
    use folio::tui::state::AppState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::watch;

    enum Stub {
        Repos(Vec<GithubRepo>),
        Fail,
    }

    struct StubFeed {
        reply: Stub,
        calls: AtomicUsize,
    }

    impl StubFeed {
        fn new(reply: Stub) -> Self {
            Self { reply, calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl RepoFeed for StubFeed {
        async fn fetch_repos(&self) -> Result<Vec<GithubRepo>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Stub::Repos(repos) => Ok(repos.clone()),
                Stub::Fail => Err(anyhow::anyhow!("GitHub repos request failed").into()),
            }
        }
    }

    fn repos(n: usize) -> Vec<GithubRepo> {
        (0..n)
            .map(|i| GithubRepo {
                name: format!("project-{}", i),
                description: Some(format!("Project number {}", i)),
                language: Some(if i % 2 == 0 { "Rust" } else { "C++" }.to_string()),
                stargazers_count: 100 + i as u64,
                forks_count: 10 + i as u64,
                html_url: format!("https://github.com/Niru-26016/project-{}", i),
            })
            .collect()
    }

    fn state_channel() -> (watch::Sender<AppState>, watch::Receiver<AppState>) {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let graph = ContributionGraph::generate(today, &mut StdRng::seed_from_u64(11));
        watch::channel(AppState::new(ProfileConfig::default(), Theme::Dark, graph))
    }

    #[tokio::test]
    async fn test_six_remote_records_render_six_cards_in_order() {
        let feed = StubFeed::new(Stub::Repos(repos(6)));
        let (tx, rx) = state_channel();

        let selection = pipeline::run(&feed, &tx).await;
        assert_eq!(selection.source, ProjectSource::Remote);
        assert_eq!(feed.calls.load(Ordering::SeqCst), 1);

        let state = rx.borrow();
        let cards = state.projects.cards();
        assert_eq!(cards.len(), 6);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.name, format!("project-{}", i));
            assert_eq!(card.url, format!("https://github.com/Niru-26016/project-{}", i));
            assert_eq!(card.stars, 100 + i as u64);
            assert_eq!(card.forks, 10 + i as u64);
            assert_eq!(card.reveal_delay, Duration::from_millis(100 * i as u64));
        }
        assert_eq!(cards[1].lang_key, "c");
        assert_eq!(state.project_source, Some(ProjectSource::Remote));
    }

    #[tokio::test]
    async fn test_failed_fetch_renders_fallback() {
        let feed = StubFeed::new(Stub::Fail);
        let (tx, rx) = state_channel();

        pipeline::run(&feed, &tx).await;

        let state = rx.borrow();
        let names: Vec<_> = state.projects.cards().iter().map(|c| c.name.clone()).collect();
        let expected: Vec<_> = fallback_projects().into_iter().map(|p| p.name).collect();
        assert_eq!(names, expected);
        assert_eq!(state.project_source, Some(ProjectSource::Fallback));
    }

    #[tokio::test]
    async fn test_sparse_account_renders_fallback() {
        for n in [0, 3] {
            let feed = StubFeed::new(Stub::Repos(repos(n)));
            let selection = pipeline::load_projects(&feed).await;
            assert_eq!(selection.source, ProjectSource::Fallback, "{} records", n);
            assert_eq!(selection.projects, fallback_projects());
        }
    }

    #[tokio::test]
    async fn test_threshold_boundary_uses_remote() {
        let feed = StubFeed::new(Stub::Repos(repos(4)));
        let selection = pipeline::load_projects(&feed).await;
        assert_eq!(selection.source, ProjectSource::Remote);
        assert_eq!(selection.projects.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_fields_render_placeholders() {
        let mut raw = repos(5);
        raw[3].description = None;
        raw[3].language = None;
        let feed = StubFeed::new(Stub::Repos(raw));
        let (tx, rx) = state_channel();

        pipeline::run(&feed, &tx).await;

        let state = rx.borrow();
        let card = &state.projects.cards()[3];
        assert_eq!(card.description, "No description provided.");
        assert_eq!(card.language, "Code");
        assert_eq!(card.lang_key, "code");
    }

    #[tokio::test]
    async fn test_second_render_replaces_first() {
        let (tx, rx) = state_channel();
        pipeline::run(&StubFeed::new(Stub::Repos(repos(6))), &tx).await;
        pipeline::run(&StubFeed::new(Stub::Fail), &tx).await;

        let state = rx.borrow();
        assert_eq!(state.projects.cards().len(), 6);
        assert!(state.projects.cards().iter().all(|c| !c.name.starts_with("project-")));
        assert_eq!(state.projects.generation(), 2);
    }
}
