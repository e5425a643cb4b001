use crate::domain::model::{VacancyPage, VacancyQuery};
use crate::domain::ports::VacancySource;
use crate::utils::error::Result;

/// Pull-based cursor over the result pages of one query.
///
/// Every call to [`VacancyPages::next_page`] issues one request. The cursor is
/// finished after the source reports the last page or after the first error;
/// starting over means building a new cursor, which begins at page 0 again.
pub struct VacancyPages<'a> {
    source: &'a dyn VacancySource,
    query: VacancyQuery,
    next: Option<u32>,
    requests: u32,
}

impl<'a> VacancyPages<'a> {
    pub fn new(source: &'a dyn VacancySource, query: VacancyQuery) -> Self {
        Self {
            source,
            query,
            next: Some(0),
            requests: 0,
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<VacancyPage>> {
        let Some(page) = self.next else {
            return Ok(None);
        };

        self.requests += 1;
        let fetched = match self.source.fetch_page(&self.query, page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                self.next = None;
                return Err(e);
            }
        };

        self.next = fetched.info.has_next(page).then_some(page + 1);
        tracing::debug!(
            "{}: page {} of '{}' returned {} vacancies (found {})",
            self.source.name(),
            page,
            self.query.keyword,
            fetched.vacancies.len(),
            fetched.found
        );
        Ok(Some(fetched))
    }

    /// Number of page requests issued so far.
    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PageInfo, SalaryFields, TownId};
    use crate::domain::ports::TownResolver;
    use crate::utils::error::StatsError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves canned pages and records which page numbers were requested.
    /// A scripted error is handed out once, as is.
    struct ScriptedSource {
        pages: Mutex<Vec<Option<Result<VacancyPage>>>>,
        requested: Mutex<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<VacancyPage>>) -> Self {
            Self {
                pages: Mutex::new(pages.into_iter().map(Some).collect()),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TownResolver for ScriptedSource {
        async fn resolve_town(&self, _town: &str) -> Result<TownId> {
            Ok(TownId(1))
        }
    }

    #[async_trait]
    impl VacancySource for ScriptedSource {
        fn name(&self) -> &str {
            "Scripted"
        }

        async fn fetch_page(&self, _query: &VacancyQuery, page: u32) -> Result<VacancyPage> {
            self.requested.lock().unwrap().push(page);
            let mut pages = self.pages.lock().unwrap();
            match pages.get_mut(page as usize) {
                Some(Some(Ok(p))) => Ok(p.clone()),
                Some(slot @ Some(Err(_))) => slot.take().unwrap(),
                Some(None) => panic!("error on page {} was already returned", page),
                None => panic!("page {} requested past the end", page),
            }
        }
    }

    fn page(salaries: &[u64], info: PageInfo) -> Result<VacancyPage> {
        Ok(VacancyPage {
            vacancies: salaries
                .iter()
                .map(|s| SalaryFields::new(Some(*s), None, Some("RUR")))
                .collect(),
            found: 10,
            info,
        })
    }

    fn query() -> VacancyQuery {
        VacancyQuery {
            town: TownId(1),
            period: 30,
            per_page: 100,
            keyword: "Rust".to_string(),
        }
    }

    async fn drain(pages: &mut VacancyPages<'_>) -> Result<Vec<u64>> {
        let mut items = Vec::new();
        while let Some(page) = pages.next_page().await? {
            items.extend(page.vacancies.iter().filter_map(|v| v.from));
        }
        Ok(items)
    }

    #[tokio::test]
    async fn test_total_pages_are_all_requested_in_order() {
        let total = PageInfo::Total { pages: 3 };
        let source = ScriptedSource::new(vec![
            page(&[1, 2], total),
            page(&[3], total),
            page(&[4, 5], total),
        ]);

        let mut pages = VacancyPages::new(&source, query());
        let items = drain(&mut pages).await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(source.requested(), vec![0, 1, 2]);
        assert_eq!(pages.requests(), 3);
    }

    #[tokio::test]
    async fn test_more_flag_stops_after_last_page() {
        let source = ScriptedSource::new(vec![
            page(&[1], PageInfo::More(true)),
            page(&[2], PageInfo::More(true)),
            page(&[3], PageInfo::More(true)),
            page(&[4], PageInfo::More(false)),
        ]);

        let mut pages = VacancyPages::new(&source, query());
        let items = drain(&mut pages).await.unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(source.requested(), vec![0, 1, 2, 3]);
        assert!(pages.is_exhausted());
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(source.requested().len(), 4);
    }

    #[tokio::test]
    async fn test_zero_pages_issues_single_request() {
        let source = ScriptedSource::new(vec![page(&[], PageInfo::Total { pages: 0 })]);

        let mut pages = VacancyPages::new(&source, query());
        assert!(drain(&mut pages).await.unwrap().is_empty());
        assert_eq!(source.requested(), vec![0]);
    }

    #[tokio::test]
    async fn test_error_ends_the_cursor_after_consumed_pages() {
        let source = ScriptedSource::new(vec![
            page(&[1], PageInfo::More(true)),
            Err(StatsError::HttpError {
                status: 429,
                url: "https://api.superjob.ru/2.0/vacancies/?page=1".to_string(),
                body: "rate limit".to_string(),
            }),
            page(&[3], PageInfo::More(false)),
        ]);

        let mut pages = VacancyPages::new(&source, query());
        let first = pages.next_page().await.unwrap().unwrap();
        assert_eq!(first.vacancies.len(), 1);

        let err = pages.next_page().await.unwrap_err();
        match err {
            StatsError::HttpError { status, url, body } => {
                assert_eq!(status, 429);
                assert!(url.ends_with("page=1"));
                assert_eq!(body, "rate limit");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(pages.is_exhausted());
        assert!(pages.next_page().await.unwrap().is_none());
        assert_eq!(source.requested(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_new_cursor_restarts_from_first_page() {
        let source = ScriptedSource::new(vec![
            page(&[1], PageInfo::More(true)),
            page(&[2], PageInfo::More(false)),
        ]);

        let mut first = VacancyPages::new(&source, query());
        drain(&mut first).await.unwrap();
        let mut second = VacancyPages::new(&source, query());
        drain(&mut second).await.unwrap();

        assert_eq!(source.requested(), vec![0, 1, 0, 1]);
    }
}
