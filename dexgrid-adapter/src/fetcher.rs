use dexgrid::{FetchError, Page, PageRequest, Pokemon};

/// Transport seam for page requests emitted by the controller.
///
/// Real hosts implement this over their HTTP client; the shipped
/// [`FixtureFetcher`] serves an in-memory dataset for tests and demos.
pub trait PageFetcher {
    fn fetch_page(&mut self, request: &PageRequest) -> Result<Page, FetchError>;
}

/// In-memory dataset served with the search endpoint's semantics: case
/// insensitive substring filter, cursor/limit slicing, total count per query.
#[derive(Clone, Debug, Default)]
pub struct FixtureFetcher {
    dataset: Vec<Pokemon>,
    fail_next: Option<FetchError>,
    calls: usize,
}

impl FixtureFetcher {
    pub fn new(dataset: Vec<Pokemon>) -> Self {
        Self {
            dataset,
            fail_next: None,
            calls: 0,
        }
    }

    /// A numbered dataset, `mon-001` through `mon-<count>`.
    pub fn numbered(count: usize) -> Self {
        let dataset = (1..=count as u32)
            .map(|id| Pokemon {
                id,
                name: format!("mon-{id:03}"),
                types: vec!["normal".to_owned()],
                base_stats: Default::default(),
                height: 7,
                weight: 69,
                sprites: Default::default(),
            })
            .collect();
        Self::new(dataset)
    }

    /// Makes the next fetch fail with `error`, once.
    pub fn fail_next(&mut self, error: FetchError) {
        self.fail_next = Some(error);
    }

    /// Transport calls performed so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl PageFetcher for FixtureFetcher {
    fn fetch_page(&mut self, request: &PageRequest) -> Result<Page, FetchError> {
        self.calls += 1;
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }

        let needle = request.query.to_lowercase();
        let matches: Vec<&Pokemon> = self
            .dataset
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect();

        let total_count = matches.len();
        let start = (request.cursor as usize).min(total_count);
        let end = (start + request.limit).min(total_count);
        Ok(Page {
            results: matches[start..end].iter().map(|p| (*p).clone()).collect(),
            next_cursor: (end < total_count).then_some(end as u64),
            total_count,
        })
    }
}
