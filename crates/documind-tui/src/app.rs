//! Application state and key handling for the search UI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Runtime;

use documind_core::{CorpusStats, Embedder, SearchConfig, SearchResults};
use documind_index::Retriever;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// UI state: the query line, the result-count setting, and the last
/// search outcome. The retriever is loaded once and reused for every
/// query; search failures land in `error` and render in the UI instead
/// of terminating it.
pub struct App<E> {
    retriever: Retriever<E>,
    runtime: Runtime,
    pub query: String,
    pub top_k: usize,
    pub max_top_k: usize,
    pub results: Option<SearchResults>,
    pub error: Option<String>,
    pub selected: usize,
    pub show_help: bool,
    pub stats: CorpusStats,
}

impl<E> App<E>
where
    E: Embedder,
{
    pub fn new(retriever: Retriever<E>, runtime: Runtime, search: &SearchConfig) -> Self {
        let stats = retriever.stats();
        let max_top_k = search.max_top_k.max(1);
        Self {
            retriever,
            runtime,
            query: String::new(),
            top_k: search.default_top_k.clamp(1, max_top_k),
            max_top_k,
            results: None,
            error: None,
            selected: 0,
            show_help: false,
            stats,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if self.show_help {
            // Any key dismisses the help overlay.
            self.show_help = false;
            return Control::Continue;
        }

        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit;
            }
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Enter => self.run_search(),
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::PageUp => self.top_k = (self.top_k + 1).min(self.max_top_k),
            KeyCode::PageDown => self.top_k = self.top_k.saturating_sub(1).max(1),
            KeyCode::Char(c) => self.query.push(c),
            _ => {}
        }
        Control::Continue
    }

    /// The hit currently highlighted in the result list.
    pub fn selected_hit(&self) -> Option<&documind_core::SearchHit> {
        self.results.as_ref().and_then(|r| r.hits.get(self.selected))
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        let count = self.results.as_ref().map(|r| r.hits.len()).unwrap_or(0);
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    fn run_search(&mut self) {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            self.error = Some("Please enter a search query".to_string());
            return;
        }

        self.error = None;
        match self.runtime.block_on(self.retriever.query(&query, self.top_k)) {
            Ok(results) => {
                self.selected = 0;
                self.results = Some(results);
            }
            Err(err) => {
                self.error = Some(format!("Error during search: {}", err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use documind_core::{Document, DocumentMetadata, SearchConfig};
    use documind_embed::MockEmbedder;
    use documind_store::{Artifacts, EmbeddingMatrix};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mk_app(texts: &[&str]) -> App<MockEmbedder> {
        let runtime = Runtime::new().unwrap();
        let embedder = Arc::new(MockEmbedder::with_dimensions(8, 64));
        let vectors = runtime
            .block_on(embedder.embed_documents(texts))
            .unwrap();
        let matrix = EmbeddingMatrix::from_rows(vectors).unwrap();
        let documents = texts
            .iter()
            .map(|t| Document::new(*t, *t, DocumentMetadata::default()))
            .collect();
        let artifacts = Artifacts::new(documents, matrix).unwrap();
        let retriever = Retriever::new(artifacts, embedder).unwrap();
        App::new(retriever, runtime, &SearchConfig::default())
    }

    #[test]
    fn test_typing_edits_the_query() {
        let mut app = mk_app(&["alpha", "beta"]);
        app.handle_key(key(KeyCode::Char('h')));
        app.handle_key(key(KeyCode::Char('i')));
        assert_eq!(app.query, "hi");
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.query, "h");
    }

    #[test]
    fn test_result_count_is_bounded() {
        let mut app = mk_app(&["alpha", "beta"]);
        for _ in 0..50 {
            app.handle_key(key(KeyCode::PageUp));
        }
        assert_eq!(app.top_k, app.max_top_k);
        for _ in 0..50 {
            app.handle_key(key(KeyCode::PageDown));
        }
        assert_eq!(app.top_k, 1);
    }

    #[test]
    fn test_empty_query_sets_error() {
        let mut app = mk_app(&["alpha"]);
        app.handle_key(key(KeyCode::Enter));
        assert!(app.error.is_some());
        assert!(app.results.is_none());
    }

    #[test]
    fn test_search_populates_results() {
        let mut app = mk_app(&["alpha", "beta", "gamma"]);
        for c in "beta".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        let results = app.results.as_ref().expect("results");
        assert!(results.total > 0);
        assert_eq!(results.hits[0].document.id, "beta");
        assert!(app.error.is_none());
    }

    #[test]
    fn test_selection_stays_within_hits() {
        let mut app = mk_app(&["alpha", "beta"]);
        for c in "alpha".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        let count = app.results.as_ref().unwrap().hits.len();
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.selected, count - 1);
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Up));
        }
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_escape_quits_and_help_swallows_keys() {
        let mut app = mk_app(&["alpha"]);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Control::Quit);

        app.handle_key(key(KeyCode::F(1)));
        assert!(app.show_help);
        // next key only dismisses help
        assert_eq!(app.handle_key(key(KeyCode::Char('x'))), Control::Continue);
        assert!(!app.show_help);
        assert!(app.query.is_empty());
    }
}
