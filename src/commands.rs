//! Command handlers behind the CLI subcommands.
//!
//! [`App`] wires the resolver to the persisted history and network
//! selection. Handlers return values or write text; opening the browser and
//! touching the clipboard stay in `main`.
//!
//! # Example
//!
//! ```ignore
//! let mut app = App::new(resolver, store, Explorer::Solscan)?;
//! let outcome = app.search("250000000", None).await?;
//! println!("{}", outcome.markdown);
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::client::{ChainRpc, MetadataSource};
use crate::domain::{
    Explorer, GENERIC_FAILURE_MESSAGE, HistoryEntry, LookupError, Network, SearchKind,
    SearchResult,
};
use crate::lookup::{Resolver, explorer_url, format_result};
use crate::state::{
    HistoryStore, KeyValueStore, NetworkSelector, SearchSession, SearchTicket, StorageError,
};

// ============================================================================
// Outcomes
// ============================================================================

/// A successful search, ready to display.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The query as searched, trimmed.
    pub query: String,
    pub result: SearchResult,
    /// Rendered markdown.
    pub markdown: String,
    /// Explorer link for the result.
    pub url: String,
}

/// A line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveLine {
    Search(String),
    SwitchNetwork(Network),
    Quit,
    Invalid(String),
    Blank,
}

impl InteractiveLine {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Blank;
        }
        if line == ":quit" || line == ":q" {
            return Self::Quit;
        }
        if let Some(rest) = line.strip_prefix(":net") {
            return match rest.trim().parse() {
                Ok(network) => Self::SwitchNetwork(network),
                Err(e) => Self::Invalid(e),
            };
        }
        if line.starts_with(':') {
            return Self::Invalid(format!("unknown command '{line}'"));
        }
        Self::Search(line.to_string())
    }
}

type Completion = (SearchTicket, String, Network, Result<SearchResult, LookupError>);

// ============================================================================
// App
// ============================================================================

/// The lookup core plus the state that survives between invocations.
#[derive(Debug)]
pub struct App<C, M, S> {
    resolver: Arc<Resolver<C, M>>,
    history: HistoryStore<Arc<S>>,
    network: NetworkSelector<Arc<S>>,
    explorer: Explorer,
    session: SearchSession,
}

impl<C, M, S> App<C, M, S>
where
    C: ChainRpc + 'static,
    M: MetadataSource + 'static,
    S: KeyValueStore + 'static,
{
    /// # Errors
    ///
    /// Returns an error if the stored network selection cannot be read.
    pub fn new(
        resolver: Resolver<C, M>,
        store: Arc<S>,
        explorer: Explorer,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            resolver: Arc::new(resolver),
            history: HistoryStore::new(Arc::clone(&store)),
            network: NetworkSelector::load(store)?,
            explorer,
            session: SearchSession::new(),
        })
    }

    #[must_use]
    pub const fn network(&self) -> Network {
        self.network.current()
    }

    /// Switch the persisted network. Returns `true` if it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection cannot be persisted.
    pub fn set_network(&mut self, network: Network) -> Result<bool, StorageError> {
        self.network.select(network)
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Classify and resolve `query` on `network` (or the current network).
    ///
    /// On success the query is recorded in history and `network` becomes
    /// the persisted selection.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error; nothing is recorded in that case.
    pub async fn search(
        &mut self,
        query: &str,
        network: Option<Network>,
    ) -> Result<SearchOutcome, LookupError> {
        let network = network.unwrap_or(self.network());
        let result = self.resolver.resolve(query, network).await?;
        Ok(self.complete(query.trim(), result))
    }

    /// Resolve `query` as `kind`, skipping classification.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error; nothing is recorded in that case.
    pub async fn search_as(
        &mut self,
        query: &str,
        kind: SearchKind,
        network: Option<Network>,
    ) -> Result<SearchOutcome, LookupError> {
        let network = network.unwrap_or(self.network());
        let result = self.resolver.resolve_as(query, kind, network).await?;
        Ok(self.complete(query.trim(), result))
    }

    fn complete(&mut self, query: &str, result: SearchResult) -> SearchOutcome {
        if let Err(e) = self.history.record(query, result.kind()) {
            tracing::warn!("failed to record search history: {e}");
        }
        if let Err(e) = self.network.select(result.network) {
            tracing::warn!("failed to persist network selection: {e}");
        }

        SearchOutcome {
            query: query.to_string(),
            markdown: format_result(&result),
            url: explorer_url(result.kind(), query, result.network, self.explorer),
            result,
        }
    }

    pub async fn classify(&self, query: &str, network: Option<Network>) -> SearchKind {
        self.resolver
            .classify(query, network.unwrap_or(self.network()))
            .await
    }

    /// Explorer link for `query`, classifying it first when `kind` is not
    /// given.
    pub async fn url(
        &self,
        query: &str,
        kind: Option<SearchKind>,
        network: Option<Network>,
    ) -> String {
        let network = network.unwrap_or(self.network());
        let kind = match kind {
            Some(kind) => kind,
            None => self.resolver.classify(query, network).await,
        };
        explorer_url(kind, query, network, self.explorer)
    }

    // ========================================================================
    // History
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        self.history.list()
    }

    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    pub fn history_entry(&self, query: &str) -> Result<Option<HistoryEntry>, StorageError> {
        self.history.get(query.trim())
    }

    /// # Errors
    ///
    /// Returns an error if the history cannot be read or written.
    pub fn remove_history(&self, query: &str) -> Result<bool, StorageError> {
        self.history.remove(query.trim())
    }

    /// # Errors
    ///
    /// Returns an error if the history cannot be written.
    pub fn clear_history(&self) -> Result<(), StorageError> {
        self.history.clear()
    }

    /// Explorer link for a remembered query, using its stored kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    pub fn history_url(
        &self,
        query: &str,
        network: Option<Network>,
    ) -> Result<Option<String>, StorageError> {
        let network = network.unwrap_or(self.network());
        Ok(self
            .history_entry(query)?
            .map(|entry| explorer_url(entry.kind, &entry.query, network, self.explorer)))
    }

    // ========================================================================
    // Interactive
    // ========================================================================

    /// Read queries from `input` line by line and write results to `out`.
    ///
    /// Every line starts a new search; only the newest search's result is
    /// printed and older completions are dropped. Returns when the input
    /// ends and no search is in flight, or on `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn interactive<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
        let mut lines = input.lines();
        let mut input_open = true;
        let mut pending = 0usize;

        writeln!(
            out,
            "Network: {}. Type a query, ':net <network>' or ':quit'.",
            self.network().display_name()
        )?;
        out.flush()?;

        loop {
            if !input_open && pending == 0 {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => {
                    let Some(line) = line? else {
                        input_open = false;
                        continue;
                    };

                    match InteractiveLine::parse(&line) {
                        InteractiveLine::Blank => {}
                        InteractiveLine::Quit => break,
                        InteractiveLine::Invalid(message) => writeln!(out, "{message}")?,
                        InteractiveLine::SwitchNetwork(network) => {
                            self.session.invalidate();
                            if let Err(e) = self.set_network(network) {
                                tracing::warn!("failed to persist network selection: {e}");
                            }
                            writeln!(out, "Network: {}", network.display_name())?;
                        }
                        InteractiveLine::Search(query) => {
                            let ticket = self.session.begin();
                            let network = self.network();
                            let resolver = Arc::clone(&self.resolver);
                            let tx = tx.clone();
                            pending += 1;
                            tracing::debug!(
                                generation = ticket.generation(),
                                %query,
                                "search started"
                            );

                            tokio::spawn(async move {
                                let result = resolver.resolve(&query, network).await;
                                let _ = tx.send((ticket, query, network, result));
                            });
                        }
                    }
                    out.flush()?;
                }
                Some((ticket, query, network, result)) = rx.recv(), if pending > 0 => {
                    pending -= 1;
                    if !self.session.is_current(&ticket) {
                        tracing::debug!(
                            generation = ticket.generation(),
                            %query,
                            "discarding stale result"
                        );
                        continue;
                    }

                    match result {
                        Ok(result) => {
                            let outcome = self.complete(&query, result);
                            writeln!(
                                out,
                                "{}\n\n{}\n{}\n",
                                outcome.result.subtitle(),
                                outcome.markdown,
                                outcome.url
                            )?;
                        }
                        Err(e) => {
                            tracing::debug!(%query, %network, "search failed: {e}");
                            writeln!(out, "{GENERIC_FAILURE_MESSAGE}")?;
                        }
                    }
                    out.flush()?;
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// One line of `history list` output.
#[must_use]
pub fn format_history_entry(entry: &HistoryEntry) -> String {
    format!(
        "{:<11} {}  ({})",
        entry.kind.display_name(),
        entry.query,
        entry.formatted_time()
    )
}

/// Ask a yes/no question; anything but `y`/`yes` is a no.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

// ============================================================================
// Tests
// ============================================================================
