//! Concurrent population of the statement store.

use crate::store::{StatementStore, TickerStatements};
use futures_util::future::join_all;
use metrics_core::{ProfileLookup, StatementKind, StatementSource, Ticker};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Fetches the profile and every statement kind for one ticker concurrently.
pub async fn fetch_ticker(source: &dyn StatementSource, ticker: &Ticker) -> TickerStatements {
    let statements = StatementKind::ALL.iter().map(|kind| async move {
        (*kind, source.fetch_statement(ticker, *kind).await)
    });

    let (profile, fetched) = tokio::join!(source.fetch_profile(ticker), join_all(statements));

    let mut data = TickerStatements::new(profile);
    for (kind, series) in fetched {
        if let Some(series) = series {
            data.insert_statement(kind, series);
        }
    }
    data
}

/// Fills a store with one snapshot per ticker, at most `concurrency` tickers
/// in flight. A ticker task that fails outright leaves an unavailable,
/// statement-less snapshot and does not affect the others.
pub async fn populate_store(
    source: Arc<dyn StatementSource>,
    tickers: &[Ticker],
    concurrency: usize,
) -> StatementStore {
    let total = tickers.len();
    let completed = Arc::new(AtomicUsize::new(0));
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let mut handles = Vec::with_capacity(total);

    for ticker in tickers {
        let source = Arc::clone(&source);
        let completed = Arc::clone(&completed);
        let semaphore = Arc::clone(&semaphore);
        let symbol = ticker.clone();

        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire().await;

            let data = fetch_ticker(source.as_ref(), &symbol).await;

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            match data.profile() {
                ProfileLookup::NotFound => {
                    tracing::info!("[{}/{}] {} => not found", done, total, symbol);
                }
                _ => {
                    tracing::info!("[{}/{}] {} => {} statements", done, total, symbol, data.statement_count());
                }
            }
            data
        });

        handles.push((ticker.clone(), handle));
    }

    let mut store = StatementStore::new();
    for (ticker, handle) in handles {
        let data = match handle.await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("{} fetch task failed: {}", ticker, e);
                TickerStatements::new(ProfileLookup::Unavailable)
            }
        };
        store.insert(ticker, data);
    }

    store
}
