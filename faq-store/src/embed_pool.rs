//! Batched embedding executor.
//!
//! Texts are embedded in fixed-size batches. Calls inside one batch run
//! concurrently; batches run one after another with a short pause so the
//! provider's rate limit is not hit.

use std::time::Duration;

use futures::future::try_join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::embed::EmbeddingsProvider;
use crate::errors::FaqError;

/// Number of texts embedded concurrently.
pub const EMBED_BATCH_SIZE: usize = 10;
/// Pause between two consecutive batches.
pub const INTER_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Embeds `texts` and returns one vector per text, in input order.
///
/// # Errors
/// The first provider failure aborts the whole call.
/// [`FaqError::Consistency`] if the vector count differs from the text count.
pub async fn embed_batch(
    texts: &[String],
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<Vec<f32>>, FaqError> {
    if texts.is_empty() {
        debug!("embed_pool::embed_batch: nothing to embed");
        return Ok(Vec::new());
    }

    let batches = texts.len().div_ceil(EMBED_BATCH_SIZE);
    info!(
        "embed_pool::embed_batch: total={} batches={} batch_size={}",
        texts.len(),
        batches,
        EMBED_BATCH_SIZE
    );

    let pb = progress_bar(batches as u64);
    let mut out: Vec<Vec<f32>> = Vec::with_capacity(texts.len());

    for (i, chunk) in texts.chunks(EMBED_BATCH_SIZE).enumerate() {
        if i > 0 {
            tokio::time::sleep(INTER_BATCH_DELAY).await;
        }

        let vectors = try_join_all(chunk.iter().map(|t| provider.embed(t))).await?;
        debug!("embed_pool::embed_batch: batch {} -> {} vectors", i + 1, vectors.len());
        out.extend(vectors);
        pb.inc(1);
    }

    pb.finish_and_clear();

    if out.len() != texts.len() {
        return Err(FaqError::Consistency {
            records: texts.len(),
            vectors: out.len(),
        });
    }
    Ok(out)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] embedding [{wide_bar:.cyan/blue}] {pos}/{len}",
    ) {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Instant;

    /// Encodes the text length into a 2-dim vector and records call order.
    struct LenProvider {
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
        started: Mutex<Vec<Instant>>,
    }

    impl LenProvider {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on,
                started: Mutex::new(Vec::new()),
            }
        }
    }

    impl EmbeddingsProvider for LenProvider {
        fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, FaqError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.started.lock().unwrap().push(Instant::now());
                if self.fail_on == Some(text) {
                    return Err(FaqError::Embedding(format!("refused '{text}'")));
                }
                Ok(vec![text.len() as f32, 1.0])
            })
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| "x".repeat(i + 1)).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn preserves_input_order_across_batches() {
        let p = LenProvider::new(None);
        let input = texts(23);
        let out = embed_batch(&input, &p).await.unwrap();

        assert_eq!(out.len(), 23);
        for (i, v) in out.iter().enumerate() {
            assert_eq!(v[0], (i + 1) as f32);
        }
        assert_eq!(p.calls.load(Ordering::SeqCst), 23);
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_between_batches_only() {
        let p = LenProvider::new(None);
        let t0 = Instant::now();
        embed_batch(&texts(21), &p).await.unwrap();

        // Three batches: two pauses, none after the last one.
        let elapsed = t0.elapsed();
        assert!(elapsed >= INTER_BATCH_DELAY * 2);
        assert!(elapsed < INTER_BATCH_DELAY * 3);

        let started = p.started.lock().unwrap();
        assert_eq!(started[9], started[0]);
        assert!(started[10] - started[0] >= INTER_BATCH_DELAY);
        assert!(started[20] - started[10] >= INTER_BATCH_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failure_fails_the_whole_call() {
        let p = LenProvider::new(Some("xxxxxxxxxxxx"));
        let err = embed_batch(&texts(15), &p).await.unwrap_err();
        assert!(matches!(err, FaqError::Embedding(_)));
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let p = LenProvider::new(None);
        assert!(embed_batch(&[], &p).await.unwrap().is_empty());
        assert_eq!(p.calls.load(Ordering::SeqCst), 0);
    }
}
