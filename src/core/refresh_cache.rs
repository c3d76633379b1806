use crate::domain::model::{ReleaseRecord, Source, SourceCacheEntry};
use crate::domain::ports::{Clock, PageRenderer, SystemClock};
use crate::utils::error::{RefreshError, RenderError};
use chrono::{DateTime, TimeDelta, Utc};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

/// 快取有效時間，超過即視為過期
pub const CACHE_TTL: Duration = Duration::from_secs(30 * 60);

pub type RefreshOutcome = std::result::Result<Arc<Vec<ReleaseRecord>>, RefreshError>;

type PendingRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// `now - fetched_at` 恰好等於 TTL 仍算新鮮
pub fn is_fresh(fetched_at: Option<DateTime<Utc>>, now: DateTime<Utc>, ttl: Duration) -> bool {
    let Some(fetched_at) = fetched_at else {
        return false;
    };
    let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
    now.signed_duration_since(fetched_at) <= ttl
}

#[derive(Default)]
struct SourceSlot {
    entry: RwLock<SourceCacheEntry>,
    in_flight: Mutex<Option<PendingRefresh>>,
}

impl SourceSlot {
    fn read_entry(&self) -> SourceCacheEntry {
        self.entry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<PendingRefresh>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Inner {
    renderer: Arc<dyn PageRenderer>,
    clock: Arc<dyn Clock>,
    windows11: SourceSlot,
    windows10: SourceSlot,
}

impl Inner {
    fn slot(&self, source: Source) -> &SourceSlot {
        match source {
            Source::Windows11 => &self.windows11,
            Source::Windows10 => &self.windows10,
        }
    }

    fn fresh_data(&self, slot: &SourceSlot) -> Option<Arc<Vec<ReleaseRecord>>> {
        let entry = slot.read_entry();
        if is_fresh(entry.fetched_at, self.clock.now(), CACHE_TTL) {
            entry.data
        } else {
            None
        }
    }

    /// 在背景任務中執行：渲染、寫入快取、清除進行中的標記。
    async fn refresh(&self, source: Source) -> RefreshOutcome {
        tracing::info!("Fetching live data for {}...", source.display_name());

        let rendered = AssertUnwindSafe(self.renderer.render(source.url()))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(RenderError::Task("renderer panicked".to_string())));

        let slot = self.slot(source);
        let mut in_flight = slot.lock_in_flight();

        let outcome = match rendered {
            Ok(rows) => {
                let records = Arc::new(ReleaseRecord::from_rows(&rows));
                let fetched_at = self.clock.now();

                // data 與 fetched_at 在同一個寫鎖內一起替換
                *slot.entry.write().unwrap_or_else(PoisonError::into_inner) = SourceCacheEntry {
                    data: Some(Arc::clone(&records)),
                    fetched_at: Some(fetched_at),
                };

                tracing::info!(
                    "📊 Cached {} records for {} ({} raw rows)",
                    records.len(),
                    source.display_name(),
                    rows.len()
                );
                Ok(records)
            }
            Err(e) => Err(RefreshError::new(source, Arc::new(e))),
        };

        *in_flight = None;
        outcome
    }
}

/// 兩個來源的快取控制器。每個來源同時最多只有一個渲染在進行，
/// 其餘過期時到達的呼叫者共用該次渲染的結果。
#[derive(Clone)]
pub struct RefreshCache {
    inner: Arc<Inner>,
}

impl RefreshCache {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self::with_clock(renderer, Arc::new(SystemClock))
    }

    pub fn with_clock(renderer: Arc<dyn PageRenderer>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Inner {
                renderer,
                clock,
                windows11: SourceSlot::default(),
                windows10: SourceSlot::default(),
            }),
        }
    }

    pub async fn get(&self, source: Source) -> RefreshOutcome {
        let slot = self.inner.slot(source);

        if let Some(data) = self.inner.fresh_data(slot) {
            tracing::debug!("Serving cached data for {}", source.display_name());
            return Ok(data);
        }

        let pending = {
            let mut in_flight = slot.lock_in_flight();

            // 等鎖期間另一個渲染可能剛完成
            if let Some(data) = self.inner.fresh_data(slot) {
                return Ok(data);
            }

            match in_flight.as_ref() {
                Some(pending) => {
                    tracing::debug!("Joining in-flight refresh for {}", source.display_name());
                    pending.clone()
                }
                None => {
                    let pending = self.spawn_refresh(source);
                    *in_flight = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    /// 取得 (data, fetched_at) 的一致快照
    pub fn snapshot(&self, source: Source) -> SourceCacheEntry {
        self.inner.slot(source).read_entry()
    }

    // 渲染跑在獨立任務上，呼叫端放棄等待也不會中斷共用的渲染
    fn spawn_refresh(&self, source: Source) -> PendingRefresh {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move { inner.refresh(source).await });

        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(RefreshError::new(
                    source,
                    Arc::new(RenderError::Task(e.to_string())),
                )),
            }
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawRow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Utc::now()),
            }
        }

        fn advance(&self, by: TimeDelta) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    struct CountingRenderer {
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl CountingRenderer {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(true),
            }
        }

        fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageRenderer for CountingRenderer {
        async fn render(&self, _url: &str) -> Result<Vec<RawRow>, RenderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail.load(Ordering::SeqCst) {
                return Err(RenderError::Browser("boom".to_string()));
            }
            Ok(vec![vec![
                format!("v{}", call),
                "GA".to_string(),
                "2023-10-31".to_string(),
                "2024-11-12".to_string(),
                format!("build-{}", call),
                "2025-11-11".to_string(),
                "2026-11-10".to_string(),
            ]])
        }
    }

    #[test]
    fn test_ttl_boundary() {
        let fetched = Utc::now();
        let ttl = TimeDelta::minutes(30);

        assert!(!is_fresh(None, fetched, CACHE_TTL));
        assert!(is_fresh(Some(fetched), fetched, CACHE_TTL));
        assert!(is_fresh(Some(fetched), fetched + ttl, CACHE_TTL));
        assert!(!is_fresh(
            Some(fetched),
            fetched + ttl + TimeDelta::milliseconds(1),
            CACHE_TTL
        ));
    }

    #[tokio::test]
    async fn test_fresh_entry_is_served_without_render() {
        let renderer = Arc::new(CountingRenderer::ok());
        let clock = Arc::new(ManualClock::new());
        let cache = RefreshCache::with_clock(renderer.clone(), clock.clone());

        let first = cache.get(Source::Windows11).await.unwrap();
        assert_eq!(renderer.calls(), 1);

        clock.advance(TimeDelta::minutes(30));
        let second = cache.get(Source::Windows11).await.unwrap();
        assert_eq!(renderer.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_pair() {
        let renderer = Arc::new(CountingRenderer::ok());
        let clock = Arc::new(ManualClock::new());
        let cache = RefreshCache::with_clock(renderer.clone(), clock.clone());

        cache.get(Source::Windows10).await.unwrap();
        let before = cache.snapshot(Source::Windows10);

        clock.advance(TimeDelta::minutes(31));
        renderer.set_failing(true);

        // 有舊資料時仍回傳錯誤，不退回舊資料
        let err = cache.get(Source::Windows10).await.unwrap_err();
        assert_eq!(err.source_id, Source::Windows10);
        assert_eq!(renderer.calls(), 2);

        let after = cache.snapshot(Source::Windows10);
        assert_eq!(before.fetched_at, after.fetched_at);
        assert!(Arc::ptr_eq(
            before.data.as_ref().unwrap(),
            after.data.as_ref().unwrap()
        ));
    }

    #[tokio::test]
    async fn test_in_flight_slot_is_cleared_after_completion() {
        let renderer = Arc::new(CountingRenderer::failing());
        let cache = RefreshCache::new(renderer.clone());

        assert!(cache.get(Source::Windows11).await.is_err());
        assert!(cache.get(Source::Windows11).await.is_err());
        assert_eq!(renderer.calls(), 2);
        assert!(cache.inner.windows11.lock_in_flight().is_none());
    }
}
