pub mod refresh_cache;

pub use crate::domain::model::{RawRow, ReleaseRecord, Source, SourceCacheEntry};
pub use crate::domain::ports::{Clock, PageRenderer, SystemClock};
pub use crate::utils::error::{RefreshError, RenderError, Result};
pub use refresh_cache::{RefreshCache, CACHE_TTL};
