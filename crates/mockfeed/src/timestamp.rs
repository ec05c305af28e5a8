//! 投稿時刻のずらし込み
//!
//! 静的なモックデータは時間が経つと古く見えるため、起動後最初のアクセスで
//! 「最新の投稿が今日の 06:00（現在が 6 時前なら昨日の 06:00）」になるような
//! オフセットを 1 度だけ計算し、全投稿に同じ量だけ足す。
//! 一律の平行移動なので、投稿同士の順序と間隔は変わらない。

use chrono::{DateTime, Duration, Local, NaiveTime, Offset, TimeZone, Timelike, Utc};
use feed_core::FeedError;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 基準時刻（ローカル時刻の時）
pub const REFERENCE_HOUR: u32 = 6;

#[derive(Debug, Default)]
pub struct TimestampNormalizer {
    offset_ms: RwLock<Option<i64>>,
}

impl TimestampNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Option<i64>>, FeedError> {
        self.offset_ms
            .read()
            .map_err(|_| FeedError::Internal("timestamp offset lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Option<i64>>, FeedError> {
        self.offset_ms
            .write()
            .map_err(|_| FeedError::Internal("timestamp offset lock poisoned".to_string()))
    }

    /// 現在のローカル時刻を基準にオフセットを確定させる
    pub fn compute_offset(&self, most_recent: DateTime<Utc>) -> Result<i64, FeedError> {
        self.compute_offset_at(most_recent, Local::now())
    }

    /// `now` を注入できる版。2 回目以降は引数に関係なくキャッシュ値を返す。
    pub fn compute_offset_at<Tz: TimeZone>(
        &self,
        most_recent: DateTime<Utc>,
        now: DateTime<Tz>,
    ) -> Result<i64, FeedError> {
        let mut cached = self.write()?;
        if let Some(offset) = *cached {
            return Ok(offset);
        }

        let target = reference_point(&now);
        let offset = (target - most_recent).num_milliseconds();
        tracing::info!(
            "Timestamp offset computed: {} ms (most recent {} -> {})",
            offset,
            most_recent,
            target
        );

        *cached = Some(offset);
        Ok(offset)
    }

    /// 未計算なら 0 として扱う
    pub fn apply(&self, timestamp: DateTime<Utc>) -> Result<DateTime<Utc>, FeedError> {
        let offset = self.offset()?.unwrap_or(0);
        Ok(timestamp + Duration::milliseconds(offset))
    }

    pub fn offset(&self) -> Result<Option<i64>, FeedError> {
        Ok(*self.read()?)
    }

    /// テスト用: キャッシュ済みのオフセットを破棄する
    pub fn reset(&self) -> Result<(), FeedError> {
        *self.write()? = None;
        Ok(())
    }
}

/// `now` のタイムゾーンでの今日 06:00（6 時前なら昨日の 06:00）を UTC で返す
pub fn reference_point<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let local = now.naive_local();
    let mut date = local.date();
    if local.hour() < REFERENCE_HOUR {
        date = date.pred_opt().unwrap_or(date);
    }
    let target = date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(REFERENCE_HOUR));

    match now.timezone().from_local_datetime(&target).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => {
            // DST の切り替えで 06:00 が存在しない日は現在の UTC オフセットで換算する
            let shift = now.offset().fix().local_minus_utc();
            Utc.from_utc_datetime(&(target - Duration::seconds(shift as i64)))
        }
    }
}
