//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::MatchId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は試合ごとの ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（driver タスクへ move できる）
pub trait IdGenerator: Send + Sync {
    fn generate_match_id(&self) -> MatchId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// テスト時に FixedClock を使うと、タイムスタンプ部分が固定されます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_match_id(&self) -> MatchId {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        MatchId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}
