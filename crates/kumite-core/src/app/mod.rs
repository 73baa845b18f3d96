//! App - アプリケーション層
//!
//! domain の純粋な遷移を、非同期の driver として組み立てます。
//!
//! # 主要コンポーネント
//! - **DriverBuilder**: driver の構築とワイヤリング
//! - **MatchSession**: 一試合分の状態とログ
//! - **DriverLoop**: 状態を唯一所有するタスク（tick + 要求処理）
//! - **PublisherLoop**: イベントを EventSink へ配送
//! - **MatchHandle**: driver への入口
//! - **MatchSnapshot**: 描画用のビュー

pub mod builder;
mod driver_loop;
pub mod handle;
pub mod publisher_loop;
pub mod session;
pub mod status;

pub use self::builder::{BuildError, DriverBuilder, MatchDriver};
pub use self::handle::{DriverTasks, MatchHandle};
pub use self::publisher_loop::PublisherLoop;
pub use self::session::MatchSession;
pub use self::status::{CompetitorView, MatchSnapshot};
