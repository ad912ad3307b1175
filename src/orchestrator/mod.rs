//! 编排层（Orchestration Layer）
//!
//! 负责组装各层并按固定间隔驱动引擎
//!
//! ```text
//! scheduler::App (定时调用 tick)
//!     ↓
//! workflow::SubmissionEngine (状态机)
//!     ↓
//! services (能力层：extract / detect / sync)
//!     ↓
//! infrastructure / clients (PageObserver / GitHubClient)
//! ```

pub mod scheduler;

pub use scheduler::App;
