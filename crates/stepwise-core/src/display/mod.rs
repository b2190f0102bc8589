//! Display formatting for study plans, steps, resources, and quizzes.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and contextual views get newtype wrappers. Everything renders
//! as markdown, which the CLI either prints as-is or feeds to its terminal
//! renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Markdown      │
//! │  (Plan, Step)   │───▶│ (Steps, views)  │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries, Steps)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models and [`StepView`]
//!
//! ```rust
//! use stepwise_core::{display::OperationStatus, models::ResolvedResource};
//!
//! let resource = ResolvedResource::Url("https://www.youtube.com/watch?v=dQw4&t=1".to_string());
//! assert!(resource.to_string().contains("https://www.youtube.com/embed/dQw4"));
//!
//! let status = OperationStatus::success("Imported plan 1".to_string());
//! assert_eq!(status.to_string(), "Success: Imported plan 1\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::{PlanSummaries, Steps};
pub use datetime::LocalDateTime;
pub use models::StepView;
pub use status::OperationStatus;
