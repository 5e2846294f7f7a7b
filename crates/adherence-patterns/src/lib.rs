//! # adherence-patterns
//!
//! Behavioral pattern battery over adherence histories plus calendar-aware
//! cultural correlation (prayer times, festivals, fasting, family support).
//! Findings describe co-occurrence only.

pub mod calendar;
pub mod cultural;
pub mod detector;
pub mod recommendations;

pub use calendar::StaticFestivalCalendar;
pub use cultural::CulturalPatternAnalyzer;
pub use detector::PatternDetector;
