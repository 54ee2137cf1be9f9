//! Side-channel checks
//!
//! Timing analysis used to confirm that secret-dependent comparisons in the
//! engine run in constant time.

pub mod constant_time;

pub use constant_time::{
    verify_constant_time, verify_tag_comparison_timing, ConstantTimeConfig, ConstantTimeResult,
    StatisticalTest, TimingClass,
};
