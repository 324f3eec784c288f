pub mod chart;
pub mod configure;
pub mod discover;
pub mod normalize;
