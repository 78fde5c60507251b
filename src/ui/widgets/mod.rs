mod sparkline;

pub use sparkline::MiniSparkline;
