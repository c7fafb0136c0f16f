// Pipeline orchestration: the pure analysis run.

pub mod analysis;
