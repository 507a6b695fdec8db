//! Services layer - persistence of preference snapshots.

pub mod storage;
