//! Replication health classification

mod classifier;
mod health;

#[cfg(test)]
mod tests;

pub use classifier::classify_replication;
pub use health::ReplicationHealth;
