mod expiry_tracker;

pub use expiry_tracker::ExpiryTracker;
