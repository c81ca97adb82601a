/// CSV export of the day profile.
pub mod export;
