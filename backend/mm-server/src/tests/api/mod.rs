mod error;
mod extractors;
mod messages;
