pub mod messages;
pub mod popup;
