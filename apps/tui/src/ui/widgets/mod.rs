pub mod palette;
pub mod popup;
pub mod radar;
pub mod scatter;
pub mod vendors;
pub mod weights;
