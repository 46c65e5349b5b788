//! Full-screen states outside the normal dashboard.

mod fatal;

pub use fatal::draw_fatal;
