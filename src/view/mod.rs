pub mod detail_view;
pub mod list_renderer;
pub mod list_view;
pub mod post_renderer;
