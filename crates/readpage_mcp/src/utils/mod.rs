mod html_text;
pub use html_text::extract_text_from_html;

mod http_client;
pub use http_client::build_client;

mod robots;
pub use robots::{robots_allows, robots_txt_url};
