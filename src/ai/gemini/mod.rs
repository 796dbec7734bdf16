/// Adds a `with_base_url` builder to a client wrapping `http: GeminiHttpClient`.
macro_rules! impl_with_gemini_base_url {
    ($client:ty) => {
        impl $client {
            /// Point the client at a different API host (proxies, test servers).
            pub fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}
pub(crate) use impl_with_gemini_base_url;

pub mod client;
pub mod image;
pub mod script;
pub mod types;

pub use client::GeminiHttpClient;
pub use image::GeminiImageClient;
pub use script::{video_script_schema, GeminiScriptClient};
