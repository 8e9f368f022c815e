use std::path::PathBuf;

use trellis_api::http::Method;

#[derive(clap::Parser, Debug)]
#[clap(name = "trellis", about = "Boot a Trellis application and inspect it")]
pub struct Cli {
    /// Config file (defaults to ./trellis.toml, then the user config dir)
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Application to select from the APP slot
    #[clap(long, global = true)]
    pub app: Option<String>,
    /// Preload JSON with PAYLOAD / CURRENT_USER sections
    #[clap(long, global = true)]
    pub preload: Option<PathBuf>,
    /// Serve responses from a JSON file mapping URLs to bodies instead of the network
    #[clap(long, global = true)]
    pub fixtures: Option<PathBuf>,
    /// Pretend the application was loaded inside a child frame
    #[clap(long, global = true)]
    pub framed: bool,
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the merged route tree
    Routes,
    /// List registered slots and their contributions
    Slots,
    /// Navigate to a path and print the rendered HTML
    Render { path: String },
    /// Dispatch a single API call and print the normalized result
    Fetch {
        /// Absolute URL or path relative to api_url
        endpoint: String,
        /// Key the primary result is stored under
        #[clap(long)]
        key: Option<String>,
        /// Treat the response as a collection
        #[clap(long)]
        many: bool,
        /// HTTP method to send
        #[clap(long, default_value = "GET")]
        method: Method,
    },
}
