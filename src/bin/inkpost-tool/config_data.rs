use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::ConfigArgs;

const CFG_FILE_NAME: &str = "inkpost.toml";

const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
template_dir = "template"
public_dir = "public"
content_dir = "content"
# Without an index the built-in posts are served
# content_index = "posts.toml"

# Where post bodies come from: "file" reads content_dir,
# "http" fetches <base_url><path>/<slug>.<extension>
[content]
source = "file"
# base_url = "http://127.0.0.1:8001"
# path = "/assets/blog-posts"
extension = "md"

[defaults]
recent_count = 3

[server]
address = "0.0.0.0"
port = 8001

[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn config_cmd(args: ConfigArgs) -> Result<()> {
    let path: PathBuf = match args.path {
        Some(path) => path,
        None => match dirs::config_dir() {
            Some(dir) => dir.join(CFG_FILE_NAME),
            None => bail!("Could not find user config dir"),
        },
    };

    if path.exists() {
        bail!("{} already exists", path.display());
    }

    println!("Writing sample config to {}", path.display());
    fs::write(&path, CONFIG_SAMPLE).with_context(|| format!("Error writing {}", path.display()))
}
