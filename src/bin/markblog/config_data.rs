use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"# For the file locations, if you want them relative to the executable directory
# use ${exe_dir}/location
[paths]
content_dir = "content"
template_dir = "template"
public_dir = "public"
cache_dir = "cache"

[site]
base_url = "https://example.com"
content_extension = "md"

[cache]
enabled = true
timeout_secs = 3600
purge_interval_secs = 600

[render]
allow_raw_html = false

[server]
address = "0.0.0.0"
port = 5000
debug = false

# Remove this section to log to stdout only
[log]
level = "Info"
log_to_console = true
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}
