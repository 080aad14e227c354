//! Rules.toml fixtures for common test scenarios.

use std::path::{Path, PathBuf};

use crate::core::RULES_FILE_NAME;

/// An app manifest reaching one resource rule through a genrule.
pub fn passthrough_rules() -> &'static str {
    r#"
[[rule]]
type = "android_resource"
name = "//res/base:base"
manifest = "res/base/AndroidManifest.xml"
res = "res/base/res"

[[rule]]
type = "genrule"
name = "//gen:wrapped"
deps = ["//res/base:base"]

[[rule]]
type = "android_manifest"
name = "//app:manifest"
skeleton = "app/AndroidManifest.xml"
deps = ["//gen:wrapped"]
"#
}

/// Two libraries sharing one resource dependency.
pub fn diamond_rules() -> &'static str {
    r#"
[[rule]]
type = "android_resource"
name = "//res:d"
manifest = "d.xml"

[[rule]]
type = "android_resource"
name = "//res:b"
manifest = "b.xml"
deps = ["//res:d"]

[[rule]]
type = "android_resource"
name = "//res:c"
manifest = "c.xml"
deps = ["//res:d"]

[[rule]]
type = "android_manifest"
name = "//app:manifest"
skeleton = "app/AndroidManifest.xml"
deps = ["//res:c", "//res:b"]
"#
}

/// Write rules content to `dir/Rules.toml`.
pub fn write_rules(dir: &Path, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(RULES_FILE_NAME);
    std::fs::write(&path, contents)?;
    Ok(path)
}
