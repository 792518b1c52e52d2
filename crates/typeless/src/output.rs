use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::warn;
use typeless_core::{RenderConfig, TypeDescriptor};

/// Writes one `<name>.<extension>` file per descriptor into `dir`.
pub fn write_interfaces(
    dir: &Path,
    types: &[TypeDescriptor],
    render: &RenderConfig,
    extension: &str,
) -> Result<Vec<PathBuf>> {
    for descriptor in types {
        check_file_stem(descriptor.name())?;
    }

    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut seen = HashSet::new();
    let mut written = Vec::with_capacity(types.len());
    for descriptor in types {
        if !seen.insert(descriptor.name()) {
            warn!(name = descriptor.name(), "duplicate entity name, overwriting earlier file");
        }

        let path = dir.join(file_name(descriptor, extension));
        let mut text = descriptor.render(render);
        text.push('\n');
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

pub fn print_interfaces(types: &[TypeDescriptor], render: &RenderConfig, extension: &str) {
    for descriptor in types {
        println!("// {}", file_name(descriptor, extension));
        println!("{}", descriptor.render(render));
        println!();
    }
}

fn file_name(descriptor: &TypeDescriptor, extension: &str) -> String {
    format!("{}.{extension}", descriptor.name())
}

fn check_file_stem(name: &str) -> Result<()> {
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        bail!("entity name '{name}' cannot be used as a file name");
    }
    Ok(())
}
